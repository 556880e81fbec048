// src/bin/hash-password.rs

use std::env;

use bcrypt::{hash, DEFAULT_COST};

fn main() {
    let password = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin hash-password <PASSWORD> [COST]");
        std::process::exit(1);
    });

    let cost = match env::args().nth(2) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("COST must be a number between 4 and 31, got '{}'", raw);
            std::process::exit(1);
        }),
        None => DEFAULT_COST,
    };

    match hash(&password, cost) {
        Ok(hashed) => {
            println!("Cost : {}", cost);
            println!("Hash : {}", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
