// src/main.rs

#[tokio::main]
async fn main() {
    if let Err(e) = nowest_backend::run().await {
        tracing::error!("Server stopped: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
