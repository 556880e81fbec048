// src/common/db_utils.rs

// Helpers shared by the storage backends for the "empty string clears the
// column" convention of nullable text fields.

/// `Some("")` becomes `None`, anything else is kept.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolves a patch on a nullable column.
///
/// Returns `(touched, value)`: `touched` is false when the field was absent
/// from the payload, and `value` is what the column should hold otherwise.
pub(crate) fn nullable_patch(patch: Option<String>) -> (bool, Option<String>) {
    match patch {
        None => (false, None),
        Some(v) => (true, blank_to_none(Some(v))),
    }
}

/// In-place variant of [`nullable_patch`] for in-memory rows.
pub(crate) fn apply_nullable(target: &mut Option<String>, patch: Option<String>) {
    let (touched, value) = nullable_patch(patch);
    if touched {
        *target = value;
    }
}

/// `%term%` for `ILIKE`, with the wildcards of `term` escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match, the in-memory counterpart of `ILIKE '%term%'`.
pub(crate) fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}
