//! Small pure helpers shared across layers

pub mod serde;

/// Preview of a secret token for log fields (first 8 chars + `...`).
///
/// Short tokens are fully masked so nothing secret ends up in logs.
pub fn token_preview(token: &str) -> String {
    match token.char_indices().nth(12) {
        Some(_) => {
            let head: String = token.chars().take(8).collect();
            format!("{head}...")
        }
        None => "***".to_string(),
    }
}
