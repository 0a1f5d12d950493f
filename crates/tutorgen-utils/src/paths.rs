//! Path and filename helpers

/// Maximum length (in characters) of a sanitized filename fragment.
const MAX_FRAGMENT_CHARS: usize = 60;

/// Clean a string so it is safe to use as part of a filename.
///
/// Path separators become underscores, anything outside alphanumerics,
/// spaces, dots, underscores, and hyphens is dropped, the result is capped
/// at 60 characters, and remaining spaces become underscores.
#[must_use]
pub fn sanitize_filename(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect();

    cleaned
        .trim()
        .chars()
        .take(MAX_FRAGMENT_CHARS)
        .collect::<String>()
        .replace(' ', "_")
}
