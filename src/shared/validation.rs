use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that must not appear in a blob-store key segment:
    /// path separators and ASCII control characters.
    pub static ref UNSAFE_KEY_CHARS_REGEX: Regex = Regex::new(r"[/\\\x00-\x1f\x7f]").unwrap();
}

/// Make an uploaded filename safe to embed in an object key.
///
/// The name is otherwise kept as uploaded; an empty result becomes "photo".
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = UNSAFE_KEY_CHARS_REGEX.replace_all(name.trim(), "_");
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_keeps_plain_names() {
        assert_eq!(sanitize_filename("streetlight.jpg"), "streetlight.jpg");
        assert_eq!(sanitize_filename("photo 1.png"), "photo 1.png");
    }

    #[test]
    fn test_sanitize_filename_replaces_separators() {
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename("a\\b.jpg"), "a_b.jpg");
        assert_eq!(sanitize_filename("tab\there.jpg"), "tab_here.jpg");
    }

    #[test]
    fn test_sanitize_filename_empty() {
        assert_eq!(sanitize_filename("   "), "photo");
    }
}
