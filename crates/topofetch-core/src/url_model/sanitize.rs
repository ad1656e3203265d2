//! Filename sanitization for Linux filesystems.

/// Maximum filename length in bytes (Linux NAME_MAX).
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename so it is safe to create under a directory:
///
/// - path separators, NUL, control characters, and whitespace become `_`
/// - runs of `_` collapse to one
/// - leading/trailing dots, spaces, and underscores are trimmed
/// - the result is truncated to 255 bytes on a char boundary
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let safe = !(c == '/' || c == '\\' || c == '\0' || c.is_control() || c.is_whitespace());
        if safe {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == ' ' || c == '_');

    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut cut = NAME_MAX;
    while cut > 0 && !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[..cut].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_underscore() {
        assert_eq!(sanitize_filename("a/b\\c.txt"), "a_b_c.txt");
    }

    #[test]
    fn whitespace_and_control_chars() {
        assert_eq!(sanitize_filename("topo map\t2023.pdf"), "topo_map_2023.pdf");
        assert_eq!(sanitize_filename("file\x00name.txt"), "file_name.txt");
    }

    #[test]
    fn runs_collapse() {
        assert_eq!(sanitize_filename("a // \\ b.zip"), "a_b.zip");
    }

    #[test]
    fn leading_trailing_trim() {
        assert_eq!(sanitize_filename("  ..file.txt.. "), "file.txt");
        assert_eq!(sanitize_filename("___x___"), "x");
    }

    #[test]
    fn long_names_truncate_on_char_boundary() {
        let long = "é".repeat(200); // 400 bytes
        let out = sanitize_filename(&long);
        assert!(out.len() <= NAME_MAX);
        assert!(out.is_char_boundary(out.len()));
        assert!(!out.is_empty());
    }
}
