//! Filename extraction from URL path.

/// Extracts the last non-empty path segment from a URL, for use as a
/// filename hint. Query strings and fragments never contribute.
///
/// Returns `None` if the URL cannot be parsed, has no path, or the path is
/// root/empty.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
