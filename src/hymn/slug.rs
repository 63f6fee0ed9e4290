use crate::ExtractError;

/// Hymn number and title encoded in a detail-page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HymnInfo {
    pub number: String,
    pub title: String,
}

/// Derives the hymn number and title from a detail-page URL
///
/// Detail pages live at `.../<number>-<title-words>/`. One trailing '/' is
/// dropped, the last path segment is taken, hyphens become spaces, and the
/// result is split on its first space.
///
/// # Examples
///
/// ```
/// use hymnal_crawler::hymn::hymn_info_from_url;
///
/// let info = hymn_info_from_url("https://example.com/Hymnal/123-amazing-grace/").unwrap();
/// assert_eq!(info.number, "123");
/// assert_eq!(info.title, "amazing grace");
/// ```
pub fn hymn_info_from_url(url: &str) -> Result<HymnInfo, ExtractError> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let slug = trimmed.rsplit('/').next().unwrap_or(trimmed).replace('-', " ");

    match slug.split_once(' ') {
        Some((number, title)) if !number.is_empty() && !title.is_empty() => Ok(HymnInfo {
            number: number.to_string(),
            title: title.to_string(),
        }),
        _ => Err(ExtractError::MalformedSlug {
            url: url.to_string(),
        }),
    }
}
