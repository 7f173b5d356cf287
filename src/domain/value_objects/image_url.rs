/// Uploaded images are referenced as `.../api/images/<filename>`.
const IMAGE_PATH_MARKER: &str = "/api/images/";

/// Derives the stored filename from a post's image URL. Returns `None` when
/// the URL does not point at the image route, in which case cleanup is
/// skipped.
pub fn extract_image_filename(url: &str) -> Option<&str> {
    let (_, filename) = url.split_once(IMAGE_PATH_MARKER)?;
    if filename.is_empty() {
        return None;
    }
    Some(filename)
}
