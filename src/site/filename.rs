/// Last path segment of an image source, without query string, lower-cased.
pub fn filename_from_src(src: &str) -> Option<String> {
    if src.is_empty() {
        return None;
    }
    let last = src.rsplit('/').next().unwrap_or(src);
    let name = last.split('?').next().unwrap_or(last);
    Some(name.to_lowercase())
}

/// Filename referenced by the first `url(...)` in a CSS background value.
pub fn filename_from_background(css: &str) -> Option<String> {
    let lower = css.to_ascii_lowercase();
    let start = lower.find("url(")? + "url(".len();
    let rest = css[start..].trim_start_matches(['"', '\'']);
    let end = rest.find(['"', '\'', ')'])?;
    let url = &rest[..end];
    if url.is_empty() {
        return None;
    }
    filename_from_src(url)
}
