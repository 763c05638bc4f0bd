/// Maximum number of related keywords kept per quality keyword
pub const MAX_RELATED_KEYWORDS: usize = 3;

/// The text every generated article has to start with
pub fn opening_marker(main_keyword: &str, url: &str) -> String {
    format!("{main_keyword}【网址：{url}】")
}
