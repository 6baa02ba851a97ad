//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/hello/") // -> "/sub/blog/hello/" with root "/sub/"
/// ```
fn url_for(config: &SiteConfig, path: &str) -> String {
    join_root(&config.root, path)
}

/// Absolute URLs pass through; everything else is prefixed with `root`
pub fn join_root(root: &str, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    format!(
        "{}{}",
        config.url.trim_end_matches('/'),
        url_for(config, path)
    )
}

fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(root: &str) -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: root.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        assert_eq!(url_for(&config("/"), "blog/"), "/blog/");
        assert_eq!(url_for(&config("/"), ""), "/");
        assert_eq!(url_for(&config("/sub/"), "/blog/a/"), "/sub/blog/a/");
        assert_eq!(
            url_for(&config("/"), "https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for(&config("/"), "/blog/hello/"),
            "https://example.com/blog/hello/"
        );
        assert_eq!(full_url_for(&config("/sub"), ""), "https://example.com/sub/");
    }
}
