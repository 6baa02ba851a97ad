//! Statically addressable routes

use std::fmt;
use std::path::PathBuf;

/// One page of the generated site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    BlogIndex,
    BlogPost(String),
}

impl Route {
    /// URL path relative to the site root, without a leading slash
    pub fn url_path(&self) -> String {
        match self {
            Route::Home => String::new(),
            Route::BlogIndex => "blog/".to_string(),
            Route::BlogPost(slug) => format!("blog/{}/", slug),
        }
    }

    /// Output file relative to the public directory
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.url_path()).join("index.html")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.url_path().trim_end_matches('/'))
    }
}
