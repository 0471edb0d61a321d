//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SiteConfig;

lazy_static! {
    static ref ABSOLUTE_HTTP_URL: Regex = Regex::new(r"^https?://.+$").unwrap();
}

/// Whether `url` is an absolute `http://` or `https://` URL
pub fn is_absolute_http_url(url: &str) -> bool {
    ABSOLUTE_HTTP_URL.is_match(url)
}

/// Resolves local asset references against the site origin
///
/// # Examples
/// ```ignore
/// let resolver = AssetResolver::new("https://cms.example.com", "/public");
/// resolver.resolve("/public/img.png") // -> "https://cms.example.com/public/img.png"
/// resolver.resolve("https://cdn.example.com/x.png") // unchanged
/// ```
#[derive(Debug, Clone)]
pub struct AssetResolver {
    origin: String,
    prefix: String,
}

impl AssetResolver {
    pub fn new(origin: &str, prefix: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            prefix: prefix.to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.origin, &config.asset_prefix)
    }

    /// Whether `url` points at a local asset
    pub fn is_local(&self, url: &str) -> bool {
        url.starts_with(&self.prefix)
    }

    /// Replace the local asset prefix with `<origin><prefix>`; any other URL is returned as is
    pub fn resolve(&self, url: &str) -> String {
        match url.strip_prefix(&self.prefix) {
            Some(rest) => format!("{}{}{}", self.origin, self.prefix, rest),
            None => url.to_string(),
        }
    }
}
