//! Helper functions shared by the content pipeline and configuration

pub mod url;

pub use url::{is_absolute_http_url, AssetResolver};
