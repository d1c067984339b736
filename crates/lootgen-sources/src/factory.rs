//! Provider selection by URI scheme.

use anyhow::Result;
use tracing::info;

use crate::http::HttpProvider;
use crate::json_dir::JsonDirProvider;
use crate::TableProvider;

/// Build a provider for a table source URI.
///
/// `http://` and `https://` URIs are served by [`HttpProvider`]; `file://`
/// URIs and bare paths by [`JsonDirProvider`].
pub fn provider_from_uri(uri: &str) -> Result<Box<dyn TableProvider>> {
    let uri = uri.trim();
    if uri.is_empty() {
        anyhow::bail!("Table source URI is empty");
    }

    if uri.starts_with("http://") || uri.starts_with("https://") {
        info!("Using HTTP table provider at {}", uri);
        return Ok(Box::new(HttpProvider::new(uri)?));
    }

    let path = match uri.strip_prefix("file://") {
        Some(path) => path,
        None if uri.contains("://") => anyhow::bail!("Unsupported table source URI: {}", uri),
        None => uri,
    };
    info!("Using JSON directory table provider at {}", path);
    Ok(Box::new(JsonDirProvider::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_uri_accepted() {
        assert!(provider_from_uri("https://tables.example.com/export").is_ok());
    }

    #[test]
    fn test_file_uri_and_bare_path_accepted() {
        assert!(provider_from_uri("file:///var/cache/lootgen").is_ok());
        assert!(provider_from_uri("./cache").is_ok());
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let err = provider_from_uri("s3://bucket/tables").err().unwrap();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_empty_uri_rejected() {
        assert!(provider_from_uri("  ").is_err());
    }
}
