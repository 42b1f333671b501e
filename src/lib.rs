//! Waterfall Gallery
//!
//! Masonry-style ("waterfall") image gallery building blocks: a client for
//! the remote image service, a persisted dark/light theme preference, and
//! the column-balancing layout engine that distributes images over N
//! columns of equal width.
//!
//! # Features
//!
//! - **http** (default): blocking HTTP image source plus an async wrapper
//! - The layout engine, theme store and gallery context build without it
//!
//! # Example
//!
//! ```
//! use waterfall::layout::{arrange, column_count};
//! use waterfall::ImageDescriptor;
//!
//! # fn main() -> waterfall::Result<()> {
//! let images = vec![
//!     ImageDescriptor::new("1", "https://img/1.jpg", 100, 100),
//!     ImageDescriptor::new("2", "https://img/2.jpg", 100, 50),
//! ];
//! let count = column_count(800.0, 200.0, 8);
//! let columns = arrange(images, count, 200.0)?;
//! assert_eq!(columns.len(), 4);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub use model::{Author, ImageDescriptor};

// Column-balancing layout engine
pub mod layout;

// Persisted dark/light preference behind a key-value store
pub mod theme;

// Explicit application context (authors, query, loaded images)
pub mod gallery;

// Remote image service client (blocking reqwest)
#[cfg(feature = "http")]
pub mod api;

// Async-friendly wrapper around the blocking client (worker thread)
#[cfg(feature = "http")]
pub mod async_api;

#[cfg(feature = "http")]
pub use api::HttpImageSource;
#[cfg(feature = "http")]
pub use async_api::AsyncGallery;

pub use gallery::{Gallery, ImageQuery, ImageSource};
pub use layout::{Column, LayoutConfig};
pub use theme::{FileStore, KeyValueStore, MemoryStore, Theme, ThemeStore};

/// Environment variable holding the image service base URL
pub const ENV_API_HOSTNAME: &str = "WATERFALL_API_HOSTNAME";
/// Environment variable overriding the request timeout (milliseconds)
pub const ENV_TIMEOUT_MS: &str = "WATERFALL_TIMEOUT_MS";

/// Configuration for the gallery client and layout
///
/// Defaults point at a local development server with a 30 s timeout and
/// the standard 200px / 8 column layout grid.
///
/// # Examples
///
/// ```
/// let cfg = waterfall::GalleryConfig::default();
/// assert_eq!(cfg.layout.max_columns, 8);
/// ```
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Base URL of the image service, e.g. `https://api.example.com`
    pub base_url: String,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Timeout for a single request in milliseconds
    pub timeout_ms: u64,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
    /// Column grid settings
    pub layout: LayoutConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: concat!("waterfall/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
            headers: HashMap::new(),
            layout: LayoutConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Defaults overridden by `WATERFALL_API_HOSTNAME` and
    /// `WATERFALL_TIMEOUT_MS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_API_HOSTNAME).filter(|v| !v.trim().is_empty()) {
            config.base_url = base.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a number of milliseconds, got {:?}", ENV_TIMEOUT_MS, raw))
            })?;
        }
        Ok(config)
    }
}
