use crate::cache::CacheOptions;

/// Configuration for a [`Pager`](super::Pager).
///
/// Missing fields fall back to their defaults when deserialized, so a JSON
/// document only needs the options it changes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct PagerOptions {
    /// Reject navigation calls while a page is loading.
    pub prevent_multiple_loadings: bool,
    /// Serve pages through a windowed cache. When false every load hits the loader.
    pub enable_cache: bool,
    /// Prefetch pages around the one being displayed.
    pub preload: bool,
    /// Pages before the displayed one to prefetch.
    pub previous_items: u32,
    /// Pages after the displayed one to prefetch.
    pub following_items: u32,
}

impl Default for PagerOptions {
    fn default() -> Self {
        PagerOptions {
            prevent_multiple_loadings: true,
            enable_cache: true,
            preload: true,
            previous_items: 1,
            following_items: 1,
        }
    }
}

impl PagerOptions {
    /// Creates options from a JSON file.
    pub fn new_from_json(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let options: PagerOptions = serde_json::from_reader(reader)?;
        Ok(options)
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            previous_items: self.previous_items,
            following_items: self.following_items,
            preload: self.preload,
        }
    }
}
