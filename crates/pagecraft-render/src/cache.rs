//! Render cache
//!
//! Content-addressed caching of rendered pages using moka. A page is keyed
//! by the hash of its document bytes plus the theme, so any edit (or theme
//! switch) misses and re-renders while repeated renders of the same draft
//! are free.

use crate::page::RenderedPage;
use crate::render::{render, RenderError};
use crate::theme::Theme;
use moka::future::Cache;
use pagecraft_schema::{ContentDoc, ContentHash};
use std::sync::Arc;
use std::time::Duration;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderCacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Content-addressed cache of rendered pages
#[derive(Debug, Clone)]
pub struct RenderCache {
    inner: Cache<ContentHash, Arc<RenderedPage>>,
}

impl RenderCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Render through the cache
    ///
    /// # Errors
    /// Propagates render and hashing failures; failures are not cached.
    pub async fn render_cached(
        &self,
        doc: &ContentDoc,
        theme: &Theme,
    ) -> Result<Arc<RenderedPage>, RenderError> {
        let key = cache_key(doc, theme);

        if let Some(page) = self.inner.get(&key).await {
            return Ok(page);
        }

        let page = Arc::new(render(doc, theme)?);
        self.inner.insert(key, Arc::clone(&page)).await;
        Ok(page)
    }

    /// Drop the cached render for a specific document/theme pair
    #[inline]
    pub async fn invalidate(&self, doc: &ContentDoc, theme: &Theme) {
        self.inner.invalidate(&cache_key(doc, theme)).await;
    }

    /// Drop all cached renders
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> RenderCacheStats {
        RenderCacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for RenderCache {
    /// Create cache with default capacity (1,000 pages)
    fn default() -> Self {
        Self::new(1_000)
    }
}

fn cache_key(doc: &ContentDoc, theme: &Theme) -> ContentHash {
    // Doc bytes and theme bytes, length-prefixed by the JSON structure
    // itself (both are objects), keyed under one hash.
    let mut bytes = serde_json::to_vec(doc.as_value()).unwrap_or_default();
    bytes.extend(serde_json::to_vec(theme).unwrap_or_default());
    ContentHash::compute(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> ContentDoc {
        ContentDoc::new(value).unwrap()
    }

    #[tokio::test]
    async fn cache_hit_returns_same_page() {
        let cache = RenderCache::new(10);
        let d = doc(json!({"hero": {"title": "Hi"}}));
        let theme = Theme::default();

        let first = cache.render_cached(&d, &theme).await.unwrap();
        let second = cache.render_cached(&d, &theme).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn edit_misses_cache() {
        let cache = RenderCache::new(10);
        let theme = Theme::default();

        let a = cache
            .render_cached(&doc(json!({"hero": {"title": "A"}})), &theme)
            .await
            .unwrap();
        let b = cache
            .render_cached(&doc(json!({"hero": {"title": "B"}})), &theme)
            .await
            .unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn theme_is_part_of_the_key() {
        let cache = RenderCache::new(10);
        let d = doc(json!({}));

        let plain = cache.render_cached(&d, &Theme::default()).await.unwrap();
        let mut themed = Theme::named("dark");
        themed.colors.primary = Some("#000000".into());
        let dark = cache.render_cached(&d, &themed).await.unwrap();

        assert!(!Arc::ptr_eq(&plain, &dark));
        assert_eq!(dark.styles.primary, "#000000");
    }

    #[tokio::test]
    async fn invalidate_forces_rerender() {
        let cache = RenderCache::new(10);
        let d = doc(json!({}));
        let theme = Theme::default();

        let first = cache.render_cached(&d, &theme).await.unwrap();
        cache.invalidate(&d, &theme).await;
        let second = cache.render_cached(&d, &theme).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }
}
