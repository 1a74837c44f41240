//! Preview synchronization
//!
//! The embedded preview surface loads pages through the public render
//! endpoint. After a draft persists, [`PreviewSynchronizer`] instructs the
//! surface to reload with a fresh cache-busting token so no cache layer can
//! serve the previous render. It must only ever be invoked after the save
//! acknowledged; reloading earlier would show the prior persisted version.

use crate::error::PreviewError;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The embedded preview surface (an iframe, a webview, a test fake)
#[async_trait::async_trait]
pub trait PreviewSurface: Send + Sync + Debug {
    /// Reload the surface at the given address
    ///
    /// Resolves once the surface acknowledges the reload instruction; the
    /// surface's internal render completion is not observable.
    ///
    /// # Errors
    /// Returns error when the surface cannot reload
    async fn reload(&self, url: &str) -> Result<(), PreviewError>;
}

/// Builds cache-defeating reload addresses and drives the surface
#[derive(Debug)]
pub struct PreviewSynchronizer {
    surface: Arc<dyn PreviewSurface>,
    token: AtomicU64,
}

impl PreviewSynchronizer {
    /// Create a synchronizer over a surface
    #[inline]
    #[must_use]
    pub fn new(surface: Arc<dyn PreviewSurface>) -> Self {
        Self {
            surface,
            token: AtomicU64::new(0),
        }
    }

    /// Public render address for a slug and token
    ///
    /// The token is purely cache-busting; the server ignores it.
    #[inline]
    #[must_use]
    pub fn preview_url(slug: &str, token: u64) -> String {
        format!("/l/{slug}?t={token}")
    }

    /// Last token handed out
    #[inline]
    #[must_use]
    pub fn current_token(&self) -> u64 {
        self.token.load(Ordering::SeqCst)
    }

    /// Reload the preview for `slug` with the next token
    ///
    /// Returns the token used. Tokens are strictly increasing for the
    /// lifetime of the synchronizer.
    ///
    /// # Errors
    /// Returns error when the surface reload fails; callers treat this as
    /// non-fatal (a stale preview beats a misleading one).
    pub async fn refresh(&self, slug: &str) -> Result<u64, PreviewError> {
        let token = self.token.fetch_add(1, Ordering::SeqCst) + 1;
        let url = Self::preview_url(slug, token);
        tracing::debug!(%slug, token, "refreshing preview");
        self.surface.reload(&url).await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSurface {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl PreviewSurface for RecordingSurface {
        async fn reload(&self, url: &str) -> Result<(), PreviewError> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn url_format() {
        assert_eq!(PreviewSynchronizer::preview_url("launch", 7), "/l/launch?t=7");
    }

    #[tokio::test]
    async fn tokens_strictly_increase() {
        let surface = Arc::new(RecordingSurface::default());
        let sync = PreviewSynchronizer::new(surface.clone());

        let t1 = sync.refresh("page").await.unwrap();
        let t2 = sync.refresh("page").await.unwrap();
        let t3 = sync.refresh("page").await.unwrap();

        assert!(t1 < t2 && t2 < t3);
        let urls = surface.urls.lock().unwrap();
        assert_eq!(urls[0], format!("/l/page?t={t1}"));
        assert_eq!(urls[2], format!("/l/page?t={t3}"));
    }

    #[tokio::test]
    async fn failure_propagates_but_token_is_consumed() {
        #[derive(Debug)]
        struct FailingSurface;

        #[async_trait::async_trait]
        impl PreviewSurface for FailingSurface {
            async fn reload(&self, _url: &str) -> Result<(), PreviewError> {
                Err(PreviewError::ReloadFailed("gone".into()))
            }
        }

        let sync = PreviewSynchronizer::new(Arc::new(FailingSurface));
        assert!(sync.refresh("page").await.is_err());
        // The next successful refresh still gets a strictly larger token
        assert_eq!(sync.current_token(), 1);
    }
}
