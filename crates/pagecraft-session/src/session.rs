//! Customization session
//!
//! Owns the draft document for one page and keeps three copies honest: the
//! in-memory draft, the persisted copy, and the embedded preview. Edits go
//! through the patch applier, arm a volatility-classified debounce timer,
//! and settle into exactly one coalesced save; the preview reloads only
//! after persistence acknowledges.
//!
//! Timer semantics: re-arming aborts the previous timer task; that is the
//! only cancellation primitive. Patches arriving while a save is in flight
//! are accepted into the draft and trigger exactly one follow-up save.

use crate::config::{SessionConfig, Volatility};
use crate::error::SessionError;
use crate::preview::{PreviewSurface, PreviewSynchronizer};
use crate::state::{validate_transition, SessionState, SessionStatus};
use crate::store::{PageStore, SavePayload};
use futures::future::BoxFuture;
use pagecraft_patch::{apply_patch, ContentPath};
use pagecraft_schema::{merge_with_defaults, ContentDoc, ContentHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

/// Page metadata persisted alongside the content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page title
    pub title: String,
    /// Public slug
    pub slug: String,
    /// Source template id
    pub template_id: String,
    /// Whether the page is published
    pub active: bool,
}

/// The session's working copy
#[derive(Debug, Clone)]
pub struct Draft {
    /// Current content document
    pub doc: ContentDoc,
    /// Whether unsaved edits exist
    pub dirty: bool,
    /// Snapshot of the last successfully persisted document
    pub last_saved: Option<ContentDoc>,
}

/// One editing session over one page draft
///
/// Cheap to clone-share internally; the draft is exclusively owned here and
/// consumers only ever receive cloned views.
#[derive(Debug)]
pub struct CustomizationSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    resource_id: String,
    meta: PageMeta,
    config: SessionConfig,
    store: Arc<dyn PageStore>,
    preview: PreviewSynchronizer,
    status_tx: watch::Sender<SessionStatus>,
    guarded: Mutex<Guarded>,
}

#[derive(Debug)]
struct Guarded {
    draft: Draft,
    state: SessionState,
    debounce: Option<JoinHandle<()>>,
    deferred: bool,
    closed: bool,
}

impl CustomizationSession {
    /// Open a session on a persisted document
    ///
    /// The persisted content is merged over the built-in defaults
    /// key-by-key, so the draft always carries every leaf the renderer
    /// unconditionally reads.
    #[must_use]
    pub fn open(
        resource_id: impl Into<String>,
        meta: PageMeta,
        persisted: &ContentDoc,
        store: Arc<dyn PageStore>,
        surface: Arc<dyn PreviewSurface>,
        config: SessionConfig,
    ) -> Self {
        let doc = merge_with_defaults(persisted);
        let (status_tx, _) = watch::channel(SessionStatus::Idle);
        Self {
            inner: Arc::new(SessionInner {
                resource_id: resource_id.into(),
                meta,
                config,
                store,
                preview: PreviewSynchronizer::new(surface),
                status_tx,
                guarded: Mutex::new(Guarded {
                    draft: Draft {
                        last_saved: Some(doc.clone()),
                        doc,
                        dirty: false,
                    },
                    state: SessionState::Idle,
                    debounce: None,
                    deferred: false,
                    closed: false,
                }),
            }),
        }
    }

    /// Apply a single edit to the draft
    ///
    /// Arms (or re-arms) the debounce timer; rapid sequential patches
    /// coalesce into one save of the final draft. Patches during an
    /// in-flight save are accepted and saved in one follow-up cycle.
    ///
    /// # Errors
    /// Patch errors leave the draft untouched; `Closed` after [`Self::close`].
    pub async fn apply(&self, path: &ContentPath, value: Value) -> Result<(), SessionError> {
        let mut g = self.inner.guarded.lock().await;
        if g.closed {
            return Err(SessionError::Closed);
        }

        let patched = apply_patch(&g.draft.doc, path, value)?;
        g.draft.doc = patched;
        g.draft.dirty = true;

        match g.state {
            SessionState::Saving | SessionState::Refreshing => {
                // Accepted into the draft; one follow-up save after the
                // in-flight cycle resolves.
                g.deferred = true;
                tracing::debug!(%path, "patch deferred behind in-flight save");
            }
            from => {
                if from != SessionState::Editing {
                    validate_transition(from, SessionState::Editing)?;
                    g.state = SessionState::Editing;
                }
                let volatility = Volatility::classify(path.section());
                let delay = self.inner.config.debounce_for(volatility);
                Self::arm_debounce(&mut g, &self.inner, delay);
                drop(g);
                let _ = self.inner.status_tx.send(SessionStatus::Editing);
                tracing::debug!(%path, ?volatility, "patch applied, debounce armed");
            }
        }
        Ok(())
    }

    /// Parse `path` and apply, in one call
    ///
    /// # Errors
    /// As [`Self::apply`], plus path parse errors
    pub async fn apply_str(&self, path: &str, value: Value) -> Result<(), SessionError> {
        let path: ContentPath = path.parse().map_err(pagecraft_patch::PatchError::from)?;
        self.apply(&path, value).await
    }

    /// Force an immediate save cycle, bypassing the debounce
    ///
    /// Returns `false` when there was nothing to save. When a save is
    /// already in flight the pending edits follow up on their own.
    ///
    /// # Errors
    /// Surfaces the save failure the debounced path only reports through
    /// the status channel.
    pub async fn flush(&self) -> Result<bool, SessionError> {
        {
            let mut g = self.inner.guarded.lock().await;
            if g.closed {
                return Err(SessionError::Closed);
            }
            if !g.draft.dirty {
                return Ok(false);
            }
            match g.state {
                SessionState::Editing | SessionState::SaveFailed => {
                    if let Some(handle) = g.debounce.take() {
                        handle.abort();
                    }
                }
                SessionState::Saving | SessionState::Refreshing => return Ok(true),
                SessionState::Idle => return Ok(false),
            }
        }
        run_save_cycle(Arc::clone(&self.inner)).await.map(|()| true)
    }

    /// Close the session, discarding unsaved edits
    pub async fn close(self) {
        let mut g = self.inner.guarded.lock().await;
        g.closed = true;
        if let Some(handle) = g.debounce.take() {
            handle.abort();
        }
        tracing::debug!(resource = %self.inner.resource_id, "session closed");
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Current state
    pub async fn state(&self) -> SessionState {
        self.inner.guarded.lock().await.state
    }

    /// Cloned view of the current draft document
    pub async fn doc(&self) -> ContentDoc {
        self.inner.guarded.lock().await.draft.doc.clone()
    }

    /// Whether unsaved edits exist
    pub async fn is_dirty(&self) -> bool {
        self.inner.guarded.lock().await.draft.dirty
    }

    /// Whether the draft's content actually diverges from the last save
    ///
    /// Compares canonical content hashes; an edit that restores the saved
    /// value leaves `dirty` set but reports no divergence here.
    pub async fn changed_since_save(&self) -> bool {
        let g = self.inner.guarded.lock().await;
        match (&g.draft.last_saved, ContentHash::of_doc(&g.draft.doc)) {
            (Some(saved), Ok(current)) => {
                ContentHash::of_doc(saved).map_or(true, |s| s != current)
            }
            _ => true,
        }
    }

    /// Last preview cache-busting token handed out
    #[must_use]
    pub fn preview_token(&self) -> u64 {
        self.inner.preview.current_token()
    }

    fn arm_debounce(g: &mut Guarded, inner: &Arc<SessionInner>, delay: Duration) {
        if let Some(handle) = g.debounce.take() {
            handle.abort();
        }
        let inner = Arc::clone(inner);
        g.debounce = Some(tokio::spawn(async move {
            sleep(delay).await;
            // Failures are published on the status channel
            let _ = run_save_cycle(inner).await;
        }));
    }
}

/// One save-and-refresh cycle
///
/// Boxed so the follow-up cycle for deferred edits can re-enter without a
/// recursive future type.
fn run_save_cycle(inner: Arc<SessionInner>) -> BoxFuture<'static, Result<(), SessionError>> {
    Box::pin(async move {
        // Enter Saving; bail if another cycle won the race
        let doc = {
            let mut g = inner.guarded.lock().await;
            if g.closed {
                return Err(SessionError::Closed);
            }
            match g.state {
                SessionState::Editing | SessionState::SaveFailed => {
                    validate_transition(g.state, SessionState::Saving)?;
                    g.state = SessionState::Saving;
                }
                _ => return Ok(()),
            }
            g.draft.doc.clone()
        };
        let _ = inner.status_tx.send(SessionStatus::Saving);

        let payload = SavePayload {
            title: inner.meta.title.clone(),
            slug: inner.meta.slug.clone(),
            template_id: inner.meta.template_id.clone(),
            content: doc.clone(),
            active: inner.meta.active,
        };

        let outcome = match timeout(
            inner.config.save_timeout(),
            inner.store.save(&inner.resource_id, payload),
        )
        .await
        {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(SessionError::Save(e)),
            Err(_) => Err(SessionError::SaveTimeout {
                timeout_ms: inner.config.save_timeout_ms,
            }),
        };

        match outcome {
            Ok(receipt) => {
                {
                    let mut g = inner.guarded.lock().await;
                    g.draft.last_saved = Some(doc);
                    if !g.deferred {
                        g.draft.dirty = false;
                    }
                    g.state = SessionState::Refreshing;
                }
                let _ = inner.status_tx.send(SessionStatus::Refreshing);
                tracing::info!(
                    resource = %inner.resource_id,
                    saved_at = %receipt.saved_at,
                    "draft persisted"
                );

                // The preview only ever reloads here, after the save acked.
                // Reload failures leave a stale preview, which is preferable
                // to reloading against unsaved state.
                match timeout(
                    inner.config.refresh_timeout(),
                    inner.preview.refresh(&inner.meta.slug),
                )
                .await
                {
                    Ok(Ok(token)) => tracing::debug!(token, "preview reloaded"),
                    Ok(Err(e)) => tracing::warn!(error = %e, "preview reload failed"),
                    Err(_) => tracing::warn!("preview reload timed out"),
                }

                let mut g = inner.guarded.lock().await;
                if g.deferred {
                    g.deferred = false;
                    g.state = SessionState::Editing;
                    let delay = inner.config.debounce_for(Volatility::Content);
                    CustomizationSession::arm_debounce(&mut g, &inner, delay);
                    drop(g);
                    let _ = inner.status_tx.send(SessionStatus::Editing);
                } else {
                    g.state = SessionState::Idle;
                    drop(g);
                    let _ = inner.status_tx.send(SessionStatus::Idle);
                }
                Ok(())
            }
            Err(err) => {
                {
                    let mut g = inner.guarded.lock().await;
                    // Draft stays dirty; nothing is lost and no refresh
                    // happens against unsaved state.
                    g.state = SessionState::SaveFailed;
                    g.deferred = false;
                }
                tracing::warn!(error = %err, "save failed, draft retained");
                let _ = inner.status_tx.send(SessionStatus::SaveFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    })
}
