//! End-to-end session flows: debounced saves, deferred edits, failure
//! recovery and preview synchronization, on a paused clock.

use pagecraft_session::{CustomizationSession, SessionConfig, SessionState};
use pagecraft_test_utils::{init_tracing, sample_doc, sample_meta, RecordingSurface, ScriptedStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn open(
    store: &Arc<ScriptedStore>,
    surface: &Arc<RecordingSurface>,
) -> CustomizationSession {
    init_tracing();
    CustomizationSession::open(
        "page-1",
        sample_meta(),
        &sample_doc(),
        Arc::clone(store) as _,
        Arc::clone(surface) as _,
        SessionConfig::default(),
    )
}

/// Poll until the store has seen `expect` saves and the session is in
/// `state`. The paused clock auto-advances through debounce timers.
async fn settle(
    session: &CustomizationSession,
    store: &ScriptedStore,
    expect: usize,
    state: SessionState,
) {
    for _ in 0..10_000 {
        if store.save_count() >= expect && session.state().await == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "never settled: saves={} state={:?}",
        store.save_count(),
        session.state().await
    );
}

async fn wait_for_state(session: &CustomizationSession, state: SessionState) {
    for _ in 0..30_000 {
        if session.state().await == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("state {state:?} never reached, at {:?}", session.state().await);
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_coalesce_into_one_save() {
    let store = Arc::new(ScriptedStore::new());
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("One")).await.unwrap();
    session.apply_str("hero.title", json!("Two")).await.unwrap();
    session
        .apply_str("hero.subtitle", json!("Fresh"))
        .await
        .unwrap();

    settle(&session, &store, 1, SessionState::Idle).await;

    let saves = store.saves();
    assert_eq!(saves.len(), 1, "edits within the window must coalesce");
    let content = saves[0].content.as_value();
    assert_eq!(content["hero"]["title"], json!("Two"));
    assert_eq!(content["hero"]["subtitle"], json!("Fresh"));
    assert!(!session.is_dirty().await);
}

#[tokio::test(start_paused = true)]
async fn save_carries_full_payload() {
    let store = Arc::new(ScriptedStore::new());
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session
        .apply_str("colors.primary", json!("#dc2626"))
        .await
        .unwrap();
    settle(&session, &store, 1, SessionState::Idle).await;

    let saves = store.saves();
    assert_eq!(saves[0].slug, "spring-launch");
    assert_eq!(saves[0].template_id, "tpl-classic");
    // The whole document is saved, not just the touched section
    assert_eq!(
        saves[0].content.as_value()["hero"]["title"],
        json!("Spring Launch")
    );
    assert_eq!(
        saves[0].content.as_value()["colors"]["primary"],
        json!("#dc2626")
    );
}

#[tokio::test(start_paused = true)]
async fn preview_reloads_once_after_save_with_fresh_token() {
    let store = Arc::new(ScriptedStore::new());
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("New")).await.unwrap();
    settle(&session, &store, 1, SessionState::Idle).await;

    assert_eq!(surface.urls(), vec!["/l/spring-launch?t=1"]);
    assert_eq!(session.preview_token(), 1);

    session.apply_str("hero.title", json!("Newer")).await.unwrap();
    settle(&session, &store, 2, SessionState::Idle).await;

    assert_eq!(surface.reload_count(), 2);
    assert_eq!(surface.urls()[1], "/l/spring-launch?t=2");
}

#[tokio::test(start_paused = true)]
async fn edit_during_save_triggers_exactly_one_followup() {
    let store = Arc::new(ScriptedStore::new());
    store.delay_saves(Duration::from_millis(1_000));
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("First")).await.unwrap();
    wait_for_state(&session, SessionState::Saving).await;

    // Lands in the draft while the first save is in flight
    session
        .apply_str("hero.subtitle", json!("Second"))
        .await
        .unwrap();
    assert!(session.is_dirty().await);

    settle(&session, &store, 2, SessionState::Idle).await;

    let saves = store.saves();
    assert_eq!(saves.len(), 2, "deferred edits make exactly one follow-up save");
    assert_eq!(
        saves[1].content.as_value()["hero"]["subtitle"],
        json!("Second")
    );
    assert!(!session.is_dirty().await);
}

#[tokio::test(start_paused = true)]
async fn save_failure_keeps_draft_and_skips_preview() {
    let store = Arc::new(ScriptedStore::new());
    store.fail_next(1);
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("Kept")).await.unwrap();
    wait_for_state(&session, SessionState::SaveFailed).await;

    assert!(session.is_dirty().await, "failed save must not clear the draft");
    assert_eq!(store.save_count(), 0);
    assert_eq!(surface.reload_count(), 0, "no reload against unsaved state");
    assert_eq!(session.doc().await.as_value()["hero"]["title"], json!("Kept"));
}

#[tokio::test(start_paused = true)]
async fn next_edit_recovers_from_save_failure() {
    let store = Arc::new(ScriptedStore::new());
    store.fail_next(1);
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("Kept")).await.unwrap();
    wait_for_state(&session, SessionState::SaveFailed).await;

    session.apply_str("hero.cta_text", json!("Retry")).await.unwrap();
    settle(&session, &store, 1, SessionState::Idle).await;

    let saves = store.saves();
    assert_eq!(saves.len(), 1);
    // Both the pre-failure and post-failure edits persist together
    assert_eq!(saves[0].content.as_value()["hero"]["title"], json!("Kept"));
    assert_eq!(saves[0].content.as_value()["hero"]["cta_text"], json!("Retry"));
    assert_eq!(surface.reload_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn flush_retries_after_failure() {
    let store = Arc::new(ScriptedStore::new());
    store.fail_next(1);
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("Kept")).await.unwrap();
    wait_for_state(&session, SessionState::SaveFailed).await;

    assert!(session.flush().await.unwrap());
    assert_eq!(store.save_count(), 1);
    assert_eq!(session.state().await, SessionState::Idle);
    assert!(!session.is_dirty().await);
}

#[tokio::test(start_paused = true)]
async fn slow_store_hits_save_timeout() {
    let store = Arc::new(ScriptedStore::new());
    store.delay_saves(Duration::from_millis(60_000));
    let surface = Arc::new(RecordingSurface::new());
    let session = open(&store, &surface);

    session.apply_str("hero.title", json!("Stuck")).await.unwrap();
    wait_for_state(&session, SessionState::SaveFailed).await;

    assert!(session.is_dirty().await);
    assert_eq!(surface.reload_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn structural_edits_settle_before_content_window() {
    let store = Arc::new(ScriptedStore::new());
    let surface = Arc::new(RecordingSurface::new());
    let session = CustomizationSession::open(
        "page-1",
        sample_meta(),
        &sample_doc(),
        Arc::clone(&store) as _,
        Arc::clone(&surface) as _,
        SessionConfig::default()
            .with_structural_debounce(Duration::from_millis(100))
            .with_content_debounce(Duration::from_millis(100_000)),
    );

    session
        .apply_str("colors.primary", json!("#16a34a"))
        .await
        .unwrap();

    // Far below the content window; only the structural delay can fire this
    tokio::time::sleep(Duration::from_millis(500)).await;
    settle(&session, &store, 1, SessionState::Idle).await;
    assert_eq!(store.save_count(), 1);
}
