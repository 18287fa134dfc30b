//! End-to-end pipeline tests: critical paint, async resolution, mode
//! changes, and supersession under concurrency.

use std::future::pending;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lacquer::{
    RenderSession, ResolveOutcome, ResolverState, StaticThemeStore, StoreError, ThemeResolver,
    ThemeStore,
};
use primer::{CRITICAL_STYLE_ID, CriticalInjector};
use swatch::{
    CustomTheme, DEFAULT_DARK, DEFAULT_LIGHT, MODE_STORAGE_KEY, Mode, ModePreference, Role,
    ThemeConfigPatch,
};
use tokio::sync::Notify;
use vanity::{Document, MemoryDocument};

fn custom_dark(id: i64) -> CustomTheme {
    let config = DEFAULT_DARK.merged(
        &ThemeConfigPatch::default().with(Role::Primary, "#ff0000".parse().unwrap()),
    );
    CustomTheme {
        id,
        name: format!("crimson-{id}"),
        owner_id: Some(1),
        light_config: None,
        dark_config: Some(config),
        is_default: false,
        is_active_light: false,
        is_active_dark: true,
        created_at: None,
    }
}

// ============================================================================
// Boot sequence
// ============================================================================

#[tokio::test]
async fn test_boot_paints_critical_then_resolves_persisted() {
    let doc = MemoryDocument::with_prefers_dark(true);

    // Synchronous critical paint before anything async runs.
    let mode = CriticalInjector::new("Ledger").inject(&doc);
    assert_eq!(mode, Mode::Dark);
    assert!(doc.has_overlay());
    assert!(doc.style_block(CRITICAL_STYLE_ID).is_some());

    let store = StaticThemeStore::with_records(vec![custom_dark(1)]);
    let session = RenderSession::new();
    let outcome = ThemeResolver::new(&store, &doc, &session)
        .resolve_current()
        .await;

    assert_eq!(outcome, ResolveOutcome::Applied);
    // The persisted primary supersedes the critical approximation.
    assert_eq!(
        doc.css_property(Role::Primary.css_var()).as_deref(),
        Some("0 100% 50%")
    );
    assert!(!doc.has_overlay());
    assert_eq!(doc.overlay_removals(), 1);
    // Automatic resolution persists nothing.
    assert!(doc.storage_get(MODE_STORAGE_KEY).is_none());
}

#[tokio::test]
async fn test_boot_with_empty_store_lands_on_default() {
    let doc = MemoryDocument::new();
    CriticalInjector::new("Ledger").inject(&doc);

    let store = StaticThemeStore::not_found();
    let session = RenderSession::new();
    let outcome = ThemeResolver::new(&store, &doc, &session)
        .resolve_current()
        .await;

    assert_eq!(outcome, ResolveOutcome::FallenBack);
    assert_eq!(session.state(), ResolverState::FallenBack);
    assert_eq!(
        doc.css_property(Role::Background.css_var()).as_deref(),
        Some("0 0% 100%")
    );
    // The overlay comes down even when nothing was persisted.
    assert!(!doc.has_overlay());
}

// ============================================================================
// Mode changes
// ============================================================================

#[tokio::test]
async fn test_mode_change_is_re_entrant() {
    let doc = MemoryDocument::with_prefers_dark(true);
    let store = StaticThemeStore::not_found();
    let session = RenderSession::new();
    let resolver = ThemeResolver::new(&store, &doc, &session);

    resolver.resolve_current().await;
    assert_eq!(
        doc.css_property(Role::Background.css_var()).as_deref(),
        Some("0 0% 6%")
    );

    resolver.set_mode(ModePreference::Light).await;
    assert_eq!(
        doc.css_property(Role::Background.css_var()).as_deref(),
        Some("0 0% 100%")
    );
    assert_eq!(doc.storage_get(MODE_STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(
        doc.meta_theme_color().as_deref(),
        Some(DEFAULT_LIGHT.background.to_string().as_str())
    );
}

#[tokio::test]
async fn test_repeated_mode_changes_remove_overlay_once() {
    let doc = MemoryDocument::new();
    doc.show_overlay("Ledger");
    let store = StaticThemeStore::not_found();
    let session = RenderSession::new();
    let resolver = ThemeResolver::new(&store, &doc, &session);

    resolver.set_mode(ModePreference::Dark).await;
    resolver.set_mode(ModePreference::Light).await;
    resolver.set_mode(ModePreference::Dark).await;

    assert_eq!(doc.overlay_removals(), 1);
    assert_eq!(doc.storage_get(MODE_STORAGE_KEY).as_deref(), Some("dark"));
}

// ============================================================================
// Conflicting persisted flags
// ============================================================================

#[tokio::test]
async fn test_conflicting_actives_resolve_deterministically() {
    let mut default_flagged = custom_dark(9);
    default_flagged.is_default = true;
    let store = StaticThemeStore::with_records(vec![custom_dark(2), default_flagged.clone()]);

    let doc = MemoryDocument::new();
    let session = RenderSession::new();
    let outcome = ThemeResolver::new(&store, &doc, &session)
        .resolve_active_theme(Mode::Dark, false)
        .await;

    assert_eq!(outcome, ResolveOutcome::Applied);
    assert_eq!(session.last_applied(), default_flagged.dark_config);
}

// ============================================================================
// Faults
// ============================================================================

/// Store whose first fetch hangs forever.
struct HangingStore {
    calls: AtomicU64,
}

impl ThemeStore for HangingStore {
    async fn active_themes(&self, _mode: Mode) -> Result<Vec<CustomTheme>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pending().await
    }
}

#[tokio::test]
async fn test_timeout_falls_back_to_default() {
    let store = HangingStore {
        calls: AtomicU64::new(0),
    };
    let doc = MemoryDocument::new();
    let session = RenderSession::new();
    let resolver =
        ThemeResolver::new(&store, &doc, &session).with_timeout(Duration::from_millis(20));

    let outcome = resolver.resolve_active_theme(Mode::Dark, false).await;
    assert_eq!(outcome, ResolveOutcome::FallenBack);
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        doc.css_property(Role::Background.css_var()).as_deref(),
        Some("0 0% 6%")
    );
}

#[tokio::test]
async fn test_transient_failure_then_recovery() {
    let store = StaticThemeStore::with_records(vec![custom_dark(1)]).then_failure("502 upstream");
    let doc = MemoryDocument::new();
    let session = RenderSession::new();
    let resolver = ThemeResolver::new(&store, &doc, &session);

    assert_eq!(
        resolver.resolve_active_theme(Mode::Dark, false).await,
        ResolveOutcome::FallenBack
    );
    assert_eq!(
        resolver.resolve_active_theme(Mode::Dark, false).await,
        ResolveOutcome::Applied
    );
    assert_eq!(session.state(), ResolverState::Applied);
}

// ============================================================================
// Supersession
// ============================================================================

/// Store whose first fetch blocks until released; later fetches answer
/// immediately.
struct GatedStore {
    gate: Notify,
    calls: AtomicU64,
    records: Vec<CustomTheme>,
}

impl GatedStore {
    fn new(records: Vec<CustomTheme>) -> Self {
        Self {
            gate: Notify::new(),
            calls: AtomicU64::new(0),
            records,
        }
    }
}

impl ThemeStore for GatedStore {
    async fn active_themes(&self, _mode: Mode) -> Result<Vec<CustomTheme>, StoreError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
        }
        Ok(self.records.clone())
    }
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let store = GatedStore::new(vec![custom_dark(1)]);
    let doc = MemoryDocument::new();
    doc.show_overlay("Ledger");
    let session = RenderSession::new();
    let resolver = ThemeResolver::new(&store, &doc, &session);

    // First call blocks in its fetch; second starts while it is in
    // flight, completes, then releases the first.
    let (stale, fresh) = tokio::join!(
        resolver.resolve_active_theme(Mode::Dark, false),
        async {
            let outcome = resolver.resolve_active_theme(Mode::Dark, true).await;
            store.gate.notify_one();
            outcome
        }
    );

    assert_eq!(fresh, ResolveOutcome::Applied);
    assert_eq!(stale, ResolveOutcome::Superseded);
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    // Only the fresh call touched the document.
    assert_eq!(doc.overlay_removals(), 1);
    assert_eq!(doc.storage_get(MODE_STORAGE_KEY).as_deref(), Some("dark"));
    assert_eq!(session.state(), ResolverState::Applied);
}
