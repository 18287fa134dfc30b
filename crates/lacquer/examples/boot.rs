//! Full boot sequence against an in-memory document: critical paint,
//! async resolution, then a user-initiated mode change.
//!
//! Run with `cargo run -p lacquer --example boot`.

use lacquer::{RenderSession, StaticThemeStore, ThemeResolver};
use primer::CriticalInjector;
use swatch::{ModePreference, Role};
use vanity::{Document, MemoryDocument};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let doc = MemoryDocument::with_prefers_dark(true);

    // 1. Synchronous critical paint.
    let mode = CriticalInjector::new("Ledger").inject(&doc);
    println!("critical paint: {mode} (overlay up: {})", doc.has_overlay());

    // 2. Async resolution. Nothing persisted here, so the default table
    //    lands and the overlay comes down.
    let store = StaticThemeStore::not_found();
    let session = RenderSession::new();
    let resolver = ThemeResolver::new(&store, &doc, &session);

    let outcome = resolver.resolve_current().await;
    println!(
        "resolved: {outcome:?}, --background = {}",
        doc.css_property(Role::Background.css_var()).unwrap_or_default()
    );

    // 3. User flips to light mode; this one persists.
    resolver.set_mode(ModePreference::Light).await;
    println!(
        "after mode change: --background = {}, stored mode = {:?}",
        doc.css_property(Role::Background.css_var()).unwrap_or_default(),
        doc.storage_get(swatch::MODE_STORAGE_KEY)
    );

    Ok(())
}
