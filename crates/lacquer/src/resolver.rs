//! Async reconciliation of the critical paint against the persisted theme.

use std::time::Duration;

use swatch::{CustomTheme, Mode, ModePreference, ThemeConfig, default_theme, select_active};
use tokio::time::timeout;
use tracing::{info, warn};
use vanity::Document;

use crate::applier::apply_theme;
use crate::error::StoreError;
use crate::session::{RenderSession, ResolverState};
use crate::store::ThemeStore;

/// Default wall-clock limit for one store fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// What one resolution call did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// A persisted active theme was applied.
    Applied,
    /// The default table was applied (nothing persisted, or a fault).
    FallenBack,
    /// A newer request started mid-flight; the document was not touched.
    Superseded,
}

/// Resolves the persisted active theme and paints it over the critical
/// approximation.
///
/// Re-entrant: every call bumps the session sequence, and only the call
/// holding the latest sequence after its fetch returns may write to the
/// document. Stale responses report [`ResolveOutcome::Superseded`] and do
/// nothing, so rapid mode toggles settle on the last one.
#[derive(Debug)]
pub struct ThemeResolver<'a, S, D> {
    store: &'a S,
    doc: &'a D,
    session: &'a RenderSession,
    fetch_timeout: Duration,
}

impl<'a, S: ThemeStore, D: Document> ThemeResolver<'a, S, D> {
    pub fn new(store: &'a S, doc: &'a D, session: &'a RenderSession) -> Self {
        Self {
            store,
            doc,
            session,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Override the per-fetch timeout (mainly for tests).
    pub fn with_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Resolve for the session's current preference, using the OS signal
    /// to settle `System`. Never user-initiated by definition.
    pub async fn resolve_current(&self) -> ResolveOutcome {
        let mode = self.session.preference().resolve(self.doc.prefers_dark());
        self.resolve_active_theme(mode, false).await
    }

    /// Record a user's explicit mode choice and resolve for it.
    pub async fn set_mode(&self, preference: ModePreference) -> ResolveOutcome {
        self.session.set_preference(preference);
        let mode = preference.resolve(self.doc.prefers_dark());
        self.resolve_active_theme(mode, true).await
    }

    /// Resolve the active theme for `mode` and apply it.
    ///
    /// Any failure along the way (timeout, transport, payload, a winner
    /// with no config for this mode) lands on the default table; the user
    /// always ends with a coherent theme.
    pub async fn resolve_active_theme(&self, mode: Mode, user_initiated: bool) -> ResolveOutcome {
        let seq = self.session.begin_request();

        let fetched = timeout(self.fetch_timeout, self.store.active_themes(mode)).await;

        // A later call owns the document now; the state fields are its.
        if !self.session.is_current(seq) {
            info!(theme.mode = %mode, theme.seq = seq, "Resolution superseded mid-flight");
            return ResolveOutcome::Superseded;
        }

        let config = match fetched {
            Err(_) => {
                warn!(
                    theme.mode = %mode,
                    timeout_secs = self.fetch_timeout.as_secs(),
                    "Theme fetch timed out; using default theme"
                );
                None
            }
            Ok(Err(StoreError::NotFound(_))) => {
                info!(theme.mode = %mode, "No active theme persisted; using default theme");
                None
            }
            Ok(Err(err)) => {
                warn!(theme.mode = %mode, error = %err, "Theme fetch failed; using default theme");
                None
            }
            Ok(Ok(records)) => self.pick_config(records, mode),
        };

        match config {
            Some(config) => {
                apply_theme(self.doc, self.session, &config, mode, user_initiated);
                self.session.set_state(ResolverState::Applied);
                ResolveOutcome::Applied
            }
            None => {
                apply_theme(self.doc, self.session, default_theme(mode), mode, user_initiated);
                self.session.set_state(ResolverState::FallenBack);
                ResolveOutcome::FallenBack
            }
        }
    }

    fn pick_config(&self, records: Vec<CustomTheme>, mode: Mode) -> Option<ThemeConfig> {
        let winner = select_active(records, mode)?;
        match winner.config_for(mode) {
            Some(config) => Some(*config),
            None => {
                warn!(
                    theme.id = winner.id,
                    theme.mode = %mode,
                    "Active record has no config for this mode; using default theme"
                );
                None
            }
        }
    }
}
