//! Applying a resolved theme to the document.

use swatch::{MODE_STORAGE_KEY, Mode, Role, ThemeConfig};
use tracing::debug;
use vanity::Document;

use crate::session::RenderSession;

/// Write a resolved config onto the document as CSS custom properties.
///
/// Every role is converted HEX -> HSL and set as its `--role` variable,
/// matching the format the critical style block painted, so the resolved
/// theme supersedes the approximate one property-for-property.
///
/// `user_initiated` gates the persistent side effects: the stored mode key
/// and the mobile-chrome `theme-color` meta tag are only written when the
/// user explicitly picked this mode. Automatic re-application (OS
/// preference flips, revisits) must not overwrite a stored choice.
///
/// The loading overlay is removed exactly once per session, via the
/// session latch.
pub fn apply_theme<D: Document>(
    doc: &D,
    session: &RenderSession,
    config: &ThemeConfig,
    mode: Mode,
    user_initiated: bool,
) {
    for (role, hex) in config.iter() {
        doc.set_css_property(role.css_var(), &hex.to_hsl().to_string());
    }
    doc.set_root_background(&config.color(Role::Background).to_string());

    if user_initiated {
        doc.storage_set(MODE_STORAGE_KEY, mode.as_str());
        doc.set_meta_theme_color(&config.color(Role::Background).to_string());
    }

    if session.mark_overlay_removed() {
        doc.remove_overlay();
    }
    session.record_applied(*config);

    debug!(
        theme.mode = %mode,
        theme.user_initiated = user_initiated,
        "Theme applied to document"
    );
}
