//! Hardcoded fallback palettes.
//!
//! These are the palettes painted when no persisted theme is available:
//! by the critical injector before any network work starts, and by the
//! resolver when the theme store has nothing for the requested mode.
//!
//! The HSL tables are pre-converted so the critical paint path has no
//! dependency on the converter; a test pins every entry to the converter's
//! output.

use pigment::Hex;

use crate::config::{Role, ThemeConfig};
use crate::record::Mode;

/// Fallback palette for light mode.
pub const DEFAULT_LIGHT: ThemeConfig = ThemeConfig {
    background: Hex::new(0xff, 0xff, 0xff),
    foreground: Hex::new(0x09, 0x09, 0x0b),
    primary: Hex::new(0x7c, 0x3a, 0xed),
    primary_foreground: Hex::new(0xfa, 0xfa, 0xfa),
    secondary: Hex::new(0xf4, 0xf4, 0xf5),
    secondary_foreground: Hex::new(0x18, 0x18, 0x1b),
    muted: Hex::new(0xf4, 0xf4, 0xf5),
    muted_foreground: Hex::new(0x71, 0x71, 0x7a),
    accent: Hex::new(0xf4, 0xf4, 0xf5),
    accent_foreground: Hex::new(0x18, 0x18, 0x1b),
    border: Hex::new(0xe4, 0xe4, 0xe7),
    card: Hex::new(0xff, 0xff, 0xff),
    card_foreground: Hex::new(0x09, 0x09, 0x0b),
    destructive: Hex::new(0xef, 0x44, 0x44),
    destructive_foreground: Hex::new(0xfa, 0xfa, 0xfa),
};

/// Fallback palette for dark mode.
pub const DEFAULT_DARK: ThemeConfig = ThemeConfig {
    background: Hex::new(0x0f, 0x0f, 0x0f),
    foreground: Hex::new(0xfa, 0xfa, 0xfa),
    primary: Hex::new(0x7c, 0x3a, 0xed),
    primary_foreground: Hex::new(0xfa, 0xfa, 0xfa),
    secondary: Hex::new(0x27, 0x27, 0x2a),
    secondary_foreground: Hex::new(0xfa, 0xfa, 0xfa),
    muted: Hex::new(0x27, 0x27, 0x2a),
    muted_foreground: Hex::new(0xa1, 0xa1, 0xaa),
    accent: Hex::new(0x27, 0x27, 0x2a),
    accent_foreground: Hex::new(0xfa, 0xfa, 0xfa),
    border: Hex::new(0x27, 0x27, 0x2a),
    card: Hex::new(0x18, 0x18, 0x1b),
    card_foreground: Hex::new(0xfa, 0xfa, 0xfa),
    destructive: Hex::new(0x7f, 0x1d, 0x1d),
    destructive_foreground: Hex::new(0xfa, 0xfa, 0xfa),
};

/// Pre-converted HSL strings for [`DEFAULT_LIGHT`], in role order.
pub const DEFAULT_LIGHT_HSL: [(Role, &str); 15] = [
    (Role::Background, "0 0% 100%"),
    (Role::Foreground, "240 10% 4%"),
    (Role::Primary, "262 83% 58%"),
    (Role::PrimaryForeground, "0 0% 98%"),
    (Role::Secondary, "240 5% 96%"),
    (Role::SecondaryForeground, "240 6% 10%"),
    (Role::Muted, "240 5% 96%"),
    (Role::MutedForeground, "240 4% 46%"),
    (Role::Accent, "240 5% 96%"),
    (Role::AccentForeground, "240 6% 10%"),
    (Role::Border, "240 6% 90%"),
    (Role::Card, "0 0% 100%"),
    (Role::CardForeground, "240 10% 4%"),
    (Role::Destructive, "0 84% 60%"),
    (Role::DestructiveForeground, "0 0% 98%"),
];

/// Pre-converted HSL strings for [`DEFAULT_DARK`], in role order.
pub const DEFAULT_DARK_HSL: [(Role, &str); 15] = [
    (Role::Background, "0 0% 6%"),
    (Role::Foreground, "0 0% 98%"),
    (Role::Primary, "262 83% 58%"),
    (Role::PrimaryForeground, "0 0% 98%"),
    (Role::Secondary, "240 4% 16%"),
    (Role::SecondaryForeground, "0 0% 98%"),
    (Role::Muted, "240 4% 16%"),
    (Role::MutedForeground, "240 5% 65%"),
    (Role::Accent, "240 4% 16%"),
    (Role::AccentForeground, "0 0% 98%"),
    (Role::Border, "240 4% 16%"),
    (Role::Card, "240 6% 10%"),
    (Role::CardForeground, "0 0% 98%"),
    (Role::Destructive, "0 63% 31%"),
    (Role::DestructiveForeground, "0 0% 98%"),
];

/// The fallback palette for a mode.
pub const fn default_theme(mode: Mode) -> &'static ThemeConfig {
    match mode {
        Mode::Light => &DEFAULT_LIGHT,
        Mode::Dark => &DEFAULT_DARK,
    }
}

/// The pre-converted HSL table for a mode.
pub const fn default_hsl(mode: Mode) -> &'static [(Role, &'static str); 15] {
    match mode {
        Mode::Light => &DEFAULT_LIGHT_HSL,
        Mode::Dark => &DEFAULT_DARK_HSL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigment::{contrast_ratio, WCAG_AA_NORMAL_TEXT};

    #[test]
    fn test_hsl_tables_match_converter_output() {
        for (config, table) in [
            (&DEFAULT_LIGHT, &DEFAULT_LIGHT_HSL),
            (&DEFAULT_DARK, &DEFAULT_DARK_HSL),
        ] {
            for (role, expected) in table {
                let actual = config.color(*role).to_hsl().to_string();
                assert_eq!(&actual, expected, "stale HSL entry for {role}");
            }
        }
    }

    #[test]
    fn test_hsl_tables_cover_every_role_in_order() {
        for table in [&DEFAULT_LIGHT_HSL, &DEFAULT_DARK_HSL] {
            let roles: Vec<Role> = table.iter().map(|(role, _)| *role).collect();
            assert_eq!(roles, Role::ALL.to_vec());
        }
    }

    #[test]
    fn test_default_text_is_readable() {
        for config in [&DEFAULT_LIGHT, &DEFAULT_DARK] {
            let ratio = contrast_ratio(&config.background, &config.foreground);
            assert!(
                ratio >= WCAG_AA_NORMAL_TEXT,
                "foreground/background contrast too low: {ratio}"
            );
        }
    }
}
