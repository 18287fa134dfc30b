//! Semantic color roles and the theme config value object.
//!
//! A [`ThemeConfig`] maps every [`Role`] to a validated HEX color. The role
//! set is closed: a config missing a role fails deserialization instead of
//! being silently coerced to black.

use std::fmt;

use pigment::Hex;
use serde::{Deserialize, Serialize};

/// The closed set of semantic color roles.
///
/// Wire names are camelCase (`primaryForeground`); CSS custom property
/// names are kebab-case with a leading `--` (`--primary-foreground`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Main page background.
    Background,
    /// Main text color.
    Foreground,
    /// Primary brand color for actions and emphasis.
    Primary,
    /// Text drawn on primary surfaces.
    PrimaryForeground,
    /// Secondary surfaces and actions.
    Secondary,
    /// Text drawn on secondary surfaces.
    SecondaryForeground,
    /// Muted surfaces (wells, disabled areas).
    Muted,
    /// Text drawn on muted surfaces.
    MutedForeground,
    /// Accent/highlight surfaces.
    Accent,
    /// Text drawn on accent surfaces.
    AccentForeground,
    /// Border and divider color.
    Border,
    /// Elevated card surfaces.
    Card,
    /// Text drawn on card surfaces.
    CardForeground,
    /// Destructive/danger actions.
    Destructive,
    /// Text drawn on destructive surfaces.
    DestructiveForeground,
}

impl Role {
    /// Every role, in canonical order.
    pub const ALL: [Role; 15] = [
        Role::Background,
        Role::Foreground,
        Role::Primary,
        Role::PrimaryForeground,
        Role::Secondary,
        Role::SecondaryForeground,
        Role::Muted,
        Role::MutedForeground,
        Role::Accent,
        Role::AccentForeground,
        Role::Border,
        Role::Card,
        Role::CardForeground,
        Role::Destructive,
        Role::DestructiveForeground,
    ];

    /// The camelCase field name used on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::Foreground => "foreground",
            Role::Primary => "primary",
            Role::PrimaryForeground => "primaryForeground",
            Role::Secondary => "secondary",
            Role::SecondaryForeground => "secondaryForeground",
            Role::Muted => "muted",
            Role::MutedForeground => "mutedForeground",
            Role::Accent => "accent",
            Role::AccentForeground => "accentForeground",
            Role::Border => "border",
            Role::Card => "card",
            Role::CardForeground => "cardForeground",
            Role::Destructive => "destructive",
            Role::DestructiveForeground => "destructiveForeground",
        }
    }

    /// The CSS custom property name this role is painted to.
    pub const fn css_var(self) -> &'static str {
        match self {
            Role::Background => "--background",
            Role::Foreground => "--foreground",
            Role::Primary => "--primary",
            Role::PrimaryForeground => "--primary-foreground",
            Role::Secondary => "--secondary",
            Role::SecondaryForeground => "--secondary-foreground",
            Role::Muted => "--muted",
            Role::MutedForeground => "--muted-foreground",
            Role::Accent => "--accent",
            Role::AccentForeground => "--accent-foreground",
            Role::Border => "--border",
            Role::Card => "--card",
            Role::CardForeground => "--card-foreground",
            Role::Destructive => "--destructive",
            Role::DestructiveForeground => "--destructive-foreground",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A complete mapping from semantic roles to HEX colors.
///
/// Every field is mandatory and validated on deserialization; malformed or
/// missing values are rejected, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub background: Hex,
    pub foreground: Hex,
    pub primary: Hex,
    pub primary_foreground: Hex,
    pub secondary: Hex,
    pub secondary_foreground: Hex,
    pub muted: Hex,
    pub muted_foreground: Hex,
    pub accent: Hex,
    pub accent_foreground: Hex,
    pub border: Hex,
    pub card: Hex,
    pub card_foreground: Hex,
    pub destructive: Hex,
    pub destructive_foreground: Hex,
}

impl ThemeConfig {
    /// The color for a role.
    pub const fn color(&self, role: Role) -> Hex {
        match role {
            Role::Background => self.background,
            Role::Foreground => self.foreground,
            Role::Primary => self.primary,
            Role::PrimaryForeground => self.primary_foreground,
            Role::Secondary => self.secondary,
            Role::SecondaryForeground => self.secondary_foreground,
            Role::Muted => self.muted,
            Role::MutedForeground => self.muted_foreground,
            Role::Accent => self.accent,
            Role::AccentForeground => self.accent_foreground,
            Role::Border => self.border,
            Role::Card => self.card,
            Role::CardForeground => self.card_foreground,
            Role::Destructive => self.destructive,
            Role::DestructiveForeground => self.destructive_foreground,
        }
    }

    /// Replace the color for a role.
    pub fn set_color(&mut self, role: Role, hex: Hex) {
        match role {
            Role::Background => self.background = hex,
            Role::Foreground => self.foreground = hex,
            Role::Primary => self.primary = hex,
            Role::PrimaryForeground => self.primary_foreground = hex,
            Role::Secondary => self.secondary = hex,
            Role::SecondaryForeground => self.secondary_foreground = hex,
            Role::Muted => self.muted = hex,
            Role::MutedForeground => self.muted_foreground = hex,
            Role::Accent => self.accent = hex,
            Role::AccentForeground => self.accent_foreground = hex,
            Role::Border => self.border = hex,
            Role::Card => self.card = hex,
            Role::CardForeground => self.card_foreground = hex,
            Role::Destructive => self.destructive = hex,
            Role::DestructiveForeground => self.destructive_foreground = hex,
        }
    }

    /// Iterate all roles with their colors, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Hex)> + '_ {
        Role::ALL.iter().map(move |role| (*role, self.color(*role)))
    }

    /// Apply a partial patch: only roles the patch supplies change.
    #[must_use]
    pub fn merged(&self, patch: &ThemeConfigPatch) -> Self {
        let mut out = *self;
        for role in Role::ALL {
            if let Some(hex) = patch.color(role) {
                out.set_color(role, hex);
            }
        }
        out
    }
}

/// A partial theme config for merge-style mutation.
///
/// Every field is optional; absent roles leave the base config untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfigPatch {
    pub background: Option<Hex>,
    pub foreground: Option<Hex>,
    pub primary: Option<Hex>,
    pub primary_foreground: Option<Hex>,
    pub secondary: Option<Hex>,
    pub secondary_foreground: Option<Hex>,
    pub muted: Option<Hex>,
    pub muted_foreground: Option<Hex>,
    pub accent: Option<Hex>,
    pub accent_foreground: Option<Hex>,
    pub border: Option<Hex>,
    pub card: Option<Hex>,
    pub card_foreground: Option<Hex>,
    pub destructive: Option<Hex>,
    pub destructive_foreground: Option<Hex>,
}

impl ThemeConfigPatch {
    /// The patched color for a role, if supplied.
    pub const fn color(&self, role: Role) -> Option<Hex> {
        match role {
            Role::Background => self.background,
            Role::Foreground => self.foreground,
            Role::Primary => self.primary,
            Role::PrimaryForeground => self.primary_foreground,
            Role::Secondary => self.secondary,
            Role::SecondaryForeground => self.secondary_foreground,
            Role::Muted => self.muted,
            Role::MutedForeground => self.muted_foreground,
            Role::Accent => self.accent,
            Role::AccentForeground => self.accent_foreground,
            Role::Border => self.border,
            Role::Card => self.card,
            Role::CardForeground => self.card_foreground,
            Role::Destructive => self.destructive,
            Role::DestructiveForeground => self.destructive_foreground,
        }
    }

    /// Set one role on the patch (builder style).
    #[must_use]
    pub fn with(mut self, role: Role, hex: Hex) -> Self {
        match role {
            Role::Background => self.background = Some(hex),
            Role::Foreground => self.foreground = Some(hex),
            Role::Primary => self.primary = Some(hex),
            Role::PrimaryForeground => self.primary_foreground = Some(hex),
            Role::Secondary => self.secondary = Some(hex),
            Role::SecondaryForeground => self.secondary_foreground = Some(hex),
            Role::Muted => self.muted = Some(hex),
            Role::MutedForeground => self.muted_foreground = Some(hex),
            Role::Accent => self.accent = Some(hex),
            Role::AccentForeground => self.accent_foreground = Some(hex),
            Role::Border => self.border = Some(hex),
            Role::Card => self.card = Some(hex),
            Role::CardForeground => self.card_foreground = Some(hex),
            Role::Destructive => self.destructive = Some(hex),
            Role::DestructiveForeground => self.destructive_foreground = Some(hex),
        }
        self
    }
}
