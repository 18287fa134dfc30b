//! Theme records, payload normalization, and active-theme selection.
//!
//! The backend serving `GET /themes/active/{mode}` has produced records with
//! two key spellings over time: camelCase (`lightConfig`, `isActiveDark`)
//! and a flattened all-lowercase form (`lightconfig`, `isactivedark`).
//! Config payloads additionally arrive either as JSON objects or as
//! JSON-encoded strings. [`normalize_record`] accepts all of those shapes
//! and produces one canonical [`CustomTheme`], failing loudly when a payload
//! matches none of them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ThemeConfig;

/// Browser-local storage key holding the last explicitly chosen mode.
///
/// Absent key means the mode derives from the OS preference.
pub const MODE_STORAGE_KEY: &str = "daub.mode";

/// A concrete light/dark rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// The lowercase wire form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(ParseError::FieldType {
                field: "mode",
                message: format!("expected \"light\" or \"dark\", got {other:?}"),
            }),
        }
    }
}

/// The user's mode preference, which may defer to the OS signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePreference {
    Light,
    Dark,
    /// Follow the OS/browser dark-mode preference.
    #[default]
    System,
}

impl ModePreference {
    /// Resolve to a concrete mode given the OS dark-mode signal.
    pub const fn resolve(self, prefers_dark: bool) -> Mode {
        match self {
            ModePreference::Light => Mode::Light,
            ModePreference::Dark => Mode::Dark,
            ModePreference::System => {
                if prefers_dark {
                    Mode::Dark
                } else {
                    Mode::Light
                }
            }
        }
    }
}

/// Error normalizing a backend theme payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The payload was not a JSON object.
    #[error("theme record is not a JSON object")]
    NotAnObject,
    /// A mandatory field was absent in every accepted key shape.
    #[error("theme record is missing required field {0:?}")]
    MissingField(&'static str),
    /// Neither a light nor a dark config key exists in any accepted shape.
    #[error("theme record carries no light or dark config in any accepted shape")]
    MissingConfigs,
    /// A field was present but held an unusable value.
    #[error("theme record field {field:?}: {message}")]
    FieldType {
        field: &'static str,
        message: String,
    },
}

/// A named theme record, owned globally or by one user.
///
/// `owner_id == None` means the record is global scope. The configs are
/// `Option` because normalization keeps a record alive when only one side
/// parsed; the resolver treats a missing side as grounds for fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub light_config: Option<ThemeConfig>,
    #[serde(default)]
    pub dark_config: Option<ThemeConfig>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_active_light: bool,
    #[serde(default)]
    pub is_active_dark: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CustomTheme {
    /// The config for a mode, when that side of the record parsed.
    pub const fn config_for(&self, mode: Mode) -> Option<&ThemeConfig> {
        match mode {
            Mode::Light => self.light_config.as_ref(),
            Mode::Dark => self.dark_config.as_ref(),
        }
    }

    /// Whether this record is flagged active for a mode.
    pub const fn is_active(&self, mode: Mode) -> bool {
        match mode {
            Mode::Light => self.is_active_light,
            Mode::Dark => self.is_active_dark,
        }
    }
}

/// Look up `camel` in the object, falling back to the flattened
/// all-lowercase spelling. Both accepted shapes are declared here, in one
/// place, rather than scattered existence checks.
fn field<'a>(obj: &'a serde_json::Map<String, Value>, camel: &str) -> Option<&'a Value> {
    if let Some(v) = obj.get(camel) {
        return Some(v);
    }
    obj.get(&camel.to_ascii_lowercase())
}

/// Booleans arrive as JSON bools or as relational-store 0/1 integers.
fn parse_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// Parse a config that may be a JSON object or a JSON-encoded string.
///
/// A config that fails to parse is dropped with a warning; the rest of the
/// record survives with whatever partial data exists.
fn parse_config(name: &'static str, value: Option<&Value>) -> Option<ThemeConfig> {
    match value? {
        Value::Null => None,
        Value::String(raw) => match serde_json::from_str::<ThemeConfig>(raw) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(theme.field = name, error = %err, "Dropping unparseable string-encoded config");
                None
            }
        },
        value @ Value::Object(_) => match serde_json::from_value::<ThemeConfig>(value.clone()) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(theme.field = name, error = %err, "Dropping unparseable config object");
                None
            }
        },
        other => {
            warn!(
                theme.field = name,
                payload.kind = json_kind(other),
                "Dropping config with unexpected JSON type"
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize one backend record into the canonical [`CustomTheme`] shape.
///
/// # Errors
///
/// Fails when the payload is not an object, has no usable id, or carries
/// no config key in any accepted spelling. Per-config parse failures are
/// not fatal; see [`parse_config`].
pub fn normalize_record(value: &Value) -> Result<CustomTheme, ParseError> {
    let obj = value.as_object().ok_or(ParseError::NotAnObject)?;

    let id = match field(obj, "id") {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| ParseError::FieldType {
            field: "id",
            message: format!("not an integer: {n}"),
        })?,
        Some(Value::String(s)) => s.parse::<i64>().map_err(|_| ParseError::FieldType {
            field: "id",
            message: format!("not an integer: {s:?}"),
        })?,
        Some(other) => {
            return Err(ParseError::FieldType {
                field: "id",
                message: format!("unexpected type {}", json_kind(other)),
            });
        }
        None => return Err(ParseError::MissingField("id")),
    };

    // Fail loudly when the payload matches no accepted config shape at all,
    // instead of quietly producing a record that can never be applied.
    if field(obj, "lightConfig").is_none() && field(obj, "darkConfig").is_none() {
        return Err(ParseError::MissingConfigs);
    }

    let name = field(obj, "name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let owner_id = field(obj, "userId").and_then(Value::as_i64);

    let created_at = field(obj, "createdAt")
        .and_then(Value::as_str)
        .and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(err) => {
                warn!(theme.id = id, error = %err, "Ignoring unparseable createdAt");
                None
            }
        });

    let record = CustomTheme {
        id,
        name,
        owner_id,
        light_config: parse_config("lightConfig", field(obj, "lightConfig")),
        dark_config: parse_config("darkConfig", field(obj, "darkConfig")),
        is_default: parse_flag(field(obj, "isDefault")),
        is_active_light: parse_flag(field(obj, "isActiveLight")),
        is_active_dark: parse_flag(field(obj, "isActiveDark")),
        created_at,
    };

    debug!(
        theme.id = record.id,
        theme.name = %record.name,
        theme.has_light = record.light_config.is_some(),
        theme.has_dark = record.dark_config.is_some(),
        "Normalized theme record"
    );
    Ok(record)
}

/// Pick the single record to apply when persisted data holds conflicting
/// active flags for one mode.
///
/// The persistence layer should keep at most one record active per scope
/// and mode, but races and manual edits have violated that. The winner is
/// deterministic: a default-flagged record first, then the lowest id.
pub fn select_active(mut records: Vec<CustomTheme>, mode: Mode) -> Option<CustomTheme> {
    records.retain(|record| record.is_active(mode));

    if records.len() > 1 {
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        warn!(
            theme.mode = %mode,
            theme.conflicting_ids = ?ids,
            "Multiple records active for one mode; picking deterministically"
        );
    }

    records.sort_by_key(|record| (!record.is_default, record.id));
    records.into_iter().next()
}
