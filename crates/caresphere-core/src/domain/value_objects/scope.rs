//! Sender setting scope value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The granularity level at which a sender setting row is stored.
///
/// Rows are unique per `(scope, reference_id)`; only the GLOBAL scope has a
/// null reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    /// Per-user override, referenced by a user id.
    User,
    /// Per-organization override, referenced by an organization id.
    Organization,
    /// The single installation-wide row.
    Global,
}

impl SettingScope {
    /// Whether this scope requires a reference id.
    #[must_use]
    pub const fn requires_reference(&self) -> bool {
        !matches!(self, Self::Global)
    }

    /// Returns the database representation.
    #[must_use]
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Organization => "ORGANIZATION",
            Self::Global => "GLOBAL",
        }
    }

    /// Parses a scope from a string (either case).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(Self::User),
            "ORGANIZATION" => Some(Self::Organization),
            "GLOBAL" => Some(Self::Global),
            _ => None,
        }
    }
}

impl fmt::Display for SettingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Organization => write!(f, "organization"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// The scope a sender resolution actually came from.
///
/// Unlike [`SettingScope`] this includes the terminal `Env` level, reached
/// when no stored row matched and the static configuration defaults were
/// used wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ResolvedScope {
    User,
    Organization,
    Global,
    Env,
}

impl ResolvedScope {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Organization => "organization",
            Self::Global => "global",
            Self::Env => "env",
        }
    }
}

impl From<SettingScope> for ResolvedScope {
    fn from(scope: SettingScope) -> Self {
        match scope {
            SettingScope::User => Self::User,
            SettingScope::Organization => Self::Organization,
            SettingScope::Global => Self::Global,
        }
    }
}

impl fmt::Display for ResolvedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!(SettingScope::parse("USER"), Some(SettingScope::User));
        assert_eq!(SettingScope::parse("organization"), Some(SettingScope::Organization));
        assert_eq!(SettingScope::parse("Global"), Some(SettingScope::Global));
        assert_eq!(SettingScope::parse("tenant"), None);
    }

    #[test]
    fn test_scope_db_roundtrip() {
        for scope in [SettingScope::User, SettingScope::Organization, SettingScope::Global] {
            assert_eq!(SettingScope::parse(scope.as_db_str()), Some(scope));
        }
    }

    #[test]
    fn test_requires_reference() {
        assert!(SettingScope::User.requires_reference());
        assert!(SettingScope::Organization.requires_reference());
        assert!(!SettingScope::Global.requires_reference());
    }

    #[test]
    fn test_resolved_scope_from_setting_scope() {
        assert_eq!(ResolvedScope::from(SettingScope::User), ResolvedScope::User);
        assert_eq!(ResolvedScope::from(SettingScope::Global), ResolvedScope::Global);
    }

    #[test]
    fn test_resolved_scope_serializes_lowercase() {
        let json = serde_json::to_string(&ResolvedScope::Env).unwrap();
        assert_eq!(json, "\"env\"");
    }
}
