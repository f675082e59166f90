//! Group and group-kind types for the settings pages
//!
//! A group is a named administrative collection of resources scoped to a
//! kind. Each settings page manages exactly one kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of the groups managed by a settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Groups of monitored PostgreSQL instances
    Instance,
    /// Groups of user roles
    Role,
}

impl GroupKind {
    /// Stable lowercase identifier used in routes, URLs and storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Role => "role",
        }
    }

    /// Heading shown on the settings page for this kind
    pub fn page_title(&self) -> &'static str {
        match self {
            Self::Instance => "Instance groups",
            Self::Role => "Role groups",
        }
    }

    /// What the members of a group of this kind are
    pub fn member_noun(&self) -> &'static str {
        match self {
            Self::Instance => "instances",
            Self::Role => "roles",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown group kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group kind: {0}")]
pub struct UnknownGroupKind(pub String);

impl FromStr for GroupKind {
    type Err = UnknownGroupKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instance" => Ok(Self::Instance),
            "role" => Ok(Self::Role),
            other => Err(UnknownGroupKind(other.to_string())),
        }
    }
}

/// A named administrative collection of instances or roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name, unique within its kind
    pub name: String,

    /// Free-form description shown in the groups table
    #[serde(default)]
    pub description: Option<String>,

    /// Member identifiers: `host:port` addresses for instance groups,
    /// role names for role groups
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [GroupKind::Instance, GroupKind::Role] {
            let parsed: GroupKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("environment".parse::<GroupKind>().is_err());
    }

    #[test]
    fn test_kind_wire_form_is_lowercase() {
        let json = serde_json::to_string(&GroupKind::Instance).unwrap();
        assert_eq!(json, "\"instance\"");
    }

    #[test]
    fn test_group_defaults() {
        let group: Group = serde_json::from_str(r#"{"name":"prod"}"#).unwrap();
        assert_eq!(group.name, "prod");
        assert_eq!(group.description, None);
        assert_eq!(group.member_count(), 0);
    }
}
