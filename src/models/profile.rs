use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar color assigned when none is chosen
pub const DEFAULT_AVATAR_COLOR: &str = "#6366f1";

/// Palette offered when creating a profile
pub const AVATAR_COLORS: [&str; 8] = [
    "#6366f1", // Indigo
    "#f43f5e", // Rose
    "#10b981", // Emerald
    "#f59e0b", // Amber
    "#8b5cf6", // Purple
    "#3b82f6", // Blue
    "#ec4899", // Pink
    "#14b8a6", // Teal
];

/// A local profile, selectable without credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default = "default_avatar_color")]
    pub avatar_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub avatar_color: String,
}

fn default_avatar_color() -> String {
    DEFAULT_AVATAR_COLOR.to_string()
}

impl NewProfile {
    pub fn new(name: impl Into<String>, avatar_color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_color: avatar_color.into(),
        }
    }
}
