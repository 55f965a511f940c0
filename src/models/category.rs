//! Category model
//!
//! Categories are pure tags: expenses and recurring charges reference them by
//! id for grouping, and nothing in the engine branches on anything but the id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Color used when none is given
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";

/// An expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    /// Optional icon name
    #[serde(default)]
    pub icon: Option<String>,

    /// Notes about this category
    #[serde(default)]
    pub description: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl Category {
    /// Create a new category with the default color
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: default_color(),
            icon: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a category with a color and icon
    pub fn styled(name: impl Into<String>, color: impl Into<String>, icon: Option<&str>) -> Self {
        let mut category = Self::new(name);
        category.color = color.into();
        category.icon = icon.map(str::to_string);
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        let hex = self.color.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Starter categories created by `init`: (name, color, icon)
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Housing", "#3B82F6", "home"),
    ("Groceries", "#10B981", "shopping-cart"),
    ("Transport", "#F59E0B", "car"),
    ("Insurance", "#8B5CF6", "shield"),
    ("Subscriptions", "#EC4899", "tv"),
    ("Leisure", "#EF4444", "music"),
    ("Health", "#14B8A6", "heart"),
    ("Miscellaneous", "#6B7280", "tag"),
];

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Category color '{}' is not a #RRGGBB value", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
