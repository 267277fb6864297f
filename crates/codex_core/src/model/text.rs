//! Source text domain model.
//!
//! # Invariants
//! - `uuid` is non-nil and `title` is never blank.
//! - Archived texts stay readable but are never offered as suggestions.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a source text.
pub type TextId = Uuid;

/// Kind of academic reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    #[default]
    Book,
    Article,
    Paper,
    Video,
    Other,
}

impl TextType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Article => "article",
            Self::Paper => "paper",
            Self::Video => "video",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "book" => Some(Self::Book),
            "article" => Some(Self::Article),
            "paper" => Some(Self::Paper),
            "video" => Some(Self::Video),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    NilUuid,
    BlankTitle,
}

impl Display for TextValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "text uuid must not be nil"),
            Self::BlankTitle => write!(f, "text title must not be blank"),
        }
    }
}

impl Error for TextValidationError {}

/// Academic reference that atoms may cite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub uuid: TextId,
    pub title: String,
    /// Free-form author string, e.g. `"Jean Baudrillard"`.
    pub author: String,
    #[serde(rename = "type")]
    pub kind: TextType,
    pub is_archived: bool,
}

impl Text {
    /// Creates an active text with a generated stable ID.
    pub fn new(kind: TextType, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            author: author.into(),
            kind,
            is_archived: false,
        }
    }

    pub fn validate(&self) -> Result<(), TextValidationError> {
        if self.uuid.is_nil() {
            return Err(TextValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(TextValidationError::BlankTitle);
        }
        Ok(())
    }
}
