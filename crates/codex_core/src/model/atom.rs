//! Atom domain model.
//!
//! # Responsibility
//! - Define the canonical student-authored knowledge unit.
//! - Provide visibility helpers used by suggestion candidate filtering.
//!
//! # Invariants
//! - `uuid` is stable, non-nil and never reused for another atom.
//! - `title` is never blank.
//! - `status` is owned by the moderation pipeline; suggestion code only reads it.

use crate::model::text::TextId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every atom.
pub type AtomId = Uuid;

/// Category tag chosen by the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomType {
    /// A claim or thought of the author.
    Idea,
    /// An open question.
    Question,
    /// Verbatim excerpt from a source text.
    Quote,
    /// Connection or conclusion drawn from other atoms.
    Insight,
}

impl AtomType {
    /// Storage/wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Question => "question",
            Self::Quote => "quote",
            Self::Insight => "insight",
        }
    }

    /// Parses a storage/wire name. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "idea" => Some(Self::Idea),
            "question" => Some(Self::Question),
            "quote" => Some(Self::Quote),
            "insight" => Some(Self::Insight),
            _ => None,
        }
    }
}

/// Moderation state assigned by the external review pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Submitted, not yet reviewed.
    #[default]
    Pending,
    /// Accepted by review.
    Approved,
    /// Refused by review. Never shown to other students.
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Validation errors for atom invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomValidationError {
    NilUuid,
    BlankTitle,
}

impl Display for AtomValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "atom uuid must not be nil"),
            Self::BlankTitle => write!(f, "atom title must not be blank"),
        }
    }
}

impl Error for AtomValidationError {}

/// Canonical atom record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AtomWire")]
pub struct Atom {
    /// Stable global ID used for linking and auditing.
    pub uuid: AtomId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: AtomType,
    pub title: String,
    /// Free-form body text.
    pub body: String,
    /// Source text this atom cites, if any.
    pub text_uuid: Option<TextId>,
    pub status: ModerationStatus,
    /// Hidden by a teacher, independent of moderation.
    pub is_hidden: bool,
}

#[derive(Deserialize)]
struct AtomWire {
    uuid: AtomId,
    #[serde(rename = "type")]
    kind: AtomType,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    text_uuid: Option<TextId>,
    #[serde(default)]
    status: ModerationStatus,
    #[serde(default)]
    is_hidden: bool,
}

impl TryFrom<AtomWire> for Atom {
    type Error = AtomValidationError;

    fn try_from(wire: AtomWire) -> Result<Self, Self::Error> {
        let atom = Self {
            uuid: wire.uuid,
            kind: wire.kind,
            title: wire.title,
            body: wire.body,
            text_uuid: wire.text_uuid,
            status: wire.status,
            is_hidden: wire.is_hidden,
        };
        atom.validate()?;
        Ok(atom)
    }
}

impl Atom {
    /// Creates a new pending atom with a generated stable ID.
    pub fn new(kind: AtomType, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
            title: title.into(),
            body: body.into(),
            text_uuid: None,
            status: ModerationStatus::Pending,
            is_hidden: false,
        }
    }

    /// Creates a new atom with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: AtomId,
        kind: AtomType,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, AtomValidationError> {
        let mut atom = Self::new(kind, title, body);
        atom.uuid = uuid;
        atom.validate()?;
        Ok(atom)
    }

    /// Sets the cited source text.
    pub fn citing(mut self, text_uuid: TextId) -> Self {
        self.text_uuid = Some(text_uuid);
        self
    }

    /// Checks identity and title invariants.
    pub fn validate(&self) -> Result<(), AtomValidationError> {
        if self.uuid.is_nil() {
            return Err(AtomValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(AtomValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Whether other students may see this atom (and so receive it as a
    /// suggestion).
    pub fn is_visible(&self) -> bool {
        !self.is_hidden && self.status != ModerationStatus::Rejected
    }
}
