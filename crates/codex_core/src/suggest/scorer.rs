//! Heuristic relevance scoring between a draft and one candidate.
//!
//! # Responsibility
//! - Turn title/body/type/source overlap into a weighted score.
//! - Explain every non-zero contribution with a [`MatchReason`].
//!
//! # Invariants
//! - With non-negative weights the score is never negative.
//! - Reasons are emitted in rule order: phrase, title words, source,
//!   category, keywords.
//! - Source and category rules apply to note candidates only.

use crate::model::atom::{Atom, AtomType};
use crate::model::text::{Text, TextId};
use crate::suggest::keywords::{keyword_set, unique_keywords};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Input title must be longer than this (in chars) for the phrase rule.
const MIN_PHRASE_CHARS: usize = 3;
/// Both tokens must be longer than this (in chars) for a partial match.
const MIN_PARTIAL_TOKEN_CHARS: usize = 3;

/// Per-signal weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub exact_phrase: f64,
    pub title_word_exact: f64,
    pub title_word_partial: f64,
    pub same_source: f64,
    pub same_category: f64,
    /// Per keyword shared with a note body.
    pub note_keyword: f64,
    /// Per keyword shared with a text's author string.
    pub text_author_keyword: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_phrase: 10.0,
            title_word_exact: 3.0,
            title_word_partial: 1.0,
            same_source: 2.0,
            same_category: 1.0,
            note_keyword: 0.5,
            text_author_keyword: 1.5,
        }
    }
}

impl ScoringWeights {
    /// Named view over every weight, used for validation and display.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("exact_phrase", self.exact_phrase),
            ("title_word_exact", self.title_word_exact),
            ("title_word_partial", self.title_word_partial),
            ("same_source", self.same_source),
            ("same_category", self.same_category),
            ("note_keyword", self.note_keyword),
            ("text_author_keyword", self.text_author_keyword),
        ]
    }
}

/// What the caller is writing (or the atom being looked at).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "type")]
    pub kind: Option<AtomType>,
    #[serde(default)]
    pub text_uuid: Option<TextId>,
}

impl ScoreInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: None,
            text_uuid: None,
        }
    }

    /// Uses the atom's own fields as the draft.
    pub fn from_atom(atom: &Atom) -> Self {
        Self {
            title: atom.title.clone(),
            body: atom.body.clone(),
            kind: Some(atom.kind),
            text_uuid: atom.text_uuid,
        }
    }
}

/// Tokenized form of a [`ScoreInput`], computed once per request.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    title_phrase: String,
    title_tokens: Vec<String>,
    keywords: Vec<String>,
    kind: Option<AtomType>,
    text_uuid: Option<TextId>,
}

impl PreparedInput {
    pub fn new(input: &ScoreInput) -> Self {
        Self {
            title_phrase: input.title.trim().to_lowercase(),
            title_tokens: unique_keywords(&input.title),
            keywords: unique_keywords(&format!("{} {}", input.title, input.body)),
            kind: input.kind,
            text_uuid: input.text_uuid,
        }
    }
}

/// Candidate being scored. Notes and texts share the title rules but differ
/// in the remaining signals.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Note(&'a Atom),
    Text(&'a Text),
}

impl Candidate<'_> {
    fn title(&self) -> &str {
        match self {
            Self::Note(atom) => &atom.title,
            Self::Text(text) => &text.title,
        }
    }
}

/// Human-readable explanation for one score contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MatchReason {
    ExactTitle,
    SharedTitleWords { count: usize },
    SimilarTitleWords { count: usize },
    SameSource,
    SameCategory,
    SharedKeywords { keywords: Vec<String> },
}

impl Display for MatchReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactTitle => write!(f, "exact title match"),
            Self::SharedTitleWords { count: 1 } => write!(f, "1 shared title word"),
            Self::SharedTitleWords { count } => write!(f, "{count} shared title words"),
            Self::SimilarTitleWords { count: 1 } => write!(f, "1 similar title word"),
            Self::SimilarTitleWords { count } => write!(f, "{count} similar title words"),
            Self::SameSource => write!(f, "same source"),
            Self::SameCategory => write!(f, "same category"),
            Self::SharedKeywords { keywords } => {
                write!(f, "shared keywords: {}", keywords.join(", "))
            }
        }
    }
}

/// Score and explanations for one candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredMatch {
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl ScoredMatch {
    fn add(&mut self, weight: f64, reason: MatchReason) {
        self.score += weight;
        self.reasons.push(reason);
    }
}

/// Scores one candidate against a prepared input.
pub fn score_candidate(
    input: &PreparedInput,
    candidate: Candidate<'_>,
    weights: &ScoringWeights,
) -> ScoredMatch {
    let mut scored = ScoredMatch::default();
    let candidate_title = candidate.title();

    if input.title_phrase.chars().count() > MIN_PHRASE_CHARS
        && candidate_title.to_lowercase().contains(&input.title_phrase)
    {
        scored.add(weights.exact_phrase, MatchReason::ExactTitle);
    }

    let (exact, partial) = title_word_matches(&input.title_tokens, &keyword_set(candidate_title));
    if exact > 0 {
        scored.add(
            weights.title_word_exact * exact as f64,
            MatchReason::SharedTitleWords { count: exact },
        );
    }
    if partial > 0 {
        scored.add(
            weights.title_word_partial * partial as f64,
            MatchReason::SimilarTitleWords { count: partial },
        );
    }

    let (overlap_source, per_keyword) = match candidate {
        Candidate::Note(atom) => {
            if input.text_uuid.is_some() && input.text_uuid == atom.text_uuid {
                scored.add(weights.same_source, MatchReason::SameSource);
            }
            if input.kind == Some(atom.kind) {
                scored.add(weights.same_category, MatchReason::SameCategory);
            }
            (atom.body.as_str(), weights.note_keyword)
        }
        Candidate::Text(text) => (text.author.as_str(), weights.text_author_keyword),
    };

    let shared = shared_keywords(&input.keywords, &keyword_set(overlap_source));
    if !shared.is_empty() {
        scored.add(
            per_keyword * shared.len() as f64,
            MatchReason::SharedKeywords { keywords: shared },
        );
    }

    scored
}

/// Counts input title tokens that match a candidate title token exactly, and
/// those that only match by substring. A token counts at most once.
fn title_word_matches(input_tokens: &[String], candidate_tokens: &HashSet<String>) -> (usize, usize) {
    let mut exact = 0;
    let mut partial = 0;
    for token in input_tokens {
        if candidate_tokens.contains(token) {
            exact += 1;
        } else if token.chars().count() > MIN_PARTIAL_TOKEN_CHARS
            && candidate_tokens.iter().any(|other| {
                other.chars().count() > MIN_PARTIAL_TOKEN_CHARS
                    && (other.contains(token.as_str()) || token.contains(other.as_str()))
            })
        {
            partial += 1;
        }
    }
    (exact, partial)
}

fn shared_keywords(input_keywords: &[String], candidate_keywords: &HashSet<String>) -> Vec<String> {
    input_keywords
        .iter()
        .filter(|keyword| candidate_keywords.contains(*keyword))
        .cloned()
        .collect()
}
