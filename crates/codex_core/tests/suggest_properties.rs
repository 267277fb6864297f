use codex_core::{
    extract_keywords, find_related, Atom, AtomType, CandidateSource, RelatedRequest, RepoResult,
    ScoreInput, SuggestConfig, Text, TextType,
};
use proptest::prelude::*;
use uuid::Uuid;

const VOCABULARY: &[&str] = &[
    "memory", "palace", "simulation", "simulacra", "network", "networks", "cognition", "the",
    "and", "of", "art", "theory", "reading", "writing", "power",
];

#[derive(Debug)]
struct InMemorySource {
    notes: Vec<Atom>,
    texts: Vec<Text>,
}

impl CandidateSource for InMemorySource {
    fn fetch_notes(&self) -> RepoResult<Vec<Atom>> {
        Ok(self.notes.clone())
    }

    fn fetch_texts(&self) -> RepoResult<Vec<Text>> {
        Ok(self.texts.clone())
    }
}

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..6).prop_map(|words| words.join(" "))
}

fn atom_type() -> impl Strategy<Value = AtomType> {
    prop::sample::select(vec![
        AtomType::Idea,
        AtomType::Question,
        AtomType::Quote,
        AtomType::Insight,
    ])
}

fn source_fixture() -> impl Strategy<Value = (InMemorySource, ScoreInput)> {
    let sources = [Uuid::from_u128(1), Uuid::from_u128(2)];
    let note = (phrase(), phrase(), atom_type(), prop::option::of(0usize..2)).prop_map(
        move |(title, body, kind, source)| {
            let mut atom = Atom::new(kind, format!("note {title}"), body);
            atom.text_uuid = source.map(|index| sources[index]);
            atom
        },
    );
    let text = (phrase(), phrase())
        .prop_map(|(title, author)| Text::new(TextType::Book, format!("text {title}"), author));
    let input = (phrase(), phrase(), prop::option::of(atom_type()), prop::option::of(0usize..2))
        .prop_map(move |(title, body, kind, source)| ScoreInput {
            title,
            body,
            kind,
            text_uuid: source.map(|index| sources[index]),
        });

    (
        prop::collection::vec(note, 0..12),
        prop::collection::vec(text, 0..6),
        input,
    )
        .prop_map(|(notes, texts, input)| (InMemorySource { notes, texts }, input))
}

proptest! {
    #[test]
    fn scores_are_positive_and_sorted_descending((source, input) in source_fixture()) {
        let related = find_related(&source, &RelatedRequest::new(input), &SuggestConfig::default());

        let note_scores: Vec<f64> = related.notes.iter().map(|s| s.score).collect();
        let text_scores: Vec<f64> = related.texts.iter().map(|s| s.score).collect();
        for scores in [&note_scores, &text_scores] {
            prop_assert!(scores.iter().all(|score| *score > 0.0));
            prop_assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        }
        prop_assert!(related.notes.len() <= 5);
        prop_assert!(related.texts.len() <= 3);
        prop_assert!(related.notes.iter().all(|s| !s.reasons.is_empty()));
    }

    #[test]
    fn ranking_is_idempotent((source, input) in source_fixture()) {
        let request = RelatedRequest::new(input);
        let config = SuggestConfig::default();
        prop_assert_eq!(
            find_related(&source, &request, &config),
            find_related(&source, &request, &config)
        );
    }

    #[test]
    fn keywords_are_long_alphanumeric_tokens(text in ".{0,80}") {
        for keyword in extract_keywords(&text) {
            prop_assert!(keyword.chars().count() > 2);
            prop_assert!(keyword.chars().all(char::is_alphanumeric));
        }
    }

    #[test]
    fn ascii_keywords_are_lowercase(text in "[a-zA-Z0-9 ,.!?'-]{0,80}") {
        for keyword in extract_keywords(&text) {
            prop_assert!(keyword.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
