use codex_core::db::open_db_in_memory;
use codex_core::{
    Atom, AtomRepository, AtomType, MatchReason, ModerationStatus, RelatedRequest, ScoreInput,
    SqliteAtomRepository, SqliteCandidateSource, SqliteTextRepository, SuggestConfig,
    SuggestionService, Text, TextRepository, TextType,
};
use rusqlite::Connection;

fn insert_atom(conn: &Connection, atom: &Atom) {
    SqliteAtomRepository::try_new(conn)
        .unwrap()
        .create_atom(atom)
        .unwrap();
}

fn insert_text(conn: &Connection, text: &Text) {
    SqliteTextRepository::try_new(conn)
        .unwrap()
        .create_text(text)
        .unwrap();
}

fn service(conn: &Connection) -> SuggestionService<SqliteCandidateSource<'_>> {
    SuggestionService::new(
        SqliteCandidateSource::try_new(conn).unwrap(),
        SuggestConfig::default(),
    )
    .unwrap()
}

#[test]
fn exact_title_outranks_single_keyword_match() {
    let conn = open_db_in_memory().unwrap();
    let partial = Atom::new(AtomType::Idea, "Simulation theory in games", "");
    let exact = Atom::new(AtomType::Idea, "Simulacra and Simulation", "");
    insert_atom(&conn, &partial);
    insert_atom(&conn, &exact);

    let request = RelatedRequest::new(ScoreInput::new("Simulacra and Simulation", ""));
    let related = service(&conn).related_for_draft(&request);

    assert_eq!(related.notes.len(), 2);
    assert_eq!(related.notes[0].candidate.uuid, exact.uuid);
    assert_eq!(related.notes[0].score, 16.0);
    assert_eq!(
        related.notes[0].reasons,
        vec![
            MatchReason::ExactTitle,
            MatchReason::SharedTitleWords { count: 2 }
        ]
    );
    assert_eq!(related.notes[1].candidate.uuid, partial.uuid);
    assert_eq!(related.notes[1].score, 3.0);
}

#[test]
fn same_source_notes_get_source_bonus() {
    let conn = open_db_in_memory().unwrap();
    let cited = Text::new(TextType::Book, "Ways of Seeing", "John Berger");
    let other = Text::new(TextType::Book, "Camera Lucida", "Roland Barthes");
    insert_text(&conn, &cited);
    insert_text(&conn, &other);

    let different = Atom::new(AtomType::Idea, "Image reproduction", "").citing(other.uuid);
    let same_a = Atom::new(AtomType::Idea, "Image reproduction", "").citing(cited.uuid);
    let same_b = Atom::new(AtomType::Idea, "Image reproduction", "").citing(cited.uuid);
    for atom in [&different, &same_a, &same_b] {
        insert_atom(&conn, atom);
    }

    let mut input = ScoreInput::new("Reproduction of images", "");
    input.text_uuid = Some(cited.uuid);
    let related = service(&conn).related_for_draft(&RelatedRequest::new(input));

    let ids: Vec<_> = related.notes.iter().map(|s| s.candidate.uuid).collect();
    assert_eq!(ids, vec![same_a.uuid, same_b.uuid, different.uuid]);
    assert_eq!(related.notes[0].score, related.notes[2].score + 2.0);
    assert!(related.notes[0].reasons.contains(&MatchReason::SameSource));
}

#[test]
fn ties_keep_fetch_order() {
    let conn = open_db_in_memory().unwrap();
    let atoms: Vec<_> = (0..4)
        .map(|_| Atom::new(AtomType::Idea, "Attention economy", ""))
        .collect();
    for atom in &atoms {
        insert_atom(&conn, atom);
    }

    let request = RelatedRequest::new(ScoreInput::new("attention", ""));
    let related = service(&conn).related_for_draft(&request);
    let ids: Vec<_> = related.notes.iter().map(|s| s.candidate.uuid).collect();
    let expected: Vec<_> = atoms.iter().map(|atom| atom.uuid).collect();
    assert_eq!(ids, expected);
}

#[test]
fn rejected_hidden_and_excluded_atoms_are_never_suggested() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::try_new(&conn).unwrap();
    let current = Atom::new(AtomType::Idea, "Cognitive load", "");
    let rejected = Atom::new(AtomType::Idea, "Cognitive load theory", "");
    let hidden = Atom::new(AtomType::Idea, "Cognitive load limits", "");
    let visible = Atom::new(AtomType::Idea, "Cognitive load in class", "");
    for atom in [&current, &rejected, &hidden, &visible] {
        repo.create_atom(atom).unwrap();
    }
    repo.set_status(rejected.uuid, ModerationStatus::Rejected)
        .unwrap();
    repo.set_hidden(hidden.uuid, true).unwrap();

    let related = service(&conn).related_for_atom(&current, None);
    let ids: Vec<_> = related.notes.iter().map(|s| s.candidate.uuid).collect();
    assert_eq!(ids, vec![visible.uuid]);
}

#[test]
fn zero_score_candidates_are_dropped() {
    let conn = open_db_in_memory().unwrap();
    insert_atom(&conn, &Atom::new(AtomType::Idea, "Photosynthesis", "chlorophyll"));
    insert_text(&conn, &Text::new(TextType::Book, "Botany", "Someone Else"));

    let request = RelatedRequest::new(ScoreInput::new("Medieval castles", "moats"));
    let related = service(&conn).related_for_draft(&request);
    assert!(related.notes.is_empty());
    assert!(related.texts.is_empty());
}

#[test]
fn note_limit_defaults_to_five_and_texts_cap_at_three() {
    let conn = open_db_in_memory().unwrap();
    for _ in 0..8 {
        insert_atom(&conn, &Atom::new(AtomType::Idea, "Distributed cognition", ""));
        insert_text(
            &conn,
            &Text::new(TextType::Paper, "Distributed cognition", "Edwin Hutchins"),
        );
    }

    let mut request = RelatedRequest::new(ScoreInput::new("Distributed cognition", ""));
    let related = service(&conn).related_for_draft(&request);
    assert_eq!(related.notes.len(), 5);
    assert_eq!(related.texts.len(), 3);

    request.note_limit = Some(7);
    let related = service(&conn).related_for_draft(&request);
    assert_eq!(related.notes.len(), 7);
    assert_eq!(related.texts.len(), 3);
}

#[test]
fn archived_texts_are_not_suggested_and_authors_match() {
    let conn = open_db_in_memory().unwrap();
    let active = Text::new(TextType::Book, "Orientalism", "Edward Said");
    let mut archived = Text::new(TextType::Book, "Culture and Imperialism", "Edward Said");
    archived.is_archived = true;
    insert_text(&conn, &active);
    insert_text(&conn, &archived);

    let request = RelatedRequest::new(ScoreInput::new("Reading Said", "edward said on empire"));
    let related = service(&conn).related_for_draft(&request);

    assert_eq!(related.texts.len(), 1);
    assert_eq!(related.texts[0].candidate.uuid, active.uuid);
    assert_eq!(related.texts[0].score, 3.0);
    assert_eq!(related.texts[0].reason(), "shared keywords: said, edward");
}

#[test]
fn repeated_calls_return_identical_results() {
    let conn = open_db_in_memory().unwrap();
    for title in ["Network effects", "Effects of networks", "Social networks"] {
        insert_atom(&conn, &Atom::new(AtomType::Insight, title, "platforms grow"));
    }
    let service = service(&conn);
    let request = RelatedRequest::new(ScoreInput::new("Network effects", "how platforms grow"));

    assert_eq!(
        service.related_for_draft(&request),
        service.related_for_draft(&request)
    );
}

#[test]
fn invalid_config_is_rejected_by_service() {
    let conn = open_db_in_memory().unwrap();
    let mut config = SuggestConfig::default();
    config.weights.exact_phrase = -1.0;
    assert!(SuggestionService::new(SqliteCandidateSource::try_new(&conn).unwrap(), config).is_err());
}
