use codex_core::{Atom, AtomType, AtomValidationError, ModerationStatus, Text, TextType};
use uuid::Uuid;

#[test]
fn atom_new_sets_defaults() {
    let atom = Atom::new(AtomType::Idea, "Panopticon", "visibility as control");

    assert!(!atom.uuid.is_nil());
    assert_eq!(atom.kind, AtomType::Idea);
    assert_eq!(atom.title, "Panopticon");
    assert_eq!(atom.text_uuid, None);
    assert_eq!(atom.status, ModerationStatus::Pending);
    assert!(!atom.is_hidden);
    assert!(atom.is_visible());
}

#[test]
fn atom_serialization_uses_expected_wire_fields() {
    let atom_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let text_id = Uuid::parse_str("66666666-7777-4888-8999-aaaaaaaaaaaa").unwrap();
    let mut atom = Atom::with_id(atom_id, AtomType::Quote, "The map", "precedes the territory")
        .unwrap()
        .citing(text_id);
    atom.status = ModerationStatus::Approved;

    let json = serde_json::to_value(&atom).unwrap();
    assert_eq!(json["uuid"], atom_id.to_string());
    assert_eq!(json["type"], "quote");
    assert_eq!(json["text_uuid"], text_id.to_string());
    assert_eq!(json["status"], "approved");
    assert_eq!(json["is_hidden"], false);

    let decoded: Atom = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, atom);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Atom::with_id(Uuid::nil(), AtomType::Idea, "title", "").unwrap_err();
    assert_eq!(err, AtomValidationError::NilUuid);
}

#[test]
fn validate_rejects_blank_title() {
    let atom = Atom::new(AtomType::Question, "   ", "body");
    assert_eq!(atom.validate(), Err(AtomValidationError::BlankTitle));
}

#[test]
fn deserialize_rejects_blank_title_and_defaults_optional_fields() {
    let value = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "type": "insight",
        "title": " "
    });
    let err = serde_json::from_value::<Atom>(value).unwrap_err();
    assert!(
        err.to_string().contains("atom title must not be blank"),
        "unexpected error: {err}"
    );

    let value = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "type": "insight",
        "title": "Linked"
    });
    let atom = serde_json::from_value::<Atom>(value).unwrap();
    assert_eq!(atom.body, "");
    assert_eq!(atom.status, ModerationStatus::Pending);
}

#[test]
fn text_serialization_uses_type_field() {
    let text = Text::new(TextType::Paper, "Simulacra and Simulation", "Jean Baudrillard");
    let json = serde_json::to_value(&text).unwrap();
    assert_eq!(json["type"], "paper");
    assert_eq!(json["is_archived"], false);
}
