use lingnote_core::db::open_db_in_memory;
use lingnote_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use lingnote_core::repo::tag_repo::{SqliteTagRepository, TagRepository};
use lingnote_core::{NewNote, NoteQuery, NoteService};

fn new_note(language: &str, text: &str, tags: &[&str]) -> NewNote {
    NewNote {
        language: language.to_string(),
        create_language: false,
        text: text.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        examples: Vec::new(),
    }
}

#[test]
fn no_filters_return_all_notes_in_creation_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(&mut conn);
    service.add_note(&new_note("English", "first", &[])).unwrap();
    service.add_note(&new_note("French", "second", &[])).unwrap();
    service.add_note(&new_note("English", "third", &[])).unwrap();

    let all = service.find_notes(&NoteQuery::default()).unwrap();
    let texts: Vec<&str> = all.iter().map(|detail| detail.note.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn language_filter_is_exact_and_case_sensitive() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(&mut conn);
    service.add_note(&new_note("English", "note", &[])).unwrap();

    let query = NoteQuery {
        language: Some("English".to_string()),
        tags: Vec::new(),
    };
    assert_eq!(service.find_notes(&query).unwrap().len(), 1);

    let query = NoteQuery {
        language: Some("english".to_string()),
        tags: Vec::new(),
    };
    assert!(service.find_notes(&query).unwrap().is_empty());
}

#[test]
fn multiple_tag_filters_intersect_regardless_of_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(&mut conn);
    let both = service
        .add_note(&new_note("English", "has both", &["morphology", "tone"]))
        .unwrap();
    service
        .add_note(&new_note("English", "only one", &["morphology"]))
        .unwrap();

    for tags in [["morphology", "tone"], ["tone", "morphology"]] {
        let query = NoteQuery {
            language: None,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        };
        let matched = service.find_notes(&query).unwrap();
        assert_eq!(matched.len(), 1, "intersection must require every tag");
        assert_eq!(matched[0].note.id, both.note.id);
    }
}

#[test]
fn single_tag_filter_matches_all_carriers_without_duplicates() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(&mut conn);
    service
        .add_note(&new_note("English", "a", &["morphology", "tone"]))
        .unwrap();
    service
        .add_note(&new_note("French", "b", &["morphology"]))
        .unwrap();

    let query = NoteQuery {
        language: None,
        tags: vec!["morphology".to_string()],
    };
    let matched = service.find_notes(&query).unwrap();
    let texts: Vec<&str> = matched
        .iter()
        .map(|detail| detail.note.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn language_and_tag_filters_combine() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = NoteService::new(&mut conn);
    service
        .add_note(&new_note("English", "english tagged", &["tone"]))
        .unwrap();
    service
        .add_note(&new_note("French", "french tagged", &["tone"]))
        .unwrap();

    let query = NoteQuery {
        language: Some("French".to_string()),
        tags: vec!["tone".to_string()],
    };
    let matched = service.find_notes(&query).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].note.text, "french tagged");
}

#[test]
fn reused_tag_names_attach_the_existing_tag_row() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = NoteService::new(&mut conn);
        service
            .add_note(&new_note("English", "a", &["reduplication"]))
            .unwrap();
        service
            .add_note(&new_note("French", "b", &["reduplication"]))
            .unwrap();
    }

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM tags WHERE name = 'reduplication';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "get-or-create must never duplicate a tag");
}

#[test]
fn reattaching_a_tag_to_the_same_note_is_deduplicated() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::new(&conn);
    let tags = SqliteTagRepository::new(&conn);

    let language_id: i64 = conn
        .query_row(
            "SELECT id FROM languages WHERE name = 'English';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let note = notes.create_note("pair uniqueness", language_id).unwrap();
    let tag = tags.get_or_create_tag("clitic").unwrap();

    notes.attach_tag(note.id, tag.id).unwrap();
    notes.attach_tag(note.id, tag.id).unwrap();

    assert_eq!(notes.tags_for_note(note.id).unwrap(), vec!["clitic"]);
}

#[test]
fn get_or_create_returns_the_same_tag_id_on_repeat() {
    let conn = open_db_in_memory().unwrap();
    let tags = SqliteTagRepository::new(&conn);

    let first = tags.get_or_create_tag("ergativity").unwrap();
    let second = tags.get_or_create_tag("ergativity").unwrap();
    assert_eq!(first.id, second.id);
}
