use lingnote_core::db::open_db_in_memory;
use lingnote_core::{
    EmptyReportDiagnostic, NewExample, NewNote, NoteQuery, NoteService, ReportOptions,
};

fn seeded_service(conn: &mut rusqlite::Connection) -> NoteService<'_> {
    NoteService::new(conn)
}

fn add(service: &mut NoteService<'_>, language: &str, text: &str, tags: &[&str]) {
    service
        .add_note(&NewNote {
            language: language.to_string(),
            create_language: false,
            text: text.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            examples: Vec::new(),
        })
        .unwrap();
}

#[test]
fn nonexistent_language_yields_language_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: Some("Klingon".to_string()),
                tags: Vec::new(),
            },
            &ReportOptions::default(),
        )
        .unwrap();

    assert_eq!(outcome.matched, 0);
    assert_eq!(
        outcome.diagnostic,
        Some(EmptyReportDiagnostic::LanguageNotFound)
    );
    assert_eq!(outcome.display_text(), "Language not found\n");
}

#[test]
fn empty_language_yields_no_notes_message_not_language_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = seeded_service(&mut conn);
    // Another language has notes; French (seeded) has none.
    add(&mut service, "English", "filler", &[]);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: Some("French".to_string()),
                tags: Vec::new(),
            },
            &ReportOptions::default(),
        )
        .unwrap();

    assert_eq!(
        outcome.diagnostic,
        Some(EmptyReportDiagnostic::LanguageHasNoNotes)
    );
    assert_eq!(
        outcome.display_text(),
        "No notes associated with this language\n"
    );
}

#[test]
fn unknown_tags_yield_missing_name_listing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = seeded_service(&mut conn);
    add(&mut service, "English", "filler", &["syntax"]);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: None,
                tags: vec!["mood".to_string(), "voice".to_string()],
            },
            &ReportOptions::default(),
        )
        .unwrap();

    assert_eq!(
        outcome.diagnostic,
        Some(EmptyReportDiagnostic::UnknownTags(vec![
            "mood".to_string(),
            "voice".to_string(),
        ]))
    );
    assert_eq!(outcome.display_text(), "No such tag(s): mood, voice\n");
}

#[test]
fn known_tags_with_empty_intersection_get_no_diagnostic() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = seeded_service(&mut conn);
    add(&mut service, "English", "a", &["syntax"]);
    add(&mut service, "French", "b", &["phonology"]);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: None,
                tags: vec!["syntax".to_string(), "phonology".to_string()],
            },
            &ReportOptions::default(),
        )
        .unwrap();

    assert_eq!(outcome.matched, 0);
    assert_eq!(outcome.diagnostic, None);
    assert_eq!(outcome.display_text(), "");
}

#[test]
fn language_priority_beats_tag_diagnostics() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: Some("Klingon".to_string()),
                tags: vec!["mood".to_string()],
            },
            &ReportOptions::default(),
        )
        .unwrap();

    assert_eq!(
        outcome.diagnostic,
        Some(EmptyReportDiagnostic::LanguageNotFound)
    );
}

#[test]
fn suppressed_diagnostics_leave_empty_output() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let outcome = service
        .run_report(
            &NoteQuery {
                language: Some("Klingon".to_string()),
                tags: Vec::new(),
            },
            &ReportOptions {
                diagnostics: false,
                ..ReportOptions::default()
            },
        )
        .unwrap();

    assert_eq!(outcome.diagnostic, None);
    assert_eq!(outcome.display_text(), "");
}

#[test]
fn full_report_renders_headers_tags_and_examples() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = seeded_service(&mut conn);
    service
        .add_note(&NewNote {
            language: "Hawai'ian".to_string(),
            create_language: false,
            text: "Basic word order is verb initial.".to_string(),
            tags: vec!["word-order".to_string()],
            examples: vec![NewExample {
                original: "ua hele ke kanaka".to_string(),
                gloss: "PFV go DET person".to_string(),
                translation: "the person went".to_string(),
            }],
        })
        .unwrap();

    let outcome = service
        .run_report(&NoteQuery::default(), &ReportOptions::default())
        .unwrap();

    assert_eq!(outcome.matched, 1);
    let text = outcome.display_text();
    assert!(text.contains("Note 1: Hawai'ian"));
    assert!(text.contains("Tags: word-order"));
    assert!(text.contains("  Basic word order is verb initial."));
    assert!(text.contains("    ua   hele  ke   kanaka"));
    assert!(text.contains("    PFV  go    DET  person"));
    assert!(text.contains("    the person went"));
}

#[test]
fn hide_flags_remove_tags_and_examples_from_output() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = seeded_service(&mut conn);
    service
        .add_note(&NewNote {
            language: "English".to_string(),
            create_language: false,
            text: "body".to_string(),
            tags: vec!["syntax".to_string()],
            examples: vec![NewExample {
                original: "one".to_string(),
                gloss: "1".to_string(),
                translation: String::new(),
            }],
        })
        .unwrap();

    let outcome = service
        .run_report(
            &NoteQuery::default(),
            &ReportOptions {
                show_tags: false,
                show_examples: false,
                ..ReportOptions::default()
            },
        )
        .unwrap();

    let text = outcome.display_text();
    assert!(text.contains("Note 1: English"));
    assert!(!text.contains("Tags:"));
    assert!(!text.contains("one"));
}
