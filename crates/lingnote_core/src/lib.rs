//! Core domain logic for Lingnote, a study-notes tool for a linguistics
//! course. This crate is the single source of truth for the schema, the
//! filtered note query, and the console report layout.

pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use format::align::{align_paired_words, AlignError};
pub use logging::{default_log_level, init_logging};
pub use model::records::{
    ExampleRecord, Language, NewExample, NewNote, NoteDetail, NoteRecord, Tag, ValidationError,
};
pub use repo::note_repo::NoteQuery;
pub use repo::{RepoError, RepoResult};
pub use report::{EmptyReportDiagnostic, ReportOptions};
pub use service::note_service::{NoteService, NoteServiceError, ReportOutcome};
