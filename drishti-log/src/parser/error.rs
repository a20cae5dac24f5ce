//! Parser errors.

use thiserror::Error;

/// Whole-log parse failure. Leaves no partial result behind.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("the file must be in text format")]
    NotText,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no position info")]
    NoPositionInfo,

    #[error("no match info found")]
    NoMatchInfo,

    #[error("no auto choices found")]
    NoAutoChoices,

    #[error("specified variable {key} not in string: {text}")]
    VariableNotFound { key: String, text: String },

    #[error("no value for variable {key} in string: {text}")]
    EmptyValue { key: String, text: String },
}

/// Why a single marker-bearing line could not be used.
///
/// The parser classifies the line as malformed and keeps going, except for
/// [`RecordError::Scan`], whose inner [`ParseError`] aborts the load.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("payload is not well-formed: {0}")]
    Decode(String),

    #[error("no `: ` separator before payload")]
    NoPayload,

    #[error("unknown record <{tag} name={name:?}>")]
    UnknownKind { tag: String, name: Option<String> },

    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("attribute `{attribute}` is not a number: {value:?}")]
    InvalidNumber { attribute: &'static str, value: String },

    #[error("pose scan failed: {0}")]
    Scan(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, ParseError>;
