use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiptrackError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Registry schema version {0} is not supported")]
    UnsupportedSchema(u32),

    #[error("Record not found: node {0}")]
    RecordNotFound(usize),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Workbook write error: {0}")]
    WorkbookWrite(String),

    #[error("Unknown station code: {0}")]
    UnknownStation(String),

    #[error("Submit rejected: {0}")]
    InvalidDraft(String),

    #[error("Invalid session transition: {0}")]
    Session(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShiptrackError>;
