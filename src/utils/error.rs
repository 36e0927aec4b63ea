use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameplanError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed row in {file} at line {line}: {reason}")]
    MalformedRow {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Bad reference data in {file} at line {line}: {reason}")]
    ReferenceDataError {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Match {match_id} references unknown {kind} '{key}'")]
    UnknownReference {
        match_id: u32,
        kind: EntityKind,
        key: String,
    },

    #[error("Invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: u32, reason: String },

    #[error("Duplicate {kind} key '{key}'")]
    DuplicateKey { kind: EntityKind, key: String },

    #[error("Duplicate match id {match_id}")]
    DuplicateMatchId { match_id: u32 },

    #[error("Invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },
}

/// The entity a key or reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Venue,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Team => write!(f, "team"),
            EntityKind::Venue => write!(f, "venue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Integrity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GameplanError {
    pub fn config(message: impl Into<String>) -> Self {
        GameplanError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GameplanError::IoError(_) => ErrorCategory::Io,
            GameplanError::ConfigError { .. }
            | GameplanError::InvalidConfigValueError { .. }
            | GameplanError::InvalidArgument { .. } => ErrorCategory::Configuration,
            GameplanError::CsvError(_)
            | GameplanError::SerializationError(_)
            | GameplanError::MalformedRow { .. }
            | GameplanError::ReferenceDataError { .. }
            | GameplanError::UnknownReference { .. }
            | GameplanError::InvalidMatch { .. } => ErrorCategory::Input,
            GameplanError::DuplicateKey { .. } | GameplanError::DuplicateMatchId { .. } => {
                ErrorCategory::Integrity
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GameplanError::UnknownReference { .. }
            | GameplanError::InvalidMatch { .. }
            | GameplanError::MalformedRow { .. } => ErrorSeverity::Low,
            GameplanError::ConfigError { .. }
            | GameplanError::InvalidConfigValueError { .. }
            | GameplanError::InvalidArgument { .. } => ErrorSeverity::Medium,
            GameplanError::CsvError(_)
            | GameplanError::SerializationError(_)
            | GameplanError::ReferenceDataError { .. }
            | GameplanError::DuplicateKey { .. }
            | GameplanError::DuplicateMatchId { .. } => ErrorSeverity::High,
            GameplanError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Row-level problems that skip one fixture without aborting the load.
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    /// Process exit code for an error that reached the CLI. A recoverable
    /// error that still aborted a command exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GameplanError::IoError(_) => "Check that the input files exist and are readable",
            GameplanError::CsvError(_)
            | GameplanError::MalformedRow { .. }
            | GameplanError::ReferenceDataError { .. } => {
                "Check that every line is tab-separated with the expected number of columns"
            }
            GameplanError::SerializationError(_) => "Check the output directory and disk space",
            GameplanError::ConfigError { .. }
            | GameplanError::InvalidConfigValueError { .. }
            | GameplanError::InvalidArgument { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            GameplanError::UnknownReference { .. } => {
                "Add the missing team or venue to its file, or fix the fixture's spelling"
            }
            GameplanError::InvalidMatch { .. } => "A match needs a positive id and two different teams",
            GameplanError::DuplicateKey { .. } => "Team abbreviations and venue names must be unique",
            GameplanError::DuplicateMatchId { .. } => "Every fixture needs its own match id",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input data problem: {}", self),
            ErrorCategory::Integrity => format!("Schedule data is inconsistent: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameplanError>;
