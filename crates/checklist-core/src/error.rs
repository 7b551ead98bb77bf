use thiserror::Error;

/// Which kind of record a submitted name was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Task,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::List => f.write_str("list"),
            NameKind::Task => f.write_str("task"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("{0} name cannot be empty")]
    EmptyName(NameKind),

    #[error("invalid date `{input}`: expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("no list with id `{0}`")]
    UnknownList(String),

    #[error("storage access failed for `{key}`: {reason}")]
    Storage { key: String, reason: String },

    #[error("failed to serialize lists")]
    Serialize(#[from] serde_json::Error),
}

impl ChecklistError {
    /// Validation failures leave state untouched and are shown to the user
    /// as a warning rather than an error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChecklistError::EmptyName(_)
                | ChecklistError::InvalidDate { .. }
                | ChecklistError::UnknownList(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ChecklistError>;
