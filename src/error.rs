use thiserror::Error;

/// Main error type for the sheetprep pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("invalid column selection: {message}")]
    InvalidSelection { message: String },

    #[error("invalid minimum length: {value} (must be zero or positive)")]
    InvalidThreshold { value: i64 },

    #[error("cannot read file: {path}")]
    UnreadableFile {
        path: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("cannot write file: {path}")]
    WriteError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("general error: {0}")]
    General(#[from] anyhow::Error),
}

impl PrepError {
    /// Create a column selection error with context
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection {
            message: message.into(),
        }
    }

    /// Create a read error without an underlying cause
    pub fn unreadable_file(path: impl Into<String>) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            source: None,
        }
    }

    /// Create a read error with its underlying cause
    pub fn unreadable_file_with_source(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a write error
    pub fn write_error(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::WriteError {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors the user can fix by changing their arguments,
    /// as opposed to I/O failures outside their control
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PrepError::InvalidSelection { .. }
                | PrepError::InvalidThreshold { .. }
                | PrepError::UnsupportedFormat { .. }
                | PrepError::SheetNotFound { .. }
                | PrepError::Configuration { .. }
        )
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PrepError::InvalidSelection { message } => {
                format!("Column selection problem: {}.", message)
            }
            PrepError::InvalidThreshold { value } => {
                format!("Minimum length must be zero or positive, got {}.", value)
            }
            PrepError::UnreadableFile { path, .. } => {
                format!(
                    "📁 Could not read {}. Check that the file exists and is a valid spreadsheet or delimited text file.",
                    path
                )
            }
            PrepError::WriteError { path, .. } => {
                format!(
                    "📁 Could not write {}. Check permissions and disk space.",
                    path
                )
            }
            PrepError::UnsupportedFormat { extension } => {
                format!(
                    "📄 Unsupported file type '{}'. Supported: xlsx, xlsm, xlsb, xls, xla, ods, csv, txt.",
                    extension
                )
            }
            PrepError::SheetNotFound { name } => {
                format!("Sheet '{}' does not exist in this workbook.", name)
            }
            PrepError::Configuration { message } => {
                format!("Configuration problem: {}.", message)
            }
            _ => "Something went wrong. Run with --verbose for details.".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type PrepResult<T> = Result<T, PrepError>;
