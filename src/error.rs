use std::ffi::NulError;
use thiserror::Error;

/// Errors that can occur while loading or calling the native discord-rpc library
#[derive(Error, Debug)]
pub enum DiscordRpcError {
    #[error("Failed to load native library `{library}`")]
    LibraryLoad {
        library: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Native library `{library}` does not export `{symbol}`")]
    MissingSymbol {
        symbol: &'static str,
        library: String,
        #[source]
        source: libloading::Error,
    },

    #[error("String argument `{field}` contains an interior NUL byte")]
    InvalidString {
        field: &'static str,
        #[source]
        source: NulError,
    },

    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("System time error: {0}")]
    SystemTime(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Broad classification of a [`DiscordRpcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The shared library could not be loaded or is missing an entry point
    Library,
    /// An argument was rejected or could not be converted to its C representation
    Argument,
    /// The host environment failed (clock before the UNIX epoch, thread spawn)
    System,
}

impl DiscordRpcError {
    pub(crate) fn invalid_string(field: &'static str, source: NulError) -> Self {
        Self::InvalidString { field, source }
    }

    /// Get the category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LibraryLoad { .. } | Self::MissingSymbol { .. } => ErrorCategory::Library,
            Self::InvalidString { .. } | Self::InvalidArgument { .. } => ErrorCategory::Argument,
            Self::SystemTime(_) | Self::Io(_) => ErrorCategory::System,
        }
    }

    /// Whether the error came from loading the native library
    pub fn is_library_error(&self) -> bool {
        self.category() == ErrorCategory::Library
    }
}

/// Result type for discord-rpc operations
pub type Result<T = ()> = std::result::Result<T, DiscordRpcError>;
