use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ffi::abi::constants;

/// Which shared library file to load
///
/// # Examples
///
/// ```
/// use discord_rpc_loader::LibrarySource;
///
/// // `discord-rpc64` becomes `libdiscord-rpc64.so`, `discord-rpc64.dll`, ...
/// let bare = LibrarySource::named("discord-rpc64");
///
/// // A name that already carries an extension is used verbatim
/// let verbatim = LibrarySource::named("discord-rpc64.dll");
/// assert_eq!(verbatim.file_name(), "discord-rpc64.dll");
/// # let _ = bare;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LibrarySource {
    /// The platform file name for `discord-rpc`
    #[default]
    Default,
    /// A library name, expanded to the platform file name unless it already
    /// has an extension or a directory component
    Named(String),
    /// An explicit filesystem path
    Path(PathBuf),
}

impl LibrarySource {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self::Named(name.into())
    }

    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        Self::Path(path.into())
    }

    /// Read the source from the `DISCORD_RPC_LIBRARY` environment variable
    ///
    /// Unset or empty gives [`LibrarySource::Default`]; a value with a path
    /// separator is treated as a path, anything else as a library name.
    pub fn from_env() -> Self {
        match std::env::var_os(constants::LIBRARY_ENV_VAR) {
            Some(value) if !value.is_empty() => Self::from_value(value),
            _ => Self::Default,
        }
    }

    fn from_value(value: OsString) -> Self {
        let as_path = Path::new(&value);
        if as_path.components().count() > 1 {
            Self::Path(PathBuf::from(value))
        } else {
            Self::Named(value.to_string_lossy().into_owned())
        }
    }

    /// The file name or path handed to the dynamic loader
    pub fn file_name(&self) -> OsString {
        match self {
            Self::Default => libloading::library_filename(constants::DEFAULT_LIBRARY_NAME),
            Self::Named(name) if is_bare_name(name) => libloading::library_filename(name),
            Self::Named(name) => OsString::from(name),
            Self::Path(path) => path.clone().into_os_string(),
        }
    }

    /// Human readable form, used in errors and logs
    pub fn describe(&self) -> String {
        self.file_name().to_string_lossy().into_owned()
    }
}

/// No extension and no directory component
fn is_bare_name(name: &str) -> bool {
    let path = Path::new(name);
    path.extension().is_none() && path.components().count() <= 1
}
