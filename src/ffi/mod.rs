//! Raw layer over the native discord-rpc library
//!
//! [`abi`] mirrors the C header, [`source`] decides which file is loaded and
//! [`library`] resolves the exported functions at runtime.

pub mod abi;
pub mod library;
#[cfg(test)]
pub(crate) mod recorder;
pub mod source;
pub(crate) mod strings;

pub use abi::constants;
pub use library::NativeLibrary;
pub use source::LibrarySource;
