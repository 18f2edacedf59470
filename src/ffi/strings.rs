//! Rust <-> C string conversion helpers

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{DiscordRpcError, Result};

/// Convert a required string argument, naming the field on failure
pub(crate) fn to_c_string(field: &'static str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|e| DiscordRpcError::invalid_string(field, e))
}

/// Owns the `CString`s behind a batch of raw pointers
///
/// Moving a `CString` into the arena does not move its heap buffer, so every
/// pointer handed out stays valid until the arena is dropped.
#[derive(Debug, Default)]
pub(crate) struct CStringArena {
    strings: Vec<CString>,
}

impl CStringArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `None` maps to a null pointer
    pub(crate) fn optional(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<*const c_char> {
        match value {
            Some(value) => self.required(field, value),
            None => Ok(ptr::null()),
        }
    }

    pub(crate) fn required(&mut self, field: &'static str, value: &str) -> Result<*const c_char> {
        let owned = to_c_string(field, value)?;
        let raw = owned.as_ptr();
        self.strings.push(owned);
        Ok(raw)
    }
}

/// Borrow a C string coming from the native side; null becomes `None`
///
/// # Safety
///
/// `raw` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn from_c_str<'a>(raw: *const c_char) -> Option<Cow<'a, str>> {
    if raw.is_null() {
        None
    } else {
        Some(CStr::from_ptr(raw).to_string_lossy())
    }
}

/// Like [`from_c_str`] but null becomes an empty string
///
/// # Safety
///
/// Same contract as [`from_c_str`].
pub(crate) unsafe fn owned_or_empty(raw: *const c_char) -> String {
    from_c_str(raw).map(Cow::into_owned).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_keeps_pointers_alive() {
        let mut arena = CStringArena::new();
        let first = arena.required("first", "hello").unwrap();
        let second = arena.optional("second", Some("world")).unwrap();
        let absent = arena.optional("third", None).unwrap();

        assert!(absent.is_null());
        unsafe {
            assert_eq!(from_c_str(first).as_deref(), Some("hello"));
            assert_eq!(from_c_str(second).as_deref(), Some("world"));
        }
    }

    #[test]
    fn interior_nul_names_the_field() {
        let mut arena = CStringArena::new();
        let error = arena.required("state", "bad\0value").unwrap_err();
        match error {
            DiscordRpcError::InvalidString { field, source } => {
                assert_eq!(field, "state");
                assert_eq!(source.nul_position(), 3);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn null_pointers_read_as_absent() {
        unsafe {
            assert!(from_c_str(ptr::null()).is_none());
            assert_eq!(owned_or_empty(ptr::null()), "");
        }
    }
}
