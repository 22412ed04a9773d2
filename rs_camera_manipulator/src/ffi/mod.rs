//! Opaque-handle binding layer.
//!
//! Every value crossing the foreign boundary lives in a process-wide
//! [`HandleRegistry`] and is referred to by a raw `u64` handle. Each operation
//! has a safe Rust form returning [`Result`], used by the JNI crate, and a
//! `#[no_mangle] extern "C"` form that logs the error and returns a neutral
//! value (`0`, `false`) instead.

pub mod bookmark;
pub mod config;
pub mod manipulator;

use crate::{
    bookmark::Bookmark,
    config::Config,
    error::{Error, Result},
    handle::HandleRegistry,
    manipulator::Manipulator,
};
use std::sync::{Mutex, MutexGuard};

const CONFIG_TAG: u8 = 1;
const MANIPULATOR_TAG: u8 = 2;
const BOOKMARK_TAG: u8 = 3;

lazy_static::lazy_static! {
    static ref CONFIGS: Mutex<HandleRegistry<Config>> =
        Mutex::new(HandleRegistry::with_tag(CONFIG_TAG));
    static ref MANIPULATORS: Mutex<HandleRegistry<Box<dyn Manipulator>>> =
        Mutex::new(HandleRegistry::with_tag(MANIPULATOR_TAG));
    static ref BOOKMARKS: Mutex<HandleRegistry<Bookmark>> =
        Mutex::new(HandleRegistry::with_tag(BOOKMARK_TAG));
}

fn lock<T>(registry: &'static Mutex<HandleRegistry<T>>) -> MutexGuard<'static, HandleRegistry<T>> {
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn configs() -> MutexGuard<'static, HandleRegistry<Config>> {
    lock(&CONFIGS)
}

pub(crate) fn manipulators() -> MutexGuard<'static, HandleRegistry<Box<dyn Manipulator>>> {
    lock(&MANIPULATORS)
}

pub(crate) fn bookmarks() -> MutexGuard<'static, HandleRegistry<Bookmark>> {
    lock(&BOOKMARKS)
}

/// Logs a rejected call and turns its result into an `Option` for the C ABI.
pub(crate) fn report<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{operation}: {err}");
            None
        }
    }
}

pub fn ffi_to_rs_string(c_str: *const std::ffi::c_char) -> Result<String> {
    if c_str.is_null() {
        return Err(Error::NullString);
    }
    let c_str = unsafe { std::ffi::CStr::from_ptr(c_str) };
    c_str
        .to_str()
        .map(|rs_string| rs_string.to_owned())
        .map_err(Error::Utf8)
}

/// Copies a vector into a caller-provided `float[3]`.
///
/// # Safety
/// `dst` must be null or valid for writes of three `f32`.
pub(crate) unsafe fn write_vec3(dst: *mut f32, value: glam::Vec3) -> bool {
    if dst.is_null() {
        return false;
    }
    std::ptr::copy_nonoverlapping(value.to_array().as_ptr(), dst, 3);
    true
}

#[cfg(test)]
mod test {
    use super::ffi_to_rs_string;
    use crate::error::Error;

    #[test]
    fn test_ffi_to_rs_string() {
        let c_string = std::ffi::CString::new("{}").unwrap();
        assert_eq!(ffi_to_rs_string(c_string.as_ptr()).unwrap(), "{}");
        assert!(matches!(
            ffi_to_rs_string(std::ptr::null()),
            Err(Error::NullString)
        ));
    }

    #[test]
    fn test_ffi_to_rs_string_invalid_utf8() {
        let bytes = [0xC3u8, 0x28, 0x00];
        let result = ffi_to_rs_string(bytes.as_ptr() as *const std::ffi::c_char);
        assert!(matches!(result, Err(Error::Utf8(_))));
    }
}
