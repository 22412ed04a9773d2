#![allow(non_snake_case)]

pub mod bookmark;
pub mod builder;
pub mod error;
pub mod jni_onload;
pub mod logger;
pub mod manipulator;

use crate::error::{Error, Result};
use jni::{objects::JFloatArray, sys::jlong, JNIEnv};

const ILLEGAL_ARGUMENT_EXCEPTION: &str = "java/lang/IllegalArgumentException";

pub(crate) fn to_handle(handle: jlong) -> u64 {
    handle as u64
}

pub(crate) fn to_jlong(handle: u64) -> jlong {
    handle as jlong
}

/// Logs a failed handle-producing call and hands `0` back to Java.
pub(crate) fn report_handle(operation: &str, result: Result<u64>) -> jlong {
    match result {
        Ok(handle) => to_jlong(handle),
        Err(err) => {
            log::warn!("{operation}: {err}");
            0
        }
    }
}

/// Raises `IllegalArgumentException` for a failed call unless a Java
/// exception is already pending.
pub(crate) fn throw_on_error<T>(env: &mut JNIEnv, operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{operation}: {err}");
            if !matches!(err, Error::Jni(jni::errors::Error::JavaException)) {
                if let Err(throw_err) = env.throw_new(ILLEGAL_ARGUMENT_EXCEPTION, err.to_string()) {
                    log::warn!("{operation}: {throw_err}");
                }
            }
            None
        }
    }
}

pub(crate) fn write_vec3(env: &mut JNIEnv, array: &JFloatArray, value: glam::Vec3) -> Result<()> {
    let length = env.get_array_length(array)?;
    if length < 3 {
        return Err(Error::ArrayTooShort(3, length.max(0) as usize));
    }
    env.set_float_array_region(array, 0, &value.to_array())?;
    Ok(())
}
