//! Conversions between C strings and the engine's JSON types.
//!
//! Every helper reports failures as [`TcError`], so the text a host sees in
//! a failure envelope carries the same `invalid request` / `serialization
//! error` prefixes as errors raised by the engine itself.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::de::DeserializeOwned;
use serde::Serialize;

use tc_core::{Result, TcError};

/// Serialize `value` to JSON and wrap it in a `CString` for the host.
pub fn json_to_cstring(value: &impl Serialize) -> Result<CString> {
    let json = serde_json::to_string(value)?;
    CString::new(json)
        .map_err(|e| TcError::Internal(format!("response JSON contained a NUL byte: {}", e)))
}

/// Copy the NUL-terminated UTF-8 argument `name` out of host memory.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays alive
/// for the duration of this call.
pub unsafe fn cstring_to_str(ptr: *const c_char, name: &str) -> Result<String> {
    if ptr.is_null() {
        return Err(TcError::InvalidRequest(format!("{} is a null pointer", name)));
    }

    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|e| TcError::InvalidRequest(format!("{} is not valid UTF-8: {}", name, e)))
}

/// Like [`cstring_to_str`], but a null pointer means "not supplied".
///
/// # Safety
///
/// Same requirements as [`cstring_to_str`].
pub unsafe fn optional_cstring_to_str(ptr: *const c_char, name: &str) -> Result<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    cstring_to_str(ptr, name).map(Some)
}

/// Deserialize a JSON argument into `T`.
pub fn deserialize_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}
