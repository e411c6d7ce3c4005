use std::ffi::CString;
use std::os::raw::c_char;

/// C-compatible result envelope for all FFI calls.
///
/// Both `data` and `error` are heap-allocated C strings owned by this struct.
/// The caller must free the entire envelope (including the inner strings) by
/// passing the pointer to `textcmp_free`.
#[repr(C)]
pub struct TextcmpResult {
    /// `true` on success, `false` on failure.
    pub ok: bool,
    /// JSON payload on success; null pointer on failure.
    pub data: *mut c_char,
    /// Error message on failure; null pointer on success.
    pub error: *mut c_char,
}

impl TextcmpResult {
    /// Allocate a successful result whose data field holds `json`.
    ///
    /// Ownership passes to the caller, who must eventually call `textcmp_free`.
    pub fn success(json: CString) -> *mut Self {
        Box::into_raw(Box::new(TextcmpResult {
            ok: true,
            data: json.into_raw(),
            error: std::ptr::null_mut(),
        }))
    }

    /// Allocate a failure result whose error field holds `message`.
    ///
    /// Interior NUL bytes in `message` are replaced so the text survives the
    /// trip through a C string.
    pub fn failure(message: &str) -> *mut Self {
        let error = CString::new(message.replace('\0', "\u{FFFD}")).unwrap_or_default();

        Box::into_raw(Box::new(TextcmpResult {
            ok: false,
            data: std::ptr::null_mut(),
            error: error.into_raw(),
        }))
    }

    /// Reclaim ownership of the inner C strings and the struct itself.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a pointer produced by `TextcmpResult::success`
    /// or `TextcmpResult::failure` that has not been freed already.
    pub unsafe fn free(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }

        let result = Box::from_raw(ptr);

        if !result.data.is_null() {
            drop(CString::from_raw(result.data));
        }

        if !result.error.is_null() {
            drop(CString::from_raw(result.error));
        }
    }
}
