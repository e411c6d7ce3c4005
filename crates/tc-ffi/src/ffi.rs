use std::os::raw::c_char;

use serde::Serialize;

use tc_compare::{CompareConfig, CompareEngine, ComparisonResult};
use tc_core::{ComparisonRequest, Result, WireRequest};

use crate::marshal::{cstring_to_str, deserialize_json, json_to_cstring, optional_cstring_to_str};
use crate::result::TextcmpResult;

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free a `TextcmpResult` that was returned by any `textcmp_*` function.
///
/// Passing a null pointer is a no-op.
///
/// # Safety
///
/// `ptr` must be either null or a valid pointer that was previously returned
/// by one of the `textcmp_*` functions and has not yet been freed.
#[no_mangle]
pub unsafe extern "C" fn textcmp_free(ptr: *mut TextcmpResult) {
    TextcmpResult::free(ptr);
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare two documents.
///
/// `request_json` — null-terminated UTF-8 JSON object:
///   `{"left": string, "right": string, "mode": string, "granularity"?: string}`
/// `config_json`  — null-terminated UTF-8 JSON `CompareConfig`, or null for
///                  defaults.
///
/// Returns a `TextcmpResult` whose `data` field is the `ComparisonResult`
/// JSON object on success. An unsupported mode or granularity yields a
/// failure whose message starts with `invalid request`.
///
/// The returned pointer must be freed with `textcmp_free`.
///
/// # Safety
///
/// `request_json` must be a valid, non-null, null-terminated C string.
/// `config_json` must be null or a valid, null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn textcmp_compare(
    request_json: *const c_char,
    config_json: *const c_char,
) -> *mut TextcmpResult {
    let engine = match engine_from(config_json) {
        Ok(e) => e,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };
    let request = match request_from(request_json) {
        Ok(r) => r,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };

    match engine.compare(&request) {
        Ok(result) => respond(&result),
        Err(e) => TextcmpResult::failure(&e.to_string()),
    }
}

/// One entry of a batch response.
#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Ok { ok: bool, result: ComparisonResult },
    Err { ok: bool, error: String },
}

/// Compare many document pairs in parallel.
///
/// `requests_json` — null-terminated UTF-8 JSON array of request objects
///                   (same shape as for `textcmp_compare`).
/// `config_json`   — null-terminated UTF-8 JSON `CompareConfig`, or null.
///
/// Returns a `TextcmpResult` whose `data` field is a JSON array with one
/// entry per request, in input order: `{"ok": true, "result": {...}}` or
/// `{"ok": false, "error": "..."}`. A single invalid request does not fail
/// the batch; malformed JSON for the array itself does.
///
/// The returned pointer must be freed with `textcmp_free`.
///
/// # Safety
///
/// `requests_json` must be a valid, non-null, null-terminated C string.
/// `config_json` must be null or a valid, null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn textcmp_compare_batch(
    requests_json: *const c_char,
    config_json: *const c_char,
) -> *mut TextcmpResult {
    let engine = match engine_from(config_json) {
        Ok(e) => e,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };
    let json = match cstring_to_str(requests_json, "requests_json") {
        Ok(s) => s,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };
    let wire: Vec<WireRequest> = match deserialize_json(&json) {
        Ok(w) => w,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };

    // Parse failures keep their slot; only parsed requests reach the engine.
    let parsed: Vec<Result<ComparisonRequest>> =
        wire.into_iter().map(ComparisonRequest::try_from).collect();
    let valid: Vec<ComparisonRequest> = parsed
        .iter()
        .filter_map(|p| p.as_ref().ok().cloned())
        .collect();

    let mut computed = match engine.compare_batch(&valid) {
        Ok(results) => results.into_iter(),
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };

    let mut entries = Vec::with_capacity(parsed.len());
    for slot in parsed {
        let entry = match slot {
            Err(e) => BatchEntry::Err {
                ok: false,
                error: e.to_string(),
            },
            Ok(_) => match computed.next() {
                Some(Ok(result)) => BatchEntry::Ok { ok: true, result },
                Some(Err(e)) => BatchEntry::Err {
                    ok: false,
                    error: e.to_string(),
                },
                None => BatchEntry::Err {
                    ok: false,
                    error: "internal error: batch result missing".to_string(),
                },
            },
        };
        entries.push(entry);
    }

    respond(&entries)
}

/// Diff two documents line by line and return numbered display rows.
///
/// `request_json` must describe a `diff` request with `line` granularity
/// (the default when granularity is omitted).
///
/// Returns a `TextcmpResult` whose `data` field is a `RenderedDiff` JSON
/// object (`{"lines": [...], "stats": {...}}`) on success.
///
/// The returned pointer must be freed with `textcmp_free`.
///
/// # Safety
///
/// `request_json` must be a valid, non-null, null-terminated C string.
/// `config_json` must be null or a valid, null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn textcmp_render_lines(
    request_json: *const c_char,
    config_json: *const c_char,
) -> *mut TextcmpResult {
    let engine = match engine_from(config_json) {
        Ok(e) => e,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };
    let request = match request_from(request_json) {
        Ok(r) => r,
        Err(e) => return TextcmpResult::failure(&e.to_string()),
    };

    match engine.render_lines(&request) {
        Ok(rendered) => respond(&rendered),
        Err(e) => TextcmpResult::failure(&e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Build an engine from an optional JSON config pointer.
unsafe fn engine_from(config_json: *const c_char) -> Result<CompareEngine> {
    let config = match optional_cstring_to_str(config_json, "config_json")? {
        Some(json) => CompareConfig::from_json(&json)?,
        None => CompareConfig::default(),
    };
    Ok(CompareEngine::new(config))
}

/// Read and parse a request JSON pointer.
unsafe fn request_from(request_json: *const c_char) -> Result<ComparisonRequest> {
    let json = cstring_to_str(request_json, "request_json")?;
    ComparisonRequest::from_json(&json)
}

fn respond(value: &impl Serialize) -> *mut TextcmpResult {
    match json_to_cstring(value) {
        Ok(json) => TextcmpResult::success(json),
        Err(e) => TextcmpResult::failure(&e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
