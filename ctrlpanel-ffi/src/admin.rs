//! FFI bindings for the admin tab.

use crate::{SdkResponse, into_c_string, read_json_arg, with_handle};
use ctrlpanel_store::StoreError;
use serde::Deserialize;
use std::ffi::c_char;

#[derive(Deserialize)]
struct SetEmailRequest {
    email: String,
}

#[derive(Deserialize)]
struct SetOnlineRequest {
    online: bool,
}

#[derive(Deserialize)]
struct AddFeatureRequest {
    name: String,
    description: String,
    #[serde(default)]
    category: String,
}

#[derive(Deserialize)]
struct FeatureIdRequest {
    id: String,
}

#[derive(Deserialize)]
struct EmailIdRequest {
    id: String,
}

fn store_error(e: &StoreError) -> SdkResponse {
    let code = match e {
        StoreError::Validation(_) => "validation_error",
        StoreError::NotFound(_) => "not_found",
        StoreError::Handoff(_) => "handoff_error",
    };
    SdkResponse::err(code, &e.to_string())
}

/// Sets the address `sync-email` summaries are queued for.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_set_email_address(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<SetEmailRequest>(json) {
            Ok(req) => with_handle(|h| {
                h.store.with(|s| s.set_email_address(&req.email));
                SdkResponse::ok_empty()
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Updates the connectivity flag.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_set_online(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<SetOnlineRequest>(json) {
            Ok(req) => with_handle(|h| {
                h.store.with(|s| s.set_online(req.online));
                SdkResponse::ok_empty()
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Adds a feature from the admin form.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_add_feature(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<AddFeatureRequest>(json) {
            Ok(req) => with_handle(|h| {
                match h
                    .store
                    .with(|s| s.add_feature(&req.name, &req.description, &req.category))
                {
                    Ok(feature) => SdkResponse::ok_serialized(&feature),
                    Err(e) => store_error(&e),
                }
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Flips a feature's enabled flag.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_toggle_feature(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<FeatureIdRequest>(json) {
            Ok(req) => with_handle(|h| match h.store.with(|s| s.toggle_feature(&req.id)) {
                Ok(feature) => SdkResponse::ok_serialized(&feature),
                Err(e) => store_error(&e),
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Removes a feature. Unknown ids succeed with `"removed": false`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_remove_feature(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<FeatureIdRequest>(json) {
            Ok(req) => with_handle(|h| {
                let removed = h.store.with(|s| s.remove_feature(&req.id));
                SdkResponse::ok(serde_json::json!({ "removed": removed.is_some() }))
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Records that the platform mail client accepted a queued email.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_mark_email_sent(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = match read_json_arg::<EmailIdRequest>(json) {
            Ok(req) => with_handle(|h| match h.store.with(|s| s.mark_email_sent(&req.id)) {
                Ok(item) => SdkResponse::ok_serialized(&item),
                Err(e) => store_error(&e),
            }),
            Err(resp) => resp,
        };
        into_c_string(&response)
    }
}

/// Drops every queued email already marked sent.
#[unsafe(no_mangle)]
pub extern "C" fn ctrlpanel_clear_sent_emails() -> *mut c_char {
    let response = with_handle(|h| {
        let removed = h.store.with(|s| s.clear_sent_emails());
        SdkResponse::ok(serde_json::json!({ "removed": removed }))
    });
    into_c_string(&response)
}
