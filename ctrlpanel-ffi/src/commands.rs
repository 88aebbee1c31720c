//! FFI binding for the terminal tab.

use crate::{SdkResponse, into_c_string, read_json_arg, with_handle};
use serde::Deserialize;
use std::ffi::c_char;

#[derive(Deserialize)]
struct ExecuteRequest {
    command: String,
}

/// Runs one command line and records it in the command log.
///
/// The command's own failure is still a successful call: `data` holds the
/// `CommandResult` with its `success` flag.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
/// The returned pointer must be freed with `ctrlpanel_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_execute(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = execute_inner(json);
        into_c_string(&response)
    }
}

unsafe fn execute_inner(json: *const c_char) -> SdkResponse {
    let req: ExecuteRequest = match unsafe { read_json_arg(json) } {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    with_handle(|h| {
        let result = h.console.run_shared(&h.store, &req.command);
        SdkResponse::ok_serialized(&result)
    })
}
