//! FFI bindings for the camera and geolocation shells.

use crate::{SdkResponse, into_c_string, read_json_arg, with_handle};
use serde::Deserialize;
use std::ffi::c_char;

#[derive(Deserialize)]
struct PhotoCapturedRequest {
    uri: String,
}

#[derive(Deserialize)]
struct LocationSampledRequest {
    lat: f64,
    lng: f64,
    accuracy: f64,
}

/// Records a captured photo.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_photo_captured(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = photo_captured_inner(json);
        into_c_string(&response)
    }
}

unsafe fn photo_captured_inner(json: *const c_char) -> SdkResponse {
    let req: PhotoCapturedRequest = match unsafe { read_json_arg(json) } {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    if req.uri.trim().is_empty() {
        return SdkResponse::err("invalid_argument", "Photo URI is empty");
    }
    with_handle(|h| SdkResponse::ok_serialized(&h.store.on_photo_captured(&req.uri)))
}

/// Records a location sample.
///
/// Platform APIs report accuracy as a float; it is rounded to whole meters.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_location_sampled(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = location_sampled_inner(json);
        into_c_string(&response)
    }
}

unsafe fn location_sampled_inner(json: *const c_char) -> SdkResponse {
    let req: LocationSampledRequest = match unsafe { read_json_arg(json) } {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lng) {
        return SdkResponse::err("invalid_argument", "Coordinates out of range");
    }
    if !req.accuracy.is_finite() || req.accuracy < 0.0 {
        return SdkResponse::err("invalid_argument", "Accuracy must be a non-negative number");
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let accuracy = req.accuracy.round().min(f64::from(u32::MAX)) as u32;
    with_handle(|h| match h.store.on_location_sampled(req.lat, req.lng, accuracy) {
        Ok(entry) => SdkResponse::ok_serialized(&entry),
        Err(e) => SdkResponse::err("invalid_argument", &e.to_string()),
    })
}
