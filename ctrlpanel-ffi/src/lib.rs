//! C ABI bindings for the control panel core.
//!
//! Every export takes at most one null-terminated UTF-8 JSON argument and
//! returns a JSON [`SdkResponse`] string that must be released with
//! [`ctrlpanel_free_string`]. The core lives in a process-wide handle set
//! up by [`ctrlpanel_init`] and torn down by [`ctrlpanel_shutdown`].

mod admin;
mod capture;
mod commands;

pub use admin::{
    ctrlpanel_add_feature, ctrlpanel_clear_sent_emails, ctrlpanel_mark_email_sent,
    ctrlpanel_remove_feature, ctrlpanel_set_email_address, ctrlpanel_set_online,
    ctrlpanel_toggle_feature,
};
pub use capture::{ctrlpanel_location_sampled, ctrlpanel_photo_captured};
pub use commands::ctrlpanel_execute;

use ctrlpanel_command::{CommandInterpreter, Console, InterpreterConfig};
use ctrlpanel_storage::{
    GatewayConfig, KeyValueBackend, MemoryBackend, PersistenceGateway, SqliteBackend, WriteQueue,
};
use ctrlpanel_store::{EntityStore, SharedStore, StoreCapabilities, StoreConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ffi::{CStr, CString, c_char};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// Uniform response envelope returned by every export.
#[derive(Debug, Serialize)]
pub struct SdkResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SdkResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            error_code: None,
            error_message: None,
            data: Some(data),
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            error_code: None,
            error_message: None,
            data: None,
        }
    }

    pub fn err(code: &str, message: &str) -> Self {
        Self {
            success: false,
            error_code: Some(code.to_string()),
            error_message: Some(message.to_string()),
            data: None,
        }
    }

    /// Serializes `value` as the response data.
    pub fn ok_serialized<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err("json_error", &format!("Failed to serialize data: {e}")),
        }
    }
}

/// Arguments to [`ctrlpanel_init`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// SQLite file path. Omitted means volatile in-memory storage.
    pub db_path: Option<String>,
    pub platform: Option<String>,
    pub write_timeout_ms: Option<u64>,
    pub seed_default_features: Option<bool>,
}

/// Everything the exports operate on.
pub(crate) struct RuntimeHandle {
    pub(crate) store: SharedStore,
    pub(crate) console: Console,
    queue: Arc<WriteQueue>,
    runtime: tokio::runtime::Runtime,
}

static HANDLE: Mutex<Option<RuntimeHandle>> = Mutex::new(None);

pub(crate) fn lock_handle() -> MutexGuard<'static, Option<RuntimeHandle>> {
    HANDLE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` against the live handle, or reports `not_initialized`.
pub(crate) fn with_handle(f: impl FnOnce(&RuntimeHandle) -> SdkResponse) -> SdkResponse {
    let guard = lock_handle();
    match guard.as_ref() {
        Some(handle) => f(handle),
        None => SdkResponse::err("not_initialized", "Control panel runtime not initialized"),
    }
}

pub(crate) fn into_c_string(response: &SdkResponse) -> *mut c_char {
    let json_out = serde_json::to_string(response).unwrap_or_else(|_| {
        r#"{"success":false,"error_code":"json_error","error_message":"Failed to serialize response"}"#.to_string()
    });
    CString::new(json_out).unwrap_or_default().into_raw()
}

/// Decodes the JSON argument of an export.
///
/// # Safety
/// `json` must be null or a valid null-terminated string.
pub(crate) unsafe fn read_json_arg<T: DeserializeOwned>(
    json: *const c_char,
) -> Result<T, SdkResponse> {
    if json.is_null() {
        return Err(SdkResponse::err("null_pointer", "JSON is null"));
    }
    let json_str = unsafe { CStr::from_ptr(json) }
        .to_str()
        .map_err(|_| SdkResponse::err("invalid_utf8", "JSON is not valid UTF-8"))?;
    serde_json::from_str(json_str)
        .map_err(|e| SdkResponse::err("json_parse_error", &format!("Invalid JSON: {e}")))
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Already installed by the host or a previous init.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn build_handle(config: InitConfig) -> Result<RuntimeHandle, SdkResponse> {
    // Opened first: a runtime dropped on an error path would panic inside
    // an async host.
    let backend: Arc<dyn KeyValueBackend> = match &config.db_path {
        Some(path) => Arc::new(SqliteBackend::open(path).map_err(|e| {
            SdkResponse::err("storage_error", &format!("Failed to open database: {e}"))
        })?),
        None => Arc::new(MemoryBackend::new()),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("ctrlpanel-io")
        .enable_all()
        .build()
        .map_err(|e| SdkResponse::err("runtime_error", &format!("Failed to start runtime: {e}")))?;

    let mut gateway_config = GatewayConfig::default();
    if let Some(ms) = config.write_timeout_ms {
        gateway_config.write_timeout_ms = ms;
    }
    let gateway = PersistenceGateway::new(backend, gateway_config);
    let loaded = gateway.load();
    let queue = Arc::new(gateway.start_writer_on(runtime.handle()));

    let mut store_config = StoreConfig::default();
    if let Some(platform) = &config.platform {
        store_config.platform.clone_from(platform);
    }
    if let Some(seed) = config.seed_default_features {
        store_config.seed_default_features = seed;
    }
    let interpreter = CommandInterpreter::new(InterpreterConfig {
        platform: store_config.platform.clone(),
        ..InterpreterConfig::default()
    });

    let caps = StoreCapabilities::with_sink(queue.clone());
    let store = EntityStore::restore(loaded, store_config, caps);

    Ok(RuntimeHandle {
        store: SharedStore::new(store),
        console: Console::new(interpreter),
        queue,
        runtime,
    })
}

/// Initializes the runtime. Calling it again shuts the previous handle down,
/// flushing its pending writes, before the store is reloaded.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 JSON string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_init(json: *const c_char) -> *mut c_char {
    unsafe {
        let response = init_inner(json);
        into_c_string(&response)
    }
}

unsafe fn init_inner(json: *const c_char) -> SdkResponse {
    init_logging();
    let config: InitConfig = match unsafe { read_json_arg(json) } {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    // The old handle must finish its writes before the new one loads.
    let previous = lock_handle().take();
    if let Some(old) = previous {
        shutdown_handle(old);
    }
    let handle = match build_handle(config) {
        Ok(h) => h,
        Err(resp) => return resp,
    };
    *lock_handle() = Some(handle);
    info!("control panel runtime initialized");
    SdkResponse::ok_empty()
}

/// Flushes and stops a handle on a dedicated thread.
///
/// Blocking on or dropping a runtime panics when the calling thread is
/// itself inside a tokio runtime, which a host may well be.
fn shutdown_handle(handle: RuntimeHandle) {
    std::thread::scope(|s| {
        s.spawn(move || close_handle(handle));
    });
}

fn close_handle(handle: RuntimeHandle) {
    let RuntimeHandle {
        store,
        console,
        queue,
        runtime,
    } = handle;
    // The store holds the sink; drop it first so the queue can close.
    drop(console);
    drop(store);
    let flushed = runtime.block_on(async {
        tokio::time::timeout(Duration::from_secs(10), queue.flush()).await
    });
    match flushed {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "flush at shutdown failed"),
        Err(_) => warn!("flush at shutdown timed out"),
    }
    drop(queue);
    runtime.shutdown_timeout(Duration::from_secs(1));
}

/// Flushes pending writes and releases the runtime.
#[unsafe(no_mangle)]
pub extern "C" fn ctrlpanel_shutdown() -> *mut c_char {
    let handle = lock_handle().take();
    let response = match handle {
        Some(h) => {
            shutdown_handle(h);
            info!("control panel runtime shut down");
            SdkResponse::ok_empty()
        }
        None => SdkResponse::err("not_initialized", "Control panel runtime not initialized"),
    };
    into_c_string(&response)
}

/// Returns the full store snapshot.
#[unsafe(no_mangle)]
pub extern "C" fn ctrlpanel_snapshot() -> *mut c_char {
    let response = with_handle(|h| SdkResponse::ok_serialized(&h.store.snapshot()));
    into_c_string(&response)
}

/// Releases a string returned by any export.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by this library,
/// and must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ctrlpanel_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}
