//! ndcshim-ffi: C-ABI exports for the NDC recycler shim.
//!
//! The host terminal-control stack loads this library in line with its
//! message pump and calls [`ndc_incoming`]/[`ndc_outgoing`] for every
//! protocol message. Both always return [`NDC_CONTINUE`]: nothing the shim
//! does may block the host channel, so every failure path degrades to
//! passing the original bytes through.

mod buffer;
mod error;
mod logging;
mod types;

use std::os::raw::c_char;
use std::panic::AssertUnwindSafe;
use std::sync::OnceLock;

use ndcshim_config::Store;
use tracing::{error as log_error, info};

pub use buffer::{ndc_buffer_free, ndc_buffer_set};
pub use types::{
    NdcBuffer, NdcResult, NDC_CONFIG_FALLBACK, NDC_CONTINUE, NDC_ERR_INTERNAL,
    NDC_ERR_INVALID_ARGUMENT, NDC_OK,
};

/// Immutable per-process state; set once, before any intercept call.
static SHIM: OnceLock<Store> = OnceLock::new();

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

/// Initialize the shim: load the configuration store and install logging.
///
/// Idempotent; the first call wins and establishes the happens-before
/// barrier for all intercept calls. A missing or malformed configuration
/// never fails initialization — the shim comes up with empty tables (pure
/// pass-through) and reports `ConfigFallback` so the host can notice.
///
/// # Safety
/// `config_path` and `log_path` must each be null or point to a valid
/// NUL-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn ndc_init(
    config_path: *const c_char,
    log_path: *const c_char,
) -> NdcResult {
    ffi_boundary(NdcResult::Internal, || {
        error::clear_error_state();

        if let Some(path) = {
            // SAFETY: Caller guarantees null or a valid C string.
            unsafe { optional_str_arg(log_path) }
        } {
            logging::init_file_logging(path);
        }

        let config_path = {
            // SAFETY: Caller guarantees null or a valid C string.
            unsafe { optional_str_arg(config_path) }
        };

        let mut fallback = false;
        SHIM.get_or_init(|| match config_path {
            Some(path) => match Store::from_path(path) {
                Ok(store) => {
                    info!(path, "shim initialized");
                    store
                }
                Err(err) => {
                    log_error!(path, %err, "configuration unavailable, shim is pass-through");
                    error::set_error_message(err.to_string());
                    fallback = true;
                    Store::default()
                }
            },
            None => {
                info!("shim initialized without configuration, pass-through only");
                Store::default()
            }
        });

        if fallback {
            NdcResult::ConfigFallback
        } else {
            NdcResult::Ok
        }
    })
}

/// Intercept a controller-to-peripheral message.
///
/// # Safety
/// `buffer` must be null or a valid `NdcBuffer` whose payload was populated
/// via `ndc_buffer_set` (or by a previous intercept call).
#[no_mangle]
pub unsafe extern "C" fn ndc_incoming(buffer: *mut NdcBuffer) -> u8 {
    // SAFETY: Contract forwarded to `intercept`.
    unsafe { intercept(buffer) }
}

/// Intercept a peripheral-to-controller message.
///
/// # Safety
/// Same contract as [`ndc_incoming`].
#[no_mangle]
pub unsafe extern "C" fn ndc_outgoing(buffer: *mut NdcBuffer) -> u8 {
    // SAFETY: Contract forwarded to `intercept`.
    unsafe { intercept(buffer) }
}

/// Last error text for the calling thread (empty when none).
#[no_mangle]
pub extern "C" fn ndc_last_error() -> *const c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

/// Clear the calling thread's error state.
#[no_mangle]
pub extern "C" fn ndc_cleanup() {
    ffi_boundary((), || {
        error::clear_error_state();
    });
}

unsafe fn intercept(buffer: *mut NdcBuffer) -> u8 {
    ffi_boundary(NDC_CONTINUE, || {
        if buffer.is_null() {
            let _ = error::set_invalid_argument("buffer cannot be null");
            return NDC_CONTINUE;
        }

        // Uninitialized shim: nothing to rewrite with, pass through.
        let Some(store) = SHIM.get() else {
            return NDC_CONTINUE;
        };

        let buffer_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *buffer }
        };
        let input = {
            // SAFETY: Payload originated from ndc_buffer_set/write_payload.
            unsafe { buffer::payload_slice(buffer_ref) }
        };

        if let Some(rewritten) = ndcshim_rules::rewrite(input, store) {
            buffer::write_payload(buffer_ref, &rewritten);
        }

        NDC_CONTINUE
    })
}

/// Convert an optional C string argument into UTF-8 `&str`.
///
/// # Safety
/// `value` must be null or point to a valid NUL-terminated C string.
unsafe fn optional_str_arg<'a>(value: *const c_char) -> Option<&'a str> {
    if value.is_null() {
        return None;
    }

    let as_cstr = {
        // SAFETY: The caller guarantees `value` points to a valid NUL-terminated C string.
        unsafe { std::ffi::CStr::from_ptr(value) }
    };
    as_cstr.to_str().ok()
}
