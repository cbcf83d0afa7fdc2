use std::ptr;

use crate::error;
use crate::types::{NdcBuffer, NdcResult};

/// Drop any library-owned payload held by the buffer.
pub(crate) fn release_payload(buffer: &mut NdcBuffer) {
    if !buffer.data.is_null() {
        let slice_ptr = ptr::slice_from_raw_parts_mut(buffer.data, buffer.len);
        // SAFETY: `data` was allocated by `Box<[u8]>` in `write_payload`.
        unsafe {
            drop(Box::from_raw(slice_ptr));
        }
    }
    buffer.data = ptr::null_mut();
    buffer.len = 0;
}

/// Replace the buffer contents with `payload`, growing as needed.
pub(crate) fn write_payload(buffer: &mut NdcBuffer, payload: &[u8]) {
    release_payload(buffer);

    let boxed: Box<[u8]> = payload.to_vec().into_boxed_slice();
    let len = boxed.len();
    buffer.data = if len == 0 {
        ptr::null_mut()
    } else {
        Box::into_raw(boxed) as *mut u8
    };
    buffer.len = len;
}

/// Borrow the buffer contents as a slice.
///
/// # Safety
/// `buffer.data` must be null or valid for `buffer.len` readable bytes.
pub(crate) unsafe fn payload_slice<'a>(buffer: &NdcBuffer) -> &'a [u8] {
    if buffer.data.is_null() {
        return &[];
    }
    // SAFETY: Pointer/length pairing is guaranteed by the caller.
    unsafe { std::slice::from_raw_parts(buffer.data, buffer.len) }
}

/// Copy a caller-owned message into the buffer.
///
/// # Safety
/// `buffer` must be null or point to a valid `NdcBuffer`. If `len > 0`,
/// `data` must be non-null and readable for `len` bytes. Any existing
/// payload in the buffer must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn ndc_buffer_set(
    buffer: *mut NdcBuffer,
    data: *const u8,
    len: usize,
) -> NdcResult {
    crate::ffi_boundary(NdcResult::Internal, || {
        error::clear_error_state();

        if buffer.is_null() {
            return error::set_invalid_argument("buffer cannot be null");
        }
        if data.is_null() && len > 0 {
            return error::set_invalid_argument("data cannot be null when len > 0");
        }

        let buffer_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *buffer }
        };
        let payload = if len == 0 {
            &[]
        } else {
            // SAFETY: Pointer and length are validated above.
            unsafe { std::slice::from_raw_parts(data, len) }
        };

        write_payload(buffer_ref, payload);
        NdcResult::Ok
    })
}

/// Free payload memory held by an [`NdcBuffer`].
///
/// # Safety
/// `buffer` must be either null or a valid pointer to an `NdcBuffer`. If
/// `buffer->data` is non-null, it must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn ndc_buffer_free(buffer: *mut NdcBuffer) {
    crate::ffi_boundary((), || {
        if buffer.is_null() {
            return;
        }

        let buffer_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *buffer }
        };
        release_payload(buffer_ref);
    });
}
