/// Result codes for initialization and buffer management calls.
///
/// The intercept entry points never use these: they always return
/// [`NDC_CONTINUE`] so the host channel is never blocked.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdcResult {
    Ok = 0,
    InvalidArgument = 1,
    ConfigFallback = 2,
    Internal = 99,
}

#[allow(dead_code)]
pub const NDC_OK: NdcResult = NdcResult::Ok;
#[allow(dead_code)]
pub const NDC_ERR_INVALID_ARGUMENT: NdcResult = NdcResult::InvalidArgument;
#[allow(dead_code)]
pub const NDC_CONFIG_FALLBACK: NdcResult = NdcResult::ConfigFallback;
#[allow(dead_code)]
pub const NDC_ERR_INTERNAL: NdcResult = NdcResult::Internal;

/// Fixed status returned to the host for every intercepted message.
pub const NDC_CONTINUE: u8 = 0;

/// A message buffer crossing the boundary.
///
/// `data` is either null or library-owned memory; populate it with
/// `ndc_buffer_set`, release it with `ndc_buffer_free`. The intercept calls
/// rewrite it in place, reallocating when the message grows.
#[repr(C)]
#[derive(Debug)]
pub struct NdcBuffer {
    pub data: *mut u8,
    pub len: usize,
}

impl Default for NdcBuffer {
    fn default() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
        }
    }
}
