// Opaque request blocks and completion-result extraction.
use std::os::raw::{c_int, c_void};

use crate::core::alloc;
use crate::core::native::NativeApi;

/// Allocates one uninitialized block sized exactly to the native request
/// struct. Null on allocation failure. The caller populates it per the
/// native submission contract, submits it, and frees it afterwards.
pub fn alloc_req(api: &NativeApi) -> *mut c_void {
    alloc::alloc_block(api.req_size())
}

/// Reads the completion result at full native `ssize_t` width. Negative is a
/// native error code, non-negative a success magnitude such as bytes
/// transferred.
///
/// # Safety
/// `req` must point to a request the native library has completed. Reading
/// before completion yields an undefined value; sequencing is the caller's
/// responsibility.
pub unsafe fn req_result(api: &NativeApi, req: *const c_void) -> i64 {
    unsafe { api.req_result(req) }
}

/// Compatibility form of [`req_result`] for bindings built around the
/// historical `int`-wide accessor. Values outside `c_int` range truncate by
/// two's-complement wrap; they are not clamped or corrected.
///
/// # Safety
/// Same as [`req_result`].
pub unsafe fn req_result_int(api: &NativeApi, req: *const c_void) -> c_int {
    unsafe { api.req_result(req) as c_int }
}
