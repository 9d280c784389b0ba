//! Purpose: C ABI surface for managed-language bindings (libuvshim).
//! Exports: C-callable `uvsh_*` allocation, descriptor, duplication, and
//! result-extraction functions.
//! Role: The flat boundary a ctypes/ffi-style binding calls; every layout
//! assumption stays on this side of it.
//! Invariants: Null pointer is the universal allocation-failure sentinel.
//! Invariants: Every block handed out is malloc-backed and released by the
//! caller with free(); the bound descriptor handle is the one exception and
//! is released with `uvsh_native_free`.
//! Invariants: Nothing here retains or re-touches memory after returning it.
#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::ptr;

use crate::core::alloc;
use crate::core::descriptor;
use crate::core::native::{NativeApi, RawNativeApi};
use crate::core::request;

pub type uvsh_native_api = RawNativeApi;

#[repr(C)]
pub struct uvsh_native {
    api: NativeApi,
}

// UV_EINVAL-shaped sentinel for a null argument where a result is expected.
// Correct sequencing never routes a caller here.
const NULL_ARG_RESULT: i64 = -22;

/// Validates the layout descriptor and returns an opaque handle holding a
/// private copy of it. Null if the descriptor is null or malformed.
#[unsafe(no_mangle)]
pub extern "C" fn uvsh_native_bind(raw: *const uvsh_native_api) -> *mut uvsh_native {
    let api = match unsafe { NativeApi::from_raw(raw) } {
        Ok(api) => api,
        Err(err) => {
            tracing::debug!(error = %err, "rejected native api descriptor");
            return ptr::null_mut();
        }
    };
    tracing::debug!(
        buf_size = api.buf_size(),
        req_size = api.req_size(),
        "bound native api descriptor"
    );
    Box::into_raw(Box::new(uvsh_native { api }))
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_native_free(native: *mut uvsh_native) {
    if native.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(native));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_buf_alloc(native: *const uvsh_native, count: usize) -> *mut c_void {
    let Some(api) = borrow_native(native) else {
        return ptr::null_mut();
    };
    let array = descriptor::alloc_bufs(api, count);
    if array.is_null() {
        tracing::trace!(count, "descriptor array allocation failed");
    }
    array
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_buf_set(
    native: *const uvsh_native,
    array: *mut c_void,
    index: usize,
    base: *mut c_char,
    len: c_uint,
) {
    let Some(api) = borrow_native(native) else {
        return;
    };
    if array.is_null() {
        return;
    }
    unsafe {
        descriptor::set_buf(api, array, index, base, len);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_buf_at(
    native: *const uvsh_native,
    array: *mut c_void,
    index: usize,
) -> *mut c_void {
    let Some(api) = borrow_native(native) else {
        return ptr::null_mut();
    };
    if array.is_null() {
        return ptr::null_mut();
    }
    unsafe { descriptor::buf_slot(api, array, index) }
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_buf_dup(src: *const c_char, len: usize) -> *mut c_char {
    if src.is_null() && len != 0 {
        return ptr::null_mut();
    }
    let copy = unsafe { alloc::duplicate(src as *const u8, len) };
    if copy.is_null() {
        tracing::trace!(len, "buffer duplication failed");
    }
    copy as *mut c_char
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_req_alloc(native: *const uvsh_native) -> *mut c_void {
    let Some(api) = borrow_native(native) else {
        return ptr::null_mut();
    };
    let req = request::alloc_req(api);
    if req.is_null() {
        tracing::trace!(req_size = api.req_size(), "request allocation failed");
    }
    req
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_req_result(native: *const uvsh_native, req: *const c_void) -> i64 {
    let Some(api) = borrow_native(native) else {
        return NULL_ARG_RESULT;
    };
    if req.is_null() {
        return NULL_ARG_RESULT;
    }
    unsafe { request::req_result(api, req) }
}

#[unsafe(no_mangle)]
pub extern "C" fn uvsh_req_result_int(native: *const uvsh_native, req: *const c_void) -> c_int {
    let Some(api) = borrow_native(native) else {
        return NULL_ARG_RESULT as c_int;
    };
    if req.is_null() {
        return NULL_ARG_RESULT as c_int;
    }
    unsafe { request::req_result_int(api, req) }
}

fn borrow_native<'a>(native: *const uvsh_native) -> Option<&'a NativeApi> {
    if native.is_null() {
        return None;
    }
    Some(unsafe { &(*native).api })
}

#[cfg(test)]
mod tests {
    use super::{
        uvsh_buf_alloc, uvsh_buf_dup, uvsh_buf_set, uvsh_native_bind, uvsh_native_free,
        uvsh_req_alloc, uvsh_req_result, uvsh_req_result_int, NULL_ARG_RESULT,
    };
    use crate::core::alloc::FAIL_ALLOCS;
    use crate::core::sim;
    use std::os::raw::c_void;
    use std::ptr;

    #[test]
    fn bind_rejects_null_and_malformed_descriptors() {
        assert!(uvsh_native_bind(ptr::null()).is_null());

        let mut raw = sim::raw();
        raw.buf_init = None;
        assert!(uvsh_native_bind(&raw).is_null());

        let mut raw = sim::raw();
        raw.req_size = 0;
        assert!(uvsh_native_bind(&raw).is_null());
    }

    #[test]
    fn null_handle_makes_every_operation_inert() {
        assert!(uvsh_buf_alloc(ptr::null(), 4).is_null());
        assert!(uvsh_req_alloc(ptr::null()).is_null());
        // No handle to consult, so the set is a no-op rather than a crash.
        uvsh_buf_set(ptr::null(), ptr::null_mut(), 0, ptr::null_mut(), 0);
        assert_eq!(uvsh_req_result(ptr::null(), ptr::null()), NULL_ARG_RESULT);
        assert_eq!(
            uvsh_req_result_int(ptr::null(), ptr::null()),
            NULL_ARG_RESULT as i32
        );
    }

    #[test]
    fn exhausted_allocator_yields_the_null_sentinel_everywhere() {
        let raw = sim::raw();
        let native = uvsh_native_bind(&raw);
        assert!(!native.is_null());

        FAIL_ALLOCS.with(|fails| fails.set(3));
        assert!(uvsh_buf_alloc(native, 4).is_null());
        assert!(uvsh_req_alloc(native).is_null());
        assert!(uvsh_buf_dup(b"xyz\0".as_ptr() as *const _, 3).is_null());

        // Same calls succeed once the allocator recovers.
        let array = uvsh_buf_alloc(native, 4);
        let req = uvsh_req_alloc(native);
        let dup = uvsh_buf_dup(b"xyz\0".as_ptr() as *const _, 3);
        assert!(!array.is_null());
        assert!(!req.is_null());
        assert!(!dup.is_null());
        unsafe {
            libc::free(array);
            libc::free(req);
            libc::free(dup as *mut c_void);
        }
        uvsh_native_free(native);
    }

    #[test]
    fn dup_of_null_source_with_nonzero_len_is_rejected() {
        assert!(uvsh_buf_dup(ptr::null(), 8).is_null());
    }
}
