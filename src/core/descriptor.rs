// Scatter/gather descriptor arrays: fixed-stride allocation and slot access.
// The stride comes from the native descriptor; slot encoding is delegated to
// the native library's own construction routine.
use std::os::raw::{c_char, c_uint, c_void};

use crate::core::alloc;
use crate::core::native::NativeApi;

/// Allocates an uninitialized array of `count` descriptors. Returns null on
/// allocation failure, never a partial array. Ownership transfers wholly to
/// the caller, who releases it with `free` after the native library is done
/// with it.
pub fn alloc_bufs(api: &NativeApi, count: usize) -> *mut c_void {
    alloc::alloc_array(api.buf_size(), count)
}

/// Address of descriptor `index` within `array`.
///
/// # Safety
/// `array` must be a descriptor array allocated for this `api` and `index`
/// must be within its allocated count.
pub unsafe fn buf_slot(api: &NativeApi, array: *mut c_void, index: usize) -> *mut c_void {
    unsafe { (array as *mut u8).add(index * api.buf_size()) as *mut c_void }
}

/// Writes descriptor `index` through the native construction routine.
///
/// # Safety
/// The `buf_slot` preconditions apply, and `base` must be valid for `len`
/// bytes, or null with `len == 0`.
pub unsafe fn set_buf(
    api: &NativeApi,
    array: *mut c_void,
    index: usize,
    base: *mut c_char,
    len: c_uint,
) {
    unsafe {
        let slot = buf_slot(api, array, index);
        api.buf_init(slot, base, len);
    }
}
