// malloc-backed allocation primitives. Everything handed out here is released
// by the caller with plain free(), never by this crate.
use std::os::raw::c_void;
use std::ptr;

#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
thread_local! {
    // Number of upcoming allocations forced to fail, for simulating an
    // exhausted allocator.
    pub(crate) static FAIL_ALLOCS: Cell<u32> = const { Cell::new(0) };
}

#[cfg(test)]
fn fail_injected() -> bool {
    FAIL_ALLOCS.with(|fails| {
        let remaining = fails.get();
        if remaining == 0 {
            return false;
        }
        fails.set(remaining - 1);
        true
    })
}

/// Allocates one uninitialized block. A zero `size` is rounded up to one byte
/// so every success is a distinct, free()-able pointer; `malloc(0)` is
/// implementation-defined. Null on allocation failure, with no other effect.
pub fn alloc_block(size: usize) -> *mut c_void {
    #[cfg(test)]
    if fail_injected() {
        return ptr::null_mut();
    }
    unsafe { libc::malloc(size.max(1)) }
}

/// Allocates an uninitialized array of `count` elements of `elem_size` bytes.
/// Null on multiplication overflow or allocation failure; never partial.
pub fn alloc_array(elem_size: usize, count: usize) -> *mut c_void {
    match elem_size.checked_mul(count) {
        Some(total) => alloc_block(total),
        None => ptr::null_mut(),
    }
}

/// Copies `len` bytes starting at `src` into a newly owned heap buffer.
/// The managed runtime may move or reclaim its own buffers while an async
/// operation is in flight, so the bytes are transferred into unmanaged
/// memory before submission and released by the caller afterwards.
///
/// # Safety
/// `src` must be readable for `len` bytes; it may be null only when `len`
/// is 0.
pub unsafe fn duplicate(src: *const u8, len: usize) -> *mut u8 {
    let copy = alloc_block(len);
    if copy.is_null() {
        return ptr::null_mut();
    }
    if len > 0 {
        unsafe {
            libc::memcpy(copy, src as *const c_void, len);
        }
    }
    copy as *mut u8
}
