//! Purpose: The one record of native struct-layout knowledge in the process.
//! Exports: `RawNativeApi` (C-visible descriptor), `NativeApi` (validated form).
//! Role: Everything the native library never specifies (sizes, field encodings)
//! enters the crate through this descriptor and nowhere else.
//! Invariants: A `NativeApi` only exists after full validation; sizes are
//! nonzero and both accessor pointers are present.
use std::os::raw::{c_char, c_uint, c_void};

use crate::core::error::{Error, ErrorKind};

/// Writes one scatter/gather descriptor slot, the native library's own
/// construction routine (for libuv, `*(uv_buf_t*)slot = uv_buf_init(base, len)`).
pub type BufInitFn = unsafe extern "C" fn(slot: *mut c_void, base: *mut c_char, len: c_uint);

/// Reads the completion result field of a request at native `ssize_t` width
/// (for libuv, `uv_fs_get_result`).
pub type ReqResultFn = unsafe extern "C" fn(req: *const c_void) -> i64;

/// Layout descriptor filled in by the unit compiled against the native
/// library's headers. Sizes may equally come from the library's runtime
/// sizing functions (libuv's `uv_req_size(UV_FS)`).
#[repr(C)]
pub struct RawNativeApi {
    pub buf_size: usize,
    pub req_size: usize,
    pub buf_init: Option<BufInitFn>,
    pub req_result: Option<ReqResultFn>,
}

/// Validated descriptor. Copy semantics: two `usize`s and two code pointers.
#[derive(Clone, Copy, Debug)]
pub struct NativeApi {
    buf_size: usize,
    req_size: usize,
    buf_init: BufInitFn,
    req_result: ReqResultFn,
}

impl NativeApi {
    pub fn new(raw: &RawNativeApi) -> Result<Self, Error> {
        if raw.buf_size == 0 {
            return Err(Error::new(ErrorKind::Usage).with_message("buf_size is zero"));
        }
        if raw.req_size == 0 {
            return Err(Error::new(ErrorKind::Usage).with_message("req_size is zero"));
        }
        let buf_init = raw
            .buf_init
            .ok_or_else(|| Error::new(ErrorKind::Usage).with_message("buf_init is null"))?;
        let req_result = raw
            .req_result
            .ok_or_else(|| Error::new(ErrorKind::Usage).with_message("req_result is null"))?;
        Ok(Self {
            buf_size: raw.buf_size,
            req_size: raw.req_size,
            buf_init,
            req_result,
        })
    }

    /// # Safety
    /// `raw`, when non-null, must point to a live `RawNativeApi`.
    pub unsafe fn from_raw(raw: *const RawNativeApi) -> Result<Self, Error> {
        if raw.is_null() {
            return Err(Error::new(ErrorKind::Usage).with_message("native api is null"));
        }
        Self::new(unsafe { &*raw })
    }

    pub fn buf_size(&self) -> usize {
        self.buf_size
    }

    pub fn req_size(&self) -> usize {
        self.req_size
    }

    /// # Safety
    /// `slot` must be writable for `buf_size` bytes; `base` must be valid for
    /// `len` bytes, or null with `len == 0`.
    pub unsafe fn buf_init(&self, slot: *mut c_void, base: *mut c_char, len: c_uint) {
        unsafe { (self.buf_init)(slot, base, len) }
    }

    /// # Safety
    /// `req` must point to a request the native library has completed; the
    /// value read from an unsubmitted request is undefined, not an error.
    pub unsafe fn req_result(&self, req: *const c_void) -> i64 {
        unsafe { (self.req_result)(req) }
    }
}
