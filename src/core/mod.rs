// Core modules implementing allocation, descriptor access, and error modeling.
pub mod alloc;
pub mod descriptor;
pub mod error;
pub mod native;
pub mod request;

// Stand-in for the unit compiled against the native library's headers: POD
// structs whose layout the tests (and only the tests) are allowed to know.
#[cfg(test)]
pub(crate) mod sim {
    use std::mem::size_of;
    use std::os::raw::{c_char, c_uint, c_void};

    use crate::core::native::{NativeApi, RawNativeApi};

    // Field order is deliberately not (base, len) so nothing passes by
    // accident of matching the obvious layout.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct SimBuf {
        pub len: c_uint,
        pub base: *mut c_char,
    }

    #[repr(C)]
    pub struct SimReq {
        pub reserved: [u8; 24],
        pub result: i64,
        pub tail: [u8; 8],
    }

    pub unsafe extern "C" fn sim_buf_init(slot: *mut c_void, base: *mut c_char, len: c_uint) {
        unsafe {
            *(slot as *mut SimBuf) = SimBuf { len, base };
        }
    }

    pub unsafe extern "C" fn sim_req_result(req: *const c_void) -> i64 {
        unsafe { (*(req as *const SimReq)).result }
    }

    pub fn raw() -> RawNativeApi {
        RawNativeApi {
            buf_size: size_of::<SimBuf>(),
            req_size: size_of::<SimReq>(),
            buf_init: Some(sim_buf_init),
            req_result: Some(sim_req_result),
        }
    }

    pub fn api() -> NativeApi {
        NativeApi::new(&raw()).expect("sim native api")
    }
}
