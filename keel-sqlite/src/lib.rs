mod connection;
mod extract;
mod handle;

use std::{
    ffi::{CStr, c_char},
    ptr,
};

pub use connection::*;
pub(crate) use handle::*;

pub(crate) fn error_message_from_ptr<'a>(ptr: *const c_char) -> &'a str {
    unsafe {
        if ptr != ptr::null() {
            CStr::from_ptr(ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}
