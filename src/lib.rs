pub mod core;
pub mod error;
pub mod config;
pub mod report;
pub mod ffi;
pub mod bench;

#[no_mangle]
pub extern "C" fn libwide_version() -> *const std::ffi::c_char {
    c"0.1.0".as_ptr()
}
