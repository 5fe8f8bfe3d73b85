/// C ABI bridge for native hosts.
/// Encodings and policies are passed as the integer codes below; lengths are
/// always counted in code units, never bytes.

use crate::core::{dynamic, width, ErrorPolicy, Kind, UnitBuf, Utf16, Utf32, Utf8, WidthError};
use std::ffi::{c_int, c_void};
use std::{mem, ptr, slice};

pub const WIDE_ENC_NARROW: c_int = 0;
pub const WIDE_ENC_WIDE: c_int = 1;
pub const WIDE_ENC_UTF8: c_int = 2;
pub const WIDE_ENC_UTF16: c_int = 3;
pub const WIDE_ENC_UTF32: c_int = 4;

pub const WIDE_POLICY_REPLACE: c_int = 0;
pub const WIDE_POLICY_SKIP: c_int = 1;
pub const WIDE_POLICY_STOP: c_int = 2;

/// Opaque handle to a conversion result.
pub struct WideBuffer {
    units: UnitBuf,
    is_valid: bool,
}

fn kind_from_code(code: c_int) -> Option<Kind> {
    match code {
        WIDE_ENC_NARROW => Some(Kind::Narrow),
        WIDE_ENC_WIDE => Some(Kind::wide()),
        WIDE_ENC_UTF8 => Some(Kind::Utf8),
        WIDE_ENC_UTF16 => Some(Kind::Utf16),
        WIDE_ENC_UTF32 => Some(Kind::Utf32),
        _ => None,
    }
}

fn policy_from_code(code: c_int) -> Option<ErrorPolicy> {
    match code {
        WIDE_POLICY_REPLACE => Some(ErrorPolicy::UseReplacementCharacter),
        WIDE_POLICY_SKIP => Some(ErrorPolicy::SkipInvalidValues),
        WIDE_POLICY_STOP => Some(ErrorPolicy::StopOnFirstError),
        _ => None,
    }
}

/// Borrow `len` units at `data`; a null pointer is only accepted for `len == 0`.
/// Pointers not aligned for `T` are rejected.
unsafe fn units<'a, T>(data: *const T, len: usize) -> Option<&'a [T]> {
    if len == 0 {
        Some(&[])
    } else if data.is_null() || data.align_offset(mem::align_of::<T>()) != 0 {
        None
    } else {
        Some(slice::from_raw_parts(data, len))
    }
}

fn width_to_c(w: Result<usize, WidthError>) -> isize {
    match w {
        Ok(w) => isize::try_from(w).unwrap_or(isize::MAX),
        Err(_) => -1,
    }
}

/// Display width of UTF-8 text, or -1 on control characters or a null pointer.
/// The 16 and 32-bit variants also return -1 for misaligned pointers.
#[no_mangle]
pub extern "C" fn wide_width_utf8(data: *const u8, len: usize) -> isize {
    match unsafe { units(data, len) } {
        Some(s) => width_to_c(width::<Utf8>(s)),
        None => -1,
    }
}

#[no_mangle]
pub extern "C" fn wide_width_utf16(data: *const u16, len: usize) -> isize {
    match unsafe { units(data, len) } {
        Some(s) => width_to_c(width::<Utf16>(s)),
        None => -1,
    }
}

#[no_mangle]
pub extern "C" fn wide_width_utf32(data: *const u32, len: usize) -> isize {
    match unsafe { units(data, len) } {
        Some(s) => width_to_c(width::<Utf32>(s)),
        None => -1,
    }
}

/// Convert `len` units at `data`, which must be aligned for the unit width of
/// `from`. Returns null on bad codes, a null pointer or a misaligned pointer.
/// The result must be released with `wide_buffer_free`.
#[no_mangle]
pub extern "C" fn wide_convert(
    from: c_int,
    to: c_int,
    policy: c_int,
    data: *const c_void,
    len: usize,
) -> *mut WideBuffer {
    let (Some(from), Some(to), Some(policy)) =
        (kind_from_code(from), kind_from_code(to), policy_from_code(policy))
    else {
        return ptr::null_mut();
    };

    let src = unsafe {
        match from.unit_bits() {
            8 => units(data as *const u8, len).map(|s| UnitBuf::U8(s.to_vec())),
            16 => units(data as *const u16, len).map(|s| UnitBuf::U16(s.to_vec())),
            _ => units(data as *const u32, len).map(|s| UnitBuf::U32(s.to_vec())),
        }
    };
    let Some(src) = src else {
        return ptr::null_mut();
    };

    match dynamic::convert(from, to, &src, policy) {
        Ok(out) => Box::into_raw(Box::new(WideBuffer { units: out.value, is_valid: out.is_valid })),
        Err(e) => {
            log::warn!("wide_convert: {}", e);
            ptr::null_mut()
        }
    }
}

/// Number of code units in the buffer.
#[no_mangle]
pub extern "C" fn wide_buffer_len(buffer: *const WideBuffer) -> usize {
    match unsafe { buffer.as_ref() } {
        Some(b) => b.units.len(),
        None => 0,
    }
}

/// Pointer to the first code unit; valid until the buffer is freed.
#[no_mangle]
pub extern "C" fn wide_buffer_data(buffer: *const WideBuffer) -> *const c_void {
    match unsafe { buffer.as_ref() } {
        Some(b) => match &b.units {
            UnitBuf::U8(v) => v.as_ptr() as *const c_void,
            UnitBuf::U16(v) => v.as_ptr() as *const c_void,
            UnitBuf::U32(v) => v.as_ptr() as *const c_void,
        },
        None => ptr::null(),
    }
}

/// 1 if the input was well formed, 0 otherwise.
#[no_mangle]
pub extern "C" fn wide_buffer_is_valid(buffer: *const WideBuffer) -> c_int {
    match unsafe { buffer.as_ref() } {
        Some(b) => b.is_valid as c_int,
        None => 0,
    }
}

#[no_mangle]
pub extern "C" fn wide_buffer_free(buffer: *mut WideBuffer) {
    if !buffer.is_null() {
        unsafe { drop(Box::from_raw(buffer)); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_functions() {
        let s = "😂😂😂";
        assert_eq!(wide_width_utf8(s.as_ptr(), s.len()), 6);
        let u16s: Vec<u16> = s.encode_utf16().collect();
        assert_eq!(wide_width_utf16(u16s.as_ptr(), u16s.len()), 6);
        let u32s: Vec<u32> = s.chars().map(|c| c as u32).collect();
        assert_eq!(wide_width_utf32(u32s.as_ptr(), u32s.len()), 6);
    }

    #[test]
    fn test_width_errors() {
        let s = "a\tb";
        assert_eq!(wide_width_utf8(s.as_ptr(), s.len()), -1);
        assert_eq!(wide_width_utf8(ptr::null(), 4), -1);
        assert_eq!(wide_width_utf8(ptr::null(), 0), 0);
    }

    #[test]
    fn test_convert_buffer() {
        let s = "start_\u{1F602}";
        let data = s.as_ptr() as *const c_void;
        let buf = wide_convert(WIDE_ENC_UTF8, WIDE_ENC_UTF16, WIDE_POLICY_REPLACE, data, s.len());
        assert!(!buf.is_null());
        assert_eq!(wide_buffer_is_valid(buf), 1);
        let len = wide_buffer_len(buf);
        let data = wide_buffer_data(buf) as *const u16;
        let out = unsafe { slice::from_raw_parts(data, len) }.to_vec();
        assert_eq!(out, s.encode_utf16().collect::<Vec<u16>>());
        wide_buffer_free(buf);
    }

    #[test]
    fn test_convert_invalid_input() {
        let bytes = b"ab\xFFc";
        let data = bytes.as_ptr() as *const c_void;
        let buf = wide_convert(WIDE_ENC_UTF8, WIDE_ENC_UTF32, WIDE_POLICY_STOP, data, bytes.len());
        assert_eq!(wide_buffer_is_valid(buf), 0);
        assert_eq!(wide_buffer_len(buf), 2);
        wide_buffer_free(buf);
    }

    #[test]
    fn test_convert_rejects_bad_codes() {
        let x = "x".as_ptr() as *const c_void;
        assert!(wide_convert(9, WIDE_ENC_UTF16, WIDE_POLICY_SKIP, x, 1).is_null());
        assert!(wide_convert(WIDE_ENC_UTF8, WIDE_ENC_UTF16, 7, x, 1).is_null());
        let null = ptr::null();
        assert!(wide_convert(WIDE_ENC_UTF8, WIDE_ENC_UTF16, WIDE_POLICY_SKIP, null, 1).is_null());
    }

    #[test]
    fn test_misaligned_input_is_rejected() {
        let storage: Vec<u32> = vec![0x61, 0x62, 0x63];
        // one byte past a u32 boundary is never aligned for u16 or u32
        let odd = (storage.as_ptr() as *const u8).wrapping_add(1);

        let buf = wide_convert(WIDE_ENC_UTF16, WIDE_ENC_UTF8, WIDE_POLICY_SKIP, odd.cast(), 2);
        assert!(buf.is_null());
        let buf = wide_convert(WIDE_ENC_UTF32, WIDE_ENC_UTF8, WIDE_POLICY_SKIP, odd.cast(), 2);
        assert!(buf.is_null());
        assert_eq!(wide_width_utf16(odd.cast(), 2), -1);
        assert_eq!(wide_width_utf32(odd.cast(), 2), -1);

        // bytes have no alignment requirement
        let text = "abcd".as_ptr().wrapping_add(1);
        assert_eq!(wide_width_utf8(text, 3), 3);

        let data = storage.as_ptr() as *const c_void;
        let buf = wide_convert(WIDE_ENC_UTF32, WIDE_ENC_UTF8, WIDE_POLICY_SKIP, data, 3);
        assert!(!buf.is_null());
        assert_eq!(wide_buffer_len(buf), 3);
        wide_buffer_free(buf);
    }

    #[test]
    fn test_null_buffer_accessors() {
        assert_eq!(wide_buffer_len(ptr::null()), 0);
        assert!(wide_buffer_data(ptr::null()).is_null());
        assert_eq!(wide_buffer_is_valid(ptr::null()), 0);
        wide_buffer_free(ptr::null_mut());
    }
}
