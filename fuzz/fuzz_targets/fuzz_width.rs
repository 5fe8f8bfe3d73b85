#![no_main]
use libfuzzer_sys::fuzz_target;
use libwide::core::{width, width_str, Utf16, Utf32, Utf8};

fuzz_target!(|data: &[u8]| {
    let narrow = width::<Utf8>(data);
    if let Ok(s) = std::str::from_utf8(data) {
        let u16s: Vec<u16> = s.encode_utf16().collect();
        let u32s: Vec<u32> = s.chars().map(|c| c as u32).collect();
        assert_eq!(narrow, width_str(s));
        assert_eq!(narrow, width::<Utf16>(&u16s));
        assert_eq!(narrow, width::<Utf32>(&u32s));
    }
});
