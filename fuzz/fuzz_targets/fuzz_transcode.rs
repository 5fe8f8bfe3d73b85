#![no_main]
use libfuzzer_sys::fuzz_target;
use libwide::core::{convert, ErrorPolicy, Utf16, Utf32, Utf8};

fuzz_target!(|data: &[u8]| {
    for policy in [
        ErrorPolicy::UseReplacementCharacter,
        ErrorPolicy::SkipInvalidValues,
        ErrorPolicy::StopOnFirstError,
    ] {
        let wide = convert::<Utf8, Utf16>(data, policy);
        let back = convert::<Utf16, Utf8>(&wide.value, policy);
        // whatever survived the first pass is well formed
        assert!(back.is_valid);

        if std::str::from_utf8(data).is_ok() {
            assert!(wide.is_valid);
            assert_eq!(back.value, data);
            let cps = convert::<Utf8, Utf32>(data, policy);
            assert_eq!(convert::<Utf32, Utf8>(&cps.value, policy).value, data);
        }
    }
});
