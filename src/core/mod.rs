mod codec;
mod form;
mod policy;
mod router;
mod table;
mod units;
mod width;

pub use codec::{
    decode_one_utf16, decode_one_utf32, decode_one_utf8, encode_utf16, encode_utf32, encode_utf8,
    is_scalar, is_surrogate, transcode, utf16_to_utf32, utf16_to_utf8, utf32_to_utf16,
    utf32_to_utf8, utf8_to_utf16, utf8_to_utf32, CodeUnit, Decoded, MAX_CODEPOINT, REPLACEMENT,
};
pub use form::{
    Form, Kind, Narrow, Native, NativeChar, NativeWide, Utf16, Utf32, Utf8, Wide, Wide16, Wide32,
    WideChar,
};
pub use policy::{ErrorPolicy, Outcome};
pub use router::{
    convert, is_reinterpretable, narrow_to_utf8, native_to_wide, to_narrow, to_native, to_utf16,
    to_utf32, to_utf8, to_wide, utf8_to_narrow, wide_to_native, Route,
};
pub use table::{in_table, is_zero_width, ZERO_WIDTH};
pub use units::{ByteOrder, UnitBuf};
pub use width::{
    classify, is_emoji, is_emoji_modifier, width, width_codepoints, width_str, CellWidth,
    WidthError,
};

/// Dynamic (run-time encoding) entry points.
pub mod dynamic {
    pub use super::units::{convert, lines, width, Units};
}
