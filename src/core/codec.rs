/// Validating UTF-8 / UTF-16 / UTF-32 decoders and minimal-length encoders.
///
/// Decoders look at one logical character at a time and never panic: any
/// malformed input consumes exactly one code unit and is reported invalid.

use std::fmt;

use super::policy::{ErrorPolicy, Outcome};

/// U+FFFD REPLACEMENT CHARACTER
pub const REPLACEMENT: u32 = 0xFFFD;

/// Largest Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Result of decoding a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub codepoint: u32,
    /// Number of input units consumed (1 on error, 0 only for empty input).
    pub consumed: usize,
    pub valid: bool,
}

impl Decoded {
    const fn ok(codepoint: u32, consumed: usize) -> Self {
        Self { codepoint, consumed, valid: true }
    }

    const fn bad(consumed: usize) -> Self {
        Self { codepoint: 0, consumed, valid: false }
    }
}

pub const fn is_surrogate(cp: u32) -> bool {
    cp >= 0xD800 && cp <= 0xDFFF
}

/// In range and not a surrogate.
pub const fn is_scalar(cp: u32) -> bool {
    cp <= MAX_CODEPOINT && !is_surrogate(cp)
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decode one character from the front of a UTF-8 byte slice.
pub fn decode_one_utf8(input: &[u8]) -> Decoded {
    let Some(&lead) = input.first() else {
        return Decoded::bad(0);
    };

    // 0xxxxxxx
    if lead < 0x80 {
        return Decoded::ok(lead as u32, 1);
    }

    // Stray continuation byte or overlong 2-byte lead (0xC0, 0xC1)
    if lead < 0xC2 {
        return Decoded::bad(1);
    }

    let (len, init) = match lead {
        0xC2..=0xDF => (2, (lead & 0x1F) as u32),
        0xE0..=0xEF => (3, (lead & 0x0F) as u32),
        0xF0..=0xF4 => (4, (lead & 0x07) as u32),
        _ => return Decoded::bad(1),
    };

    if input.len() < len || !input[1..len].iter().all(|&b| is_continuation(b)) {
        return Decoded::bad(1);
    }

    let cp = input[1..len]
        .iter()
        .fold(init, |acc, &b| (acc << 6) | (b & 0x3F) as u32);

    let min = match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x10000,
    };
    if cp < min || !is_scalar(cp) {
        return Decoded::bad(1);
    }

    Decoded::ok(cp, len)
}

/// Decode one character from the front of a UTF-16 code unit slice.
pub fn decode_one_utf16(input: &[u16]) -> Decoded {
    let Some(&first) = input.first() else {
        return Decoded::bad(0);
    };
    let high = first as u32;

    if !is_surrogate(high) {
        return Decoded::ok(high, 1);
    }

    // Lone low surrogate, or a high surrogate at the end of input
    if high > 0xDBFF || input.len() < 2 {
        return Decoded::bad(1);
    }

    let low = input[1] as u32;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Decoded::bad(1);
    }

    Decoded::ok(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00), 2)
}

/// Decode one UTF-32 unit: valid iff it is a Unicode scalar value.
pub fn decode_one_utf32(input: &[u32]) -> Decoded {
    match input.first() {
        None => Decoded::bad(0),
        Some(&cp) if is_scalar(cp) => Decoded::ok(cp, 1),
        Some(_) => Decoded::bad(1),
    }
}

/// Append the minimal UTF-8 encoding of `cp`. `cp` must be a scalar value.
pub fn encode_utf8(cp: u32, out: &mut Vec<u8>) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x10000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
}

/// Append the UTF-16 encoding of `cp`, as a surrogate pair above the BMP.
pub fn encode_utf16(cp: u32, out: &mut Vec<u16>) {
    if cp < 0x10000 {
        out.push(cp as u16);
    } else {
        let v = cp - 0x10000;
        out.push(0xD800 + (v >> 10) as u16);
        out.push(0xDC00 + (v & 0x3FF) as u16);
    }
}

pub fn encode_utf32(cp: u32, out: &mut Vec<u32>) {
    out.push(cp);
}

/// A fixed-width storage unit. The width selects the Unicode encoding form:
/// 8 bits is UTF-8, 16 bits UTF-16, 32 bits UTF-32.
pub trait CodeUnit: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static {
    const BITS: u32;

    fn decode_one(input: &[Self]) -> Decoded;

    fn encode(cp: u32, out: &mut Vec<Self>);

    /// Numeric cast used by reinterpretation. Lossless between equal widths.
    fn from_raw(raw: u32) -> Self;

    fn to_raw(self) -> u32;
}

impl CodeUnit for u8 {
    const BITS: u32 = 8;

    fn decode_one(input: &[u8]) -> Decoded {
        decode_one_utf8(input)
    }

    fn encode(cp: u32, out: &mut Vec<u8>) {
        encode_utf8(cp, out)
    }

    fn from_raw(raw: u32) -> u8 {
        raw as u8
    }

    fn to_raw(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u16 {
    const BITS: u32 = 16;

    fn decode_one(input: &[u16]) -> Decoded {
        decode_one_utf16(input)
    }

    fn encode(cp: u32, out: &mut Vec<u16>) {
        encode_utf16(cp, out)
    }

    fn from_raw(raw: u32) -> u16 {
        raw as u16
    }

    fn to_raw(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u32 {
    const BITS: u32 = 32;

    fn decode_one(input: &[u32]) -> Decoded {
        decode_one_utf32(input)
    }

    fn encode(cp: u32, out: &mut Vec<u32>) {
        encode_utf32(cp, out)
    }

    fn from_raw(raw: u32) -> u32 {
        raw
    }

    fn to_raw(self) -> u32 {
        self
    }
}

/// Decode `src` as the Unicode form of `A` and re-encode it as the form of `B`,
/// applying `policy` at every invalid sequence.
pub fn transcode<A: CodeUnit, B: CodeUnit>(src: &[A], policy: ErrorPolicy) -> Outcome<Vec<B>> {
    let mut out = Vec::with_capacity(src.len());
    let mut is_valid = true;
    let mut i = 0;

    while i < src.len() {
        let d = A::decode_one(&src[i..]);
        if d.valid {
            B::encode(d.codepoint, &mut out);
        } else {
            is_valid = false;
            if policy.recover(&mut out).is_break() {
                return Outcome::invalid(out);
            }
        }
        i += d.consumed;
    }

    Outcome { value: out, is_valid }
}

/// Per-unit numeric cast between forms of the same width. Never validates.
pub fn reinterpret<A: CodeUnit, B: CodeUnit>(src: &[A]) -> Vec<B> {
    debug_assert_eq!(A::BITS, B::BITS, "reinterpretation requires equal unit widths");
    src.iter().map(|&u| B::from_raw(u.to_raw())).collect()
}

pub fn utf16_to_utf8(src: &[u16], policy: ErrorPolicy) -> Outcome<Vec<u8>> {
    transcode(src, policy)
}

pub fn utf32_to_utf8(src: &[u32], policy: ErrorPolicy) -> Outcome<Vec<u8>> {
    transcode(src, policy)
}

pub fn utf8_to_utf16(src: &[u8], policy: ErrorPolicy) -> Outcome<Vec<u16>> {
    transcode(src, policy)
}

pub fn utf32_to_utf16(src: &[u32], policy: ErrorPolicy) -> Outcome<Vec<u16>> {
    transcode(src, policy)
}

pub fn utf8_to_utf32(src: &[u8], policy: ErrorPolicy) -> Outcome<Vec<u32>> {
    transcode(src, policy)
}

pub fn utf16_to_utf32(src: &[u16], policy: ErrorPolicy) -> Outcome<Vec<u32>> {
    transcode(src, policy)
}
