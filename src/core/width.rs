/// Terminal column width of codepoint sequences.
///
/// Each codepoint is classified on its own (control, zero, single, double),
/// then emoji followed by skin tone modifiers, VS16, tags or ZWJ chains are
/// collapsed so the whole cluster counts once.

use thiserror::Error;

use super::form::{Form, Utf32};
use super::policy::ErrorPolicy;
use super::router::convert;
use super::table::is_zero_width;

const ZWJ: u32 = 0x200D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellWidth {
    /// C0/C1 control or DEL: the sequence has no meaningful width.
    Control,
    Zero,
    Single,
    Double,
}

impl CellWidth {
    pub fn columns(self) -> Option<usize> {
        match self {
            CellWidth::Control => None,
            CellWidth::Zero => Some(0),
            CellWidth::Single => Some(1),
            CellWidth::Double => Some(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WidthError {
    #[error("control character U+{codepoint:04X} at position {position}")]
    Control { codepoint: u32, position: usize },
}

/// Classify a single codepoint.
pub fn classify(cp: u32) -> CellWidth {
    if cp == 0 {
        return CellWidth::Zero;
    }
    if cp < 0x20 || (0x7F..=0x9F).contains(&cp) {
        return CellWidth::Control;
    }
    if is_zero_width(cp) {
        return CellWidth::Zero;
    }
    if is_wide(cp) {
        CellWidth::Double
    } else {
        CellWidth::Single
    }
}

fn is_wide(cp: u32) -> bool {
    matches!(cp,
        0x1100..=0x115F |   // Hangul Jamo initial consonants
        0x2329 | 0x232A |   // angle brackets
        0x2E80..=0x303E |   // CJK Radicals .. CJK Symbols
        0x3040..=0xA4CF |   // Hiragana .. Yi
        0xAC00..=0xD7A3 |   // Hangul Syllables
        0xF900..=0xFAFF |   // CJK Compatibility Ideographs
        0xFE10..=0xFE19 |   // Vertical forms
        0xFE30..=0xFE6F |   // CJK Compatibility Forms
        0xFF00..=0xFF60 |   // Fullwidth Forms
        0xFFE0..=0xFFE6 |   // Fullwidth Signs
        0x20000..=0x2FFFD |
        0x30000..=0x3FFFD |
        0x1F000..=0x1FAFF   // Emoji, symbols and pictographs
    )
}

/// Codepoints that start an emoji cluster.
pub fn is_emoji(cp: u32) -> bool {
    matches!(cp, 0x1F000..=0x1FAFF | 0x2600..=0x27BF)
}

/// Codepoints swallowed after an emoji: skin tones, VS16, tags and ZWJ.
pub fn is_emoji_modifier(cp: u32) -> bool {
    matches!(cp, 0x1F3FB..=0x1F3FF | 0xFE0F | 0xE0020..=0xE007F | ZWJ)
}

/// Column width of a UTF-32 sequence.
pub fn width_codepoints(cps: &[u32]) -> Result<usize, WidthError> {
    let mut width = 0;
    let mut i = 0;

    while i < cps.len() {
        let cp = cps[i];
        let cols = classify(cp)
            .columns()
            .ok_or(WidthError::Control { codepoint: cp, position: i })?;
        width += cols;
        i += 1;

        if !is_emoji(cp) {
            continue;
        }

        while i < cps.len() && is_emoji_modifier(cps[i]) {
            // A joined emoji is drawn in the same cell as the base
            if cps[i] == ZWJ && i + 1 < cps.len() {
                i += 1;
                if is_emoji(cps[i]) {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
    }

    Ok(width)
}

/// Column width of a sequence in any form. Invalid units are ignored.
pub fn width<F: Form>(src: &[F::Unit]) -> Result<usize, WidthError> {
    let cps = convert::<F, Utf32>(src, ErrorPolicy::SkipInvalidValues);
    width_codepoints(&cps)
}

pub fn width_str(s: &str) -> Result<usize, WidthError> {
    let cps: Vec<u32> = s.chars().map(|c| c as u32).collect();
    width_codepoints(&cps)
}
