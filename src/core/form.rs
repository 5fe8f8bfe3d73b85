/// Encoding forms: typed markers for the compile-time API and a runtime `Kind` tag.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use super::codec::CodeUnit;
use crate::error::Error;

/// Unicode form used by the platform's wide characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeWide {
    Utf16,
    Utf32,
}

impl NativeWide {
    /// Fixed per build: UTF-16 on Windows, UTF-32 everywhere else.
    #[cfg(windows)]
    pub const BUILD: NativeWide = NativeWide::Utf16;
    #[cfg(not(windows))]
    pub const BUILD: NativeWide = NativeWide::Utf32;

    pub const fn unicode(self) -> Kind {
        match self {
            NativeWide::Utf16 => Kind::Utf16,
            NativeWide::Utf32 => Kind::Utf32,
        }
    }
}

/// Runtime tag of an encoding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Byte strings assumed to hold UTF-8 (C `char`).
    Narrow,
    /// Platform wide strings (C `wchar_t`).
    Wide(NativeWide),
    Utf8,
    Utf16,
    Utf32,
}

impl Kind {
    pub const fn wide() -> Kind {
        Kind::Wide(NativeWide::BUILD)
    }

    pub const fn is_unicode(self) -> bool {
        matches!(self, Kind::Utf8 | Kind::Utf16 | Kind::Utf32)
    }

    pub const fn unit_bits(self) -> u32 {
        match self {
            Kind::Narrow | Kind::Utf8 => 8,
            Kind::Utf16 | Kind::Wide(NativeWide::Utf16) => 16,
            Kind::Utf32 | Kind::Wide(NativeWide::Utf32) => 32,
        }
    }

    /// The Unicode form this one reinterprets to without transcoding.
    pub const fn partner(self) -> Kind {
        match self {
            Kind::Narrow => Kind::Utf8,
            Kind::Wide(native) => native.unicode(),
            unicode => unicode,
        }
    }

    pub(crate) const fn index(self) -> u8 {
        match self {
            Kind::Narrow => 0,
            Kind::Wide(NativeWide::Utf16) => 1,
            Kind::Wide(NativeWide::Utf32) => 2,
            Kind::Utf8 => 3,
            Kind::Utf16 => 4,
            Kind::Utf32 => 5,
        }
    }

    pub const fn same(self, other: Kind) -> bool {
        self.index() == other.index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Narrow => "narrow",
            Kind::Wide(NativeWide::Utf16) => "wide16",
            Kind::Wide(NativeWide::Utf32) => "wide32",
            Kind::Utf8 => "utf-8",
            Kind::Utf16 => "utf-16",
            Kind::Utf32 => "utf-32",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "narrow" | "char" => Ok(Kind::Narrow),
            "wide" | "wchar" => Ok(Kind::wide()),
            "wide16" => Ok(Kind::Wide(NativeWide::Utf16)),
            "wide32" => Ok(Kind::Wide(NativeWide::Utf32)),
            "utf8" => Ok(Kind::Utf8),
            "utf16" => Ok(Kind::Utf16),
            "utf32" => Ok(Kind::Utf32),
            _ => Err(Error::UnknownEncoding(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A typed encoding form: fixes the code unit type and the runtime tag.
pub trait Form {
    type Unit: CodeUnit;
    const KIND: Kind;
}

/// Byte strings assumed to be UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct Narrow;

#[derive(Debug, Clone, Copy)]
pub struct Utf8;

#[derive(Debug, Clone, Copy)]
pub struct Utf16;

#[derive(Debug, Clone, Copy)]
pub struct Utf32;

/// Wide strings of a platform whose `wchar_t` is 16 bits.
#[derive(Debug, Clone, Copy)]
pub struct Wide16;

/// Wide strings of a platform whose `wchar_t` is 32 bits.
#[derive(Debug, Clone, Copy)]
pub struct Wide32;

impl Form for Narrow {
    type Unit = u8;
    const KIND: Kind = Kind::Narrow;
}

impl Form for Utf8 {
    type Unit = u8;
    const KIND: Kind = Kind::Utf8;
}

impl Form for Utf16 {
    type Unit = u16;
    const KIND: Kind = Kind::Utf16;
}

impl Form for Utf32 {
    type Unit = u32;
    const KIND: Kind = Kind::Utf32;
}

impl Form for Wide16 {
    type Unit = u16;
    const KIND: Kind = Kind::Wide(NativeWide::Utf16);
}

impl Form for Wide32 {
    type Unit = u32;
    const KIND: Kind = Kind::Wide(NativeWide::Utf32);
}

/// The build's wide form.
#[cfg(windows)]
pub type Wide = Wide16;
#[cfg(not(windows))]
pub type Wide = Wide32;

/// The Unicode form wide strings reinterpret to on this build.
#[cfg(windows)]
pub type Native = Utf16;
#[cfg(not(windows))]
pub type Native = Utf32;

pub type WideChar = <Wide as Form>::Unit;
pub type NativeChar = <Native as Form>::Unit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_wide_matches_aliases() {
        assert!(Wide::KIND.same(Kind::wide()));
        assert!(Native::KIND.same(NativeWide::BUILD.unicode()));
        assert_eq!(Wide::KIND.unit_bits(), Native::KIND.unit_bits());
        assert_eq!(<WideChar as CodeUnit>::BITS, <NativeChar as CodeUnit>::BITS);
    }

    #[test]
    fn test_partners() {
        assert_eq!(Kind::Narrow.partner(), Kind::Utf8);
        assert_eq!(Kind::Wide(NativeWide::Utf16).partner(), Kind::Utf16);
        assert_eq!(Kind::Wide(NativeWide::Utf32).partner(), Kind::Utf32);
        assert_eq!(Kind::Utf16.partner(), Kind::Utf16);
    }

    #[test]
    fn test_unit_bits_match_form_units() {
        assert_eq!(Narrow::KIND.unit_bits(), <<Narrow as Form>::Unit as CodeUnit>::BITS);
        assert_eq!(Wide16::KIND.unit_bits(), <<Wide16 as Form>::Unit as CodeUnit>::BITS);
        assert_eq!(Wide32::KIND.unit_bits(), <<Wide32 as Form>::Unit as CodeUnit>::BITS);
        assert_eq!(Utf32::KIND.unit_bits(), <<Utf32 as Form>::Unit as CodeUnit>::BITS);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("UTF-8".parse::<Kind>().unwrap(), Kind::Utf8);
        assert_eq!("utf16".parse::<Kind>().unwrap(), Kind::Utf16);
        assert_eq!("utf_32".parse::<Kind>().unwrap(), Kind::Utf32);
        assert_eq!("wide".parse::<Kind>().unwrap(), Kind::wide());
        assert_eq!("wide16".parse::<Kind>().unwrap(), Kind::Wide(NativeWide::Utf16));
        assert_eq!("narrow".parse::<Kind>().unwrap(), Kind::Narrow);
        assert!("latin1".parse::<Kind>().is_err());
    }

    #[test]
    fn test_kind_display_roundtrips() {
        for k in [
            Kind::Narrow,
            Kind::Wide(NativeWide::Utf16),
            Kind::Wide(NativeWide::Utf32),
            Kind::Utf8,
            Kind::Utf16,
            Kind::Utf32,
        ] {
            assert_eq!(k.to_string().parse::<Kind>().unwrap(), k);
        }
    }
}
