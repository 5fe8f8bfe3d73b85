/// Owned code unit buffers whose encoding is only known at run time.
///
/// Used by the CLI and the C bridge: bytes in, `UnitBuf` through the router,
/// bytes out.

use serde::Deserialize;

use super::codec::CodeUnit;
use super::form::{Form, Kind, Narrow, NativeWide, Utf16, Utf32, Utf8, Wide16, Wide32};
use super::policy::{ErrorPolicy, Outcome};
use super::router;
use super::width::{self, WidthError};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitBuf {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl UnitBuf {
    pub fn unit_bits(&self) -> u32 {
        match self {
            UnitBuf::U8(_) => 8,
            UnitBuf::U16(_) => 16,
            UnitBuf::U32(_) => 32,
        }
    }

    /// Number of code units.
    pub fn len(&self) -> usize {
        match self {
            UnitBuf::U8(v) => v.len(),
            UnitBuf::U16(v) => v.len(),
            UnitBuf::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split raw bytes into code units of `kind`.
    pub fn from_bytes(kind: Kind, bytes: &[u8], order: ByteOrder) -> Result<Self> {
        let unit_bytes = (kind.unit_bits() / 8) as usize;
        if bytes.len() % unit_bytes != 0 {
            return Err(Error::PartialUnit { len: bytes.len(), unit_bytes });
        }
        Ok(match unit_bytes {
            1 => UnitBuf::U8(bytes.to_vec()),
            2 => UnitBuf::U16(
                bytes
                    .chunks_exact(2)
                    .map(|c| match order {
                        ByteOrder::Little => u16::from_le_bytes([c[0], c[1]]),
                        ByteOrder::Big => u16::from_be_bytes([c[0], c[1]]),
                    })
                    .collect(),
            ),
            _ => UnitBuf::U32(
                bytes
                    .chunks_exact(4)
                    .map(|c| match order {
                        ByteOrder::Little => u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                        ByteOrder::Big => u32::from_be_bytes([c[0], c[1], c[2], c[3]]),
                    })
                    .collect(),
            ),
        })
    }

    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        match (self, order) {
            (UnitBuf::U8(v), _) => v.clone(),
            (UnitBuf::U16(v), ByteOrder::Little) => v.iter().flat_map(|u| u.to_le_bytes()).collect(),
            (UnitBuf::U16(v), ByteOrder::Big) => v.iter().flat_map(|u| u.to_be_bytes()).collect(),
            (UnitBuf::U32(v), ByteOrder::Little) => v.iter().flat_map(|u| u.to_le_bytes()).collect(),
            (UnitBuf::U32(v), ByteOrder::Big) => v.iter().flat_map(|u| u.to_be_bytes()).collect(),
        }
    }
}

impl From<Vec<u8>> for UnitBuf {
    fn from(v: Vec<u8>) -> Self {
        UnitBuf::U8(v)
    }
}

impl From<Vec<u16>> for UnitBuf {
    fn from(v: Vec<u16>) -> Self {
        UnitBuf::U16(v)
    }
}

impl From<Vec<u32>> for UnitBuf {
    fn from(v: Vec<u32>) -> Self {
        UnitBuf::U32(v)
    }
}

/// Borrow a buffer as units of one concrete width.
pub trait Units: CodeUnit {
    fn units(buf: &UnitBuf) -> Option<&[Self]>;
}

impl Units for u8 {
    fn units(buf: &UnitBuf) -> Option<&[u8]> {
        match buf {
            UnitBuf::U8(v) => Some(v),
            _ => None,
        }
    }
}

impl Units for u16 {
    fn units(buf: &UnitBuf) -> Option<&[u16]> {
        match buf {
            UnitBuf::U16(v) => Some(v),
            _ => None,
        }
    }
}

impl Units for u32 {
    fn units(buf: &UnitBuf) -> Option<&[u32]> {
        match buf {
            UnitBuf::U32(v) => Some(v),
            _ => None,
        }
    }
}

fn view<F: Form>(src: &UnitBuf) -> Result<&[F::Unit]>
where
    F::Unit: Units,
{
    F::Unit::units(src).ok_or(Error::UnitMismatch {
        kind: F::KIND,
        expected: F::KIND.unit_bits(),
        actual: src.unit_bits(),
    })
}

/// Convert a buffer declared as `from` into `to`.
pub fn convert(from: Kind, to: Kind, src: &UnitBuf, policy: ErrorPolicy) -> Result<Outcome<UnitBuf>> {
    log::debug!("converting {} units {} -> {} ({})", src.len(), from, to, policy);
    match from {
        Kind::Narrow => convert_from::<Narrow>(to, src, policy),
        Kind::Wide(NativeWide::Utf16) => convert_from::<Wide16>(to, src, policy),
        Kind::Wide(NativeWide::Utf32) => convert_from::<Wide32>(to, src, policy),
        Kind::Utf8 => convert_from::<Utf8>(to, src, policy),
        Kind::Utf16 => convert_from::<Utf16>(to, src, policy),
        Kind::Utf32 => convert_from::<Utf32>(to, src, policy),
    }
}

fn convert_from<F: Form>(to: Kind, src: &UnitBuf, policy: ErrorPolicy) -> Result<Outcome<UnitBuf>>
where
    F::Unit: Units,
{
    let src = view::<F>(src)?;
    Ok(match to {
        Kind::Narrow => router::convert::<F, Narrow>(src, policy).map(UnitBuf::from),
        Kind::Wide(NativeWide::Utf16) => router::convert::<F, Wide16>(src, policy).map(UnitBuf::from),
        Kind::Wide(NativeWide::Utf32) => router::convert::<F, Wide32>(src, policy).map(UnitBuf::from),
        Kind::Utf8 => router::convert::<F, Utf8>(src, policy).map(UnitBuf::from),
        Kind::Utf16 => router::convert::<F, Utf16>(src, policy).map(UnitBuf::from),
        Kind::Utf32 => router::convert::<F, Utf32>(src, policy).map(UnitBuf::from),
    })
}

/// Column width of a buffer declared as `kind`.
pub fn width(kind: Kind, src: &UnitBuf) -> Result<std::result::Result<usize, WidthError>> {
    Ok(match kind {
        Kind::Narrow => width::width::<Narrow>(view::<Narrow>(src)?),
        Kind::Wide(NativeWide::Utf16) => width::width::<Wide16>(view::<Wide16>(src)?),
        Kind::Wide(NativeWide::Utf32) => width::width::<Wide32>(view::<Wide32>(src)?),
        Kind::Utf8 => width::width::<Utf8>(view::<Utf8>(src)?),
        Kind::Utf16 => width::width::<Utf16>(view::<Utf16>(src)?),
        Kind::Utf32 => width::width::<Utf32>(view::<Utf32>(src)?),
    })
}

/// Split a buffer into lines on U+000A, dropping a trailing U+000D from each.
pub fn lines(kind: Kind, src: &UnitBuf) -> Result<Vec<UnitBuf>> {
    fn split<U: Units>(units: &[U]) -> Vec<UnitBuf>
    where
        UnitBuf: From<Vec<U>>,
    {
        if units.is_empty() {
            return Vec::new();
        }
        let lf = U::from_raw(0x0A);
        let cr = U::from_raw(0x0D);
        let mut out: Vec<UnitBuf> = units
            .split(|&u| u == lf)
            .map(|line| match line.split_last() {
                Some((&last, rest)) if last == cr => rest.to_vec(),
                _ => line.to_vec(),
            })
            .map(UnitBuf::from)
            .collect();
        // text ending in a newline has no extra empty line
        if units.last() == Some(&lf) {
            out.pop();
        }
        out
    }

    Ok(match kind.unit_bits() {
        8 => split(view::<Utf8>(src)?),
        16 => split(view::<Utf16>(src)?),
        _ => split(view::<Utf32>(src)?),
    })
}
