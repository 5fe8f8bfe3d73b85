/// Picks the cheapest path between two encoding forms and runs it.
///
/// Same form: copy. Same unit width by convention (narrow/UTF-8, wide/native
/// Unicode): numeric cast, no validation. Two Unicode forms: one codec call.
/// Anything else goes through the Unicode partner of the non-Unicode side.

use std::marker::PhantomData;

use super::codec::{reinterpret, transcode};
use super::form::{Form, Kind, Narrow, Native, NativeChar, Utf16, Utf32, Utf8, Wide, WideChar};
use super::policy::{ErrorPolicy, Outcome};

/// Conversion strategy for a (source, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Identity,
    Reinterpret,
    Direct,
    /// Convert to this Unicode form first, then on to the destination.
    Pivot(Kind),
}

/// Whether `a` units can be cast to `b` units without looking at them.
pub const fn is_reinterpretable(a: Kind, b: Kind) -> bool {
    a.same(b)
        || (!a.is_unicode() && a.partner().same(b))
        || (!b.is_unicode() && b.partner().same(a))
}

impl Route {
    pub const fn resolve(from: Kind, to: Kind) -> Route {
        if from.same(to) {
            Route::Identity
        } else if is_reinterpretable(from, to) {
            Route::Reinterpret
        } else if from.is_unicode() && to.is_unicode() {
            Route::Direct
        } else if !from.is_unicode() {
            Route::Pivot(from.partner())
        } else {
            Route::Pivot(to.partner())
        }
    }

    /// Number of real (validating) transcoding steps this route performs.
    pub const fn transcodings(from: Kind, to: Kind) -> usize {
        match Route::resolve(from, to) {
            Route::Identity | Route::Reinterpret => 0,
            Route::Direct => 1,
            Route::Pivot(via) => Route::transcodings(from, via) + Route::transcodings(via, to),
        }
    }
}

/// Route of a typed pair, fixed at compile time.
struct Plan<F, T>(PhantomData<(F, T)>);

impl<F: Form, T: Form> Plan<F, T> {
    const ROUTE: Route = Route::resolve(F::KIND, T::KIND);
}

/// Convert `src` from form `F` to form `T`.
pub fn convert<F: Form, T: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<T::Unit>> {
    match Plan::<F, T>::ROUTE {
        Route::Identity | Route::Reinterpret => Outcome::valid(reinterpret(src)),
        Route::Direct => transcode(src, policy),
        Route::Pivot(Kind::Utf8) => through::<F, Utf8, T>(src, policy),
        Route::Pivot(Kind::Utf16) => through::<F, Utf16, T>(src, policy),
        Route::Pivot(Kind::Utf32) => through::<F, Utf32, T>(src, policy),
        Route::Pivot(Kind::Narrow | Kind::Wide(_)) => {
            unreachable!("routes only pivot through a Unicode form")
        }
    }
}

fn through<F: Form, P: Form, T: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<T::Unit>> {
    log::trace!("{} -> {} via {}", F::KIND, T::KIND, P::KIND);
    convert::<F, P>(src, policy).and_then(|mid| convert::<P, T>(&mid, policy))
}

pub fn to_utf8<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<u8>> {
    convert::<F, Utf8>(src, policy)
}

pub fn to_utf16<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<u16>> {
    convert::<F, Utf16>(src, policy)
}

pub fn to_utf32<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<u32>> {
    convert::<F, Utf32>(src, policy)
}

/// Convert to the Unicode form wide strings share their unit width with.
pub fn to_native<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<NativeChar>> {
    convert::<F, Native>(src, policy)
}

pub fn to_wide<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<WideChar>> {
    convert::<F, Wide>(src, policy)
}

pub fn to_narrow<F: Form>(src: &[F::Unit], policy: ErrorPolicy) -> Outcome<Vec<u8>> {
    convert::<F, Narrow>(src, policy)
}

pub fn wide_to_native(ws: &[WideChar]) -> Vec<NativeChar> {
    reinterpret(ws)
}

pub fn native_to_wide(us: &[NativeChar]) -> Vec<WideChar> {
    reinterpret(us)
}

pub fn narrow_to_utf8(s: &[u8]) -> Vec<u8> {
    s.to_vec()
}

pub fn utf8_to_narrow(s: &[u8]) -> Vec<u8> {
    s.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{NativeWide, Wide16, Wide32};

    const SAMPLES: &[&str] = &[
        "Hello, World!",
        "Résumé",
        "😂😂😂",
        "",
        "👩🏼‍🚀",
        "𐌀𐌍𐌓𐌀",
        "𝕄𝕒𝕥𝕙𝕖𝕞𝕒𝕥𝕚𝕔𝕤",
        "🌍🌎🌏",
        "👨‍👩‍👧‍👦",
        "𠔻𠕋𠖊𠖍𠖐",
        "𠮷",
        "𠊛好",
        "اَلْعَرَبِيَّةُ",
    ];

    const ALL: [Kind; 6] = [
        Kind::Narrow,
        Kind::Wide(NativeWide::Utf16),
        Kind::Wide(NativeWide::Utf32),
        Kind::Utf8,
        Kind::Utf16,
        Kind::Utf32,
    ];

    const P: ErrorPolicy = ErrorPolicy::StopOnFirstError;

    #[test]
    fn test_route_table() {
        let w16 = Kind::Wide(NativeWide::Utf16);
        let w32 = Kind::Wide(NativeWide::Utf32);
        assert_eq!(Route::resolve(Kind::Utf8, Kind::Utf8), Route::Identity);
        assert_eq!(Route::resolve(Kind::Narrow, Kind::Utf8), Route::Reinterpret);
        assert_eq!(Route::resolve(Kind::Utf8, Kind::Narrow), Route::Reinterpret);
        assert_eq!(Route::resolve(w16, Kind::Utf16), Route::Reinterpret);
        assert_eq!(Route::resolve(Kind::Utf32, w32), Route::Reinterpret);
        assert_eq!(Route::resolve(Kind::Utf8, Kind::Utf32), Route::Direct);
        assert_eq!(Route::resolve(Kind::Narrow, Kind::Utf16), Route::Pivot(Kind::Utf8));
        assert_eq!(Route::resolve(Kind::Utf8, w32), Route::Pivot(Kind::Utf32));
        assert_eq!(Route::resolve(w16, Kind::Utf32), Route::Pivot(Kind::Utf16));
        assert_eq!(Route::resolve(Kind::Narrow, w16), Route::Pivot(Kind::Utf8));
    }

    #[test]
    fn test_pivot_is_always_unicode() {
        for a in ALL {
            for b in ALL {
                if let Route::Pivot(via) = Route::resolve(a, b) {
                    assert!(via.is_unicode(), "{a} -> {b} pivots through {via}");
                }
            }
        }
    }

    #[test]
    fn test_reinterpretable_is_symmetric() {
        for a in ALL {
            for b in ALL {
                assert_eq!(is_reinterpretable(a, b), is_reinterpretable(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_at_most_two_transcodings() {
        for a in ALL {
            for b in ALL {
                let n = Route::transcodings(a, b);
                assert!(n <= 2, "{a} -> {b} takes {n} steps");
                if is_reinterpretable(a, b) {
                    assert_eq!(n, 0, "{a} -> {b}");
                }
            }
        }
        assert_eq!(Route::transcodings(Kind::Narrow, Kind::Wide(NativeWide::Utf32)), 1);
    }

    #[test]
    fn test_identity_is_always_valid() {
        let broken: Vec<u16> = vec![0xD800, 0x41, 0xDFFF];
        let out = convert::<Utf16, Utf16>(&broken, P);
        assert!(out.is_valid());
        assert_eq!(out.value, broken);

        let bytes = b"\xFF\xFE".to_vec();
        let out = convert::<Utf8, Utf8>(&bytes, P);
        assert!(out.is_valid());
        assert_eq!(out.value, bytes);
    }

    #[test]
    fn test_wide16_to_utf16_never_validates() {
        let broken: Vec<u16> = vec![0x61, 0xD800, 0x62, 0xDC00];
        let out = convert::<Wide16, Utf16>(&broken, P);
        assert!(out.is_valid());
        assert_eq!(out.value, broken);
    }

    #[test]
    fn test_narrow_is_utf8_by_convention() {
        let out = convert::<Narrow, Utf8>(b"\xC0\xAF", P);
        assert!(out.is_valid());
        assert_eq!(out.value, b"\xC0\xAF");
        assert_eq!(narrow_to_utf8(b"abc"), b"abc");
        assert_eq!(utf8_to_narrow("é".as_bytes()), "é".as_bytes());
    }

    #[test]
    fn test_round_trip_through_every_form() {
        for s in SAMPLES {
            let u8s = s.as_bytes();

            let u16s = to_utf16::<Utf8>(u8s, P);
            assert!(u16s.is_valid(), "{s}");
            assert_eq!(to_utf8::<Utf16>(&u16s, P).value, u8s);

            let u32s = to_utf32::<Utf8>(u8s, P);
            assert!(u32s.is_valid(), "{s}");
            assert_eq!(to_utf8::<Utf32>(&u32s, P).value, u8s);

            let ws = to_wide::<Utf8>(u8s, P);
            assert!(ws.is_valid(), "{s}");
            assert_eq!(to_utf8::<Wide>(&ws, P).value, u8s);

            let w16 = convert::<Utf8, Wide16>(u8s, P);
            assert_eq!(convert::<Wide16, Utf8>(&w16, P).value, u8s);
            let w32 = convert::<Utf8, Wide32>(u8s, P);
            assert_eq!(convert::<Wide32, Utf8>(&w32, P).value, u8s);

            let narrow = to_narrow::<Utf8>(u8s, P);
            assert!(narrow.is_valid());
            assert_eq!(to_utf8::<Narrow>(&narrow, P).value, u8s);
        }
    }

    #[test]
    fn test_wide_native_casts() {
        let ws = to_wide::<Utf8>("中国人".as_bytes(), P).into_inner();
        let us = wide_to_native(&ws);
        assert_eq!(to_utf8::<Native>(&us, P).value, "中国人".as_bytes());
        assert_eq!(native_to_wide(&us), ws);
    }

    #[test]
    fn test_pivot_keeps_partial_result() {
        let broken = b"ab\xFFcd";
        let out = convert::<Narrow, Wide16>(broken, ErrorPolicy::StopOnFirstError);
        assert!(!out.is_valid());
        assert_eq!(out.value, vec![0x61, 0x62]);

        let out = convert::<Narrow, Utf16>(broken, ErrorPolicy::UseReplacementCharacter);
        assert!(!out.is_valid());
        assert_eq!(out.value, vec![0x61, 0x62, 0xFFFD, 0x63, 0x64]);

        let out = convert::<Wide16, Utf8>(&[0x61, 0xD800, 0x62], ErrorPolicy::SkipInvalidValues);
        assert!(!out.is_valid());
        assert_eq!(out.value, b"ab");
    }

    #[test]
    fn test_wide16_to_wide32() {
        let w16: Vec<u16> = "😂x".encode_utf16().collect();
        let out = convert::<Wide16, Wide32>(&w16, P);
        assert!(out.is_valid());
        assert_eq!(out.value, vec![0x1F602, 0x78]);
    }
}
