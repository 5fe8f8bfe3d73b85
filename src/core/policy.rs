/// Error recovery policy and the value+validity carrier returned by every conversion.

use serde::Deserialize;
use std::fmt;
use std::ops::{ControlFlow, Deref, DerefMut};
use std::str::FromStr;

use super::codec::{CodeUnit, REPLACEMENT};
use crate::error::Error;

/// What a conversion does when it meets an invalid code unit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ErrorPolicy {
    /// Emit U+FFFD in the destination encoding and keep going.
    #[default]
    #[serde(rename = "replace")]
    UseReplacementCharacter,
    /// Drop the invalid units and keep going.
    #[serde(rename = "skip")]
    SkipInvalidValues,
    /// Return what was converted so far.
    #[serde(rename = "stop")]
    StopOnFirstError,
}

impl ErrorPolicy {
    /// Apply the policy to one invalid sequence. `Break` ends the conversion.
    pub(crate) fn recover<U: CodeUnit>(self, out: &mut Vec<U>) -> ControlFlow<()> {
        match self {
            Self::UseReplacementCharacter => {
                U::encode(REPLACEMENT, out);
                ControlFlow::Continue(())
            }
            Self::SkipInvalidValues => ControlFlow::Continue(()),
            Self::StopOnFirstError => ControlFlow::Break(()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::UseReplacementCharacter => "replace",
            Self::SkipInvalidValues => "skip",
            Self::StopOnFirstError => "stop",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" | "use-replacement-character" => Ok(Self::UseReplacementCharacter),
            "skip" | "skip-invalid-values" => Ok(Self::SkipInvalidValues),
            "stop" | "stop-on-first-error" => Ok(Self::StopOnFirstError),
            _ => Err(Error::UnknownPolicy(s.to_owned())),
        }
    }
}

/// A produced value together with whether the input was entirely well formed.
///
/// When `is_valid` is false the value is still meaningful: it holds whatever the
/// active [`ErrorPolicy`] salvaged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome<T> {
    pub value: T,
    pub is_valid: bool,
}

impl<T> Outcome<T> {
    pub fn valid(value: T) -> Self {
        Self { value, is_valid: true }
    }

    pub fn invalid(value: T) -> Self {
        Self { value, is_valid: false }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// The value, only if nothing had to be recovered.
    pub fn ok(self) -> Option<T> {
        if self.is_valid {
            Some(self.value)
        } else {
            None
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome { value: f(self.value), is_valid: self.is_valid }
    }

    /// Feed the value through a second step; validity is the AND of both.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        let next = f(self.value);
        Outcome { value: next.value, is_valid: self.is_valid && next.is_valid }
    }
}

impl<T> Deref for Outcome<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Outcome<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_replace() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::UseReplacementCharacter);
    }

    #[test]
    fn test_recover_replace_utf8() {
        let mut out: Vec<u8> = b"ab".to_vec();
        let flow = ErrorPolicy::UseReplacementCharacter.recover(&mut out);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(out, "ab\u{FFFD}".as_bytes());
    }

    #[test]
    fn test_recover_replace_utf16() {
        let mut out: Vec<u16> = Vec::new();
        let _ = ErrorPolicy::UseReplacementCharacter.recover(&mut out);
        assert_eq!(out, vec![0xFFFD]);
    }

    #[test]
    fn test_recover_skip_and_stop() {
        let mut out: Vec<u32> = vec![0x41];
        assert_eq!(ErrorPolicy::SkipInvalidValues.recover(&mut out), ControlFlow::Continue(()));
        assert_eq!(ErrorPolicy::StopOnFirstError.recover(&mut out), ControlFlow::Break(()));
        assert_eq!(out, vec![0x41]);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("skip".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::SkipInvalidValues);
        assert_eq!("STOP".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::StopOnFirstError);
        assert_eq!(
            "use-replacement-character".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::UseReplacementCharacter
        );
        assert!("ignore".parse::<ErrorPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrips() {
        for p in [
            ErrorPolicy::UseReplacementCharacter,
            ErrorPolicy::SkipInvalidValues,
            ErrorPolicy::StopOnFirstError,
        ] {
            assert_eq!(p.to_string().parse::<ErrorPolicy>().unwrap(), p);
        }
    }

    #[test]
    fn test_outcome_and_then_combines_validity() {
        let first = Outcome::invalid(1);
        let second = first.and_then(|v| Outcome::valid(v + 1));
        assert_eq!(second.value, 2);
        assert!(!second.is_valid());

        let ok = Outcome::valid("a").and_then(|v| Outcome::valid(v.len()));
        assert_eq!(ok.ok(), Some(1));
    }

    #[test]
    fn test_outcome_deref() {
        let out = Outcome::valid(vec![1u8, 2, 3]);
        assert_eq!(out.len(), 3);
        assert_eq!(out.into_inner(), vec![1, 2, 3]);
    }
}
