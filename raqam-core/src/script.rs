//! Numeral Script Conversion
//!
//! Maps digit glyphs between the three scripts in common use with Arabic
//! text. Every other character passes through unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A set of ten digit glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumeralScript {
    /// 0-9, the canonical digits.
    #[default]
    Western,
    /// ٠-٩ (U+0660..U+0669)
    ArabicIndic,
    /// ۰-۹ (U+06F0..U+06F9), used for Persian and Urdu
    Eastern,
}

impl NumeralScript {
    pub const ALL: [NumeralScript; 3] = [
        NumeralScript::Western,
        NumeralScript::ArabicIndic,
        NumeralScript::Eastern,
    ];

    fn zero(&self) -> char {
        match self {
            NumeralScript::Western => '0',
            NumeralScript::ArabicIndic => '\u{0660}',
            NumeralScript::Eastern => '\u{06F0}',
        }
    }

    /// Glyph for `digit` (0-9) in this script.
    pub fn digit(&self, digit: u32) -> Option<char> {
        if digit > 9 {
            return None;
        }
        char::from_u32(self.zero() as u32 + digit)
    }

    /// Script a digit glyph belongs to.
    pub fn of(ch: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|script| (script.zero()..=script.digit_nine()).contains(&ch))
    }

    fn digit_nine(&self) -> char {
        char::from_u32(self.zero() as u32 + 9).unwrap_or(self.zero())
    }

    /// Numeric value of a digit glyph in any supported script.
    pub fn digit_value(ch: char) -> Option<u32> {
        Self::of(ch).map(|script| ch as u32 - script.zero() as u32)
    }

    pub fn code(&self) -> &'static str {
        match self {
            NumeralScript::Western => "western",
            NumeralScript::ArabicIndic => "arabic-indic",
            NumeralScript::Eastern => "eastern",
        }
    }
}

impl fmt::Display for NumeralScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown numeral script {0:?}")]
pub struct UnknownScript(pub String);

impl FromStr for NumeralScript {
    type Err = UnknownScript;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "western" | "latin" | "ascii" => Ok(NumeralScript::Western),
            "arabic" | "arabic-indic" | "indic" => Ok(NumeralScript::ArabicIndic),
            "eastern" | "persian" | "urdu" => Ok(NumeralScript::Eastern),
            _ => Err(UnknownScript(s.to_string())),
        }
    }
}

/// Rewrite every digit of any supported script into `target`.
pub fn convert_digits(text: &str, target: NumeralScript) -> String {
    text.chars()
        .map(|ch| {
            NumeralScript::digit_value(ch)
                .and_then(|digit| target.digit(digit))
                .unwrap_or(ch)
        })
        .collect()
}

/// Arabic-Indic and Eastern digits to Western ones.
pub fn to_canonical(text: &str) -> String {
    convert_digits(text, NumeralScript::Western)
}

/// Western digits to `target`; other scripts are left alone.
pub fn from_canonical(text: &str, target: NumeralScript) -> String {
    text.chars()
        .map(|ch| match ch.to_digit(10) {
            Some(digit) if ch.is_ascii_digit() => target.digit(digit).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

pub fn to_western_numerals(text: &str) -> String {
    to_canonical(text)
}

pub fn to_arabic_numerals(text: &str) -> String {
    convert_digits(text, NumeralScript::ArabicIndic)
}

pub fn to_eastern_numerals(text: &str) -> String {
    convert_digits(text, NumeralScript::Eastern)
}
