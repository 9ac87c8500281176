//! Arabic numerals and number words.
//!
//! Renders integers as Modern Standard Arabic number phrases, parses such
//! phrases back into integers, and converts digits between the Western,
//! Arabic-Indic and Eastern scripts.
//!
//! The free functions use the standard convention. Build a
//! [`NumeralConvention`] to work with other tables.

use once_cell::sync::Lazy;

pub mod assemble;
pub mod convention;
pub mod decompose;
pub mod error;
pub mod extract;
pub mod parser;
pub mod script;

pub use assemble::WordAssembler;
pub use convention::{
    GrammaticalForm, Lexicon, LexiconAlias, NumeralConvention, ScaleAlias, ScaleEntry, ScaleTable,
    CONVENTION_ENV,
};
pub use decompose::{Band, Decomposer, DigitGroup};
pub use error::{ConventionError, ParseError, RangeError};
pub use extract::{extract_numbers, extract_spans, NumberSpan};
pub use parser::{Classified, PhraseParser, Token, Vocabulary};
pub use script::{
    convert_digits, from_canonical, to_arabic_numerals, to_canonical, to_eastern_numerals,
    to_western_numerals, NumeralScript, UnknownScript,
};

static STANDARD: Lazy<NumeralConvention> = Lazy::new(NumeralConvention::standard);

static STANDARD_PARSER: Lazy<PhraseParser<'static>> = Lazy::new(|| PhraseParser::new(&STANDARD));

/// The Modern Standard Arabic convention shared by the free functions.
pub fn standard_convention() -> &'static NumeralConvention {
    &STANDARD
}

/// Largest value [`number_to_words`] accepts.
pub fn max_magnitude() -> u64 {
    STANDARD.max_value()
}

/// Render `value` as Arabic words.
///
/// Fails for negative values and for values above [`max_magnitude`].
///
/// ```
/// assert_eq!(raqam_core::number_to_words(2025).unwrap(), "ألفان وخمسة وعشرون");
/// ```
pub fn number_to_words(value: i64) -> Result<String, RangeError> {
    STANDARD.render(value)
}

/// Parse an Arabic number phrase.
///
/// ```
/// assert_eq!(raqam_core::words_to_number("خمسة عشر").unwrap(), 15);
/// ```
pub fn words_to_number(phrase: &str) -> Result<u64, ParseError> {
    STANDARD_PARSER.parse(phrase)
}
