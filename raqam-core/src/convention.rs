//! Numeral Conventions
//!
//! A [`NumeralConvention`] bundles the two static tables the converters
//! work from:
//! - [`Lexicon`]: word forms for zero, 1-19, the tens and the hundreds,
//!   plus the conjunction joining segments
//! - [`ScaleTable`]: magnitude words (thousand, million, ...) with their
//!   singular, dual and plural forms
//!
//! Conventions are plain values. Several can coexist, and any of them can be
//! loaded from or saved to JSON.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assemble::WordAssembler;
use crate::decompose::Decomposer;
use crate::error::{ConventionError, ParseError, RangeError};
use crate::parser::{PhraseParser, Vocabulary};

/// Environment variable naming a JSON convention file.
pub const CONVENTION_ENV: &str = "RAQAM_CONVENTION";

/// Multiplier step between adjacent magnitude bands.
pub const BAND_BASE: u64 = 1000;

/// Grammatical number of a counted scale word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammaticalForm {
    Singular,
    Dual,
    Plural,
}

/// One magnitude word with its agreement forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleEntry {
    pub multiplier: u64,
    pub singular: String,
    pub dual: String,
    pub plural: String,
    /// Largest count still taking the plural form; counts above it go back
    /// to the singular.
    #[serde(default = "default_plural_max")]
    pub plural_max: u64,
    /// Extra surface forms accepted when parsing.
    #[serde(default)]
    pub aliases: Vec<ScaleAlias>,
}

fn default_plural_max() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleAlias {
    pub word: String,
    pub form: GrammaticalForm,
}

impl ScaleEntry {
    /// Form taken by this scale word when counted `count` times.
    pub fn form_for(&self, count: u64) -> GrammaticalForm {
        let ranges = [
            (1, 1, GrammaticalForm::Singular),
            (2, 2, GrammaticalForm::Dual),
            (3, self.plural_max, GrammaticalForm::Plural),
        ];
        ranges
            .iter()
            .find(|(low, high, _)| (*low..=*high).contains(&count))
            .map(|(_, _, form)| *form)
            .unwrap_or(GrammaticalForm::Singular)
    }

    pub fn word(&self, form: GrammaticalForm) -> &str {
        match form {
            GrammaticalForm::Singular => &self.singular,
            GrammaticalForm::Dual => &self.dual,
            GrammaticalForm::Plural => &self.plural,
        }
    }
}

/// Magnitude words ordered from thousand upward.
///
/// Scale index 0 is the units band and has no word; index `i > 0` maps to
/// `entries[i - 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTable {
    pub entries: Vec<ScaleEntry>,
}

impl ScaleTable {
    pub fn entry(&self, scale_index: usize) -> Option<&ScaleEntry> {
        scale_index
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
    }

    pub fn multiplier(&self, scale_index: usize) -> Option<u64> {
        if scale_index == 0 {
            return Some(1);
        }
        self.entry(scale_index).map(|entry| entry.multiplier)
    }

    /// Number of bands, units included.
    pub fn band_count(&self) -> usize {
        self.entries.len() + 1
    }

    /// Largest value the table accepts: the top multiplier times 999.
    ///
    /// Also capped by the number of entries, so a table whose multipliers
    /// skip bands cannot claim values it has no words for.
    pub fn max_value(&self) -> u64 {
        let top = self.entries.last().map(|e| e.multiplier).unwrap_or(1);
        let band_limit = u32::try_from(self.band_count())
            .ok()
            .and_then(|bands| BAND_BASE.checked_pow(bands))
            .map_or(u64::MAX, |bound| bound - 1);
        top.saturating_mul(BAND_BASE - 1).min(band_limit)
    }

    /// Whether band `scale_index` has a scale word with the right multiplier.
    pub fn covers(&self, scale_index: usize) -> bool {
        let expected = u32::try_from(scale_index)
            .ok()
            .and_then(|exp| BAND_BASE.checked_pow(exp));
        expected.is_some() && self.multiplier(scale_index) == expected
    }
}

/// Word forms for digit-group values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub zero: String,
    pub conjunction: String,
    /// Whether the conjunction is written fused to the following word.
    #[serde(default = "default_true")]
    pub conjunction_attached: bool,
    /// 1 through 19.
    pub units: Vec<String>,
    /// 20, 30, ... 90.
    pub tens: Vec<String>,
    /// 100, 200, ... 900.
    pub hundreds: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<LexiconAlias>,
}

fn default_true() -> bool {
    true
}

/// A parse-only spelling of a lexicon value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconAlias {
    pub word: String,
    pub value: u64,
}

impl Lexicon {
    /// Canonical word for a value in 1-19, a multiple of ten below 100, or a
    /// multiple of a hundred below 1000.
    pub fn word_for(&self, value: u64) -> Option<&str> {
        let (table, idx) = match value {
            1..=19 => (&self.units, value - 1),
            20..=99 if value % 10 == 0 => (&self.tens, value / 10 - 2),
            100..=999 if value % 100 == 0 => (&self.hundreds, value / 100 - 1),
            _ => return None,
        };
        table.get(idx as usize).map(String::as_str)
    }

    /// Text placed between two rendered segments.
    pub fn joiner(&self) -> String {
        if self.conjunction_attached {
            format!(" {}", self.conjunction)
        } else {
            format!(" {} ", self.conjunction)
        }
    }
}

/// Lexicon and scale table for one numeral convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumeralConvention {
    pub name: String,
    pub lexicon: Lexicon,
    pub scales: ScaleTable,
}

impl Default for NumeralConvention {
    fn default() -> Self {
        Self::standard()
    }
}

const UNITS: [&str; 19] = [
    "واحد",
    "اثنان",
    "ثلاثة",
    "أربعة",
    "خمسة",
    "ستة",
    "سبعة",
    "ثمانية",
    "تسعة",
    "عشرة",
    "أحد عشر",
    "اثنا عشر",
    "ثلاثة عشر",
    "أربعة عشر",
    "خمسة عشر",
    "ستة عشر",
    "سبعة عشر",
    "ثمانية عشر",
    "تسعة عشر",
];

const TENS: [&str; 8] = [
    "عشرون", "ثلاثون", "أربعون", "خمسون", "ستون", "سبعون", "ثمانون", "تسعون",
];

const HUNDREDS: [&str; 9] = [
    "مئة", "مئتان", "ثلاثمئة", "أربعمئة", "خمسمئة", "ستمئة", "سبعمئة", "ثمانمئة", "تسعمئة",
];

// (multiplier, singular, dual, plural, oblique dual)
const SCALES: [(u64, &str, &str, &str, &str); 4] = [
    (1_000, "ألف", "ألفان", "آلاف", "ألفين"),
    (1_000_000, "مليون", "مليونان", "ملايين", "مليونين"),
    (1_000_000_000, "مليار", "ملياران", "مليارات", "مليارين"),
    (1_000_000_000_000, "تريليون", "تريليونان", "تريليونات", "تريليونين"),
];

// Feminine, oblique and alternate spellings.
const ALIASES: &[(&str, u64)] = &[
    ("واحدة", 1),
    ("أحد", 1),
    ("إحدى", 1),
    ("اثنين", 2),
    ("إثنان", 2),
    ("اثنتان", 2),
    ("اثنتين", 2),
    ("ثلاث", 3),
    ("أربع", 4),
    ("خمس", 5),
    ("ست", 6),
    ("سبع", 7),
    ("ثماني", 8),
    ("ثمان", 8),
    ("تسع", 9),
    ("عشر", 10),
    ("احد عشر", 11),
    ("إحدى عشرة", 11),
    ("اثني عشر", 12),
    ("اثنتا عشرة", 12),
    ("اثنتي عشرة", 12),
    ("ثلاث عشرة", 13),
    ("أربع عشرة", 14),
    ("خمس عشرة", 15),
    ("ست عشرة", 16),
    ("سبع عشرة", 17),
    ("ثماني عشرة", 18),
    ("تسع عشرة", 19),
    ("عشرين", 20),
    ("ثلاثين", 30),
    ("أربعين", 40),
    ("خمسين", 50),
    ("ستين", 60),
    ("سبعين", 70),
    ("ثمانين", 80),
    ("تسعين", 90),
    ("مائة", 100),
    ("مئتين", 200),
    ("مائتان", 200),
    ("مائتين", 200),
    ("ثلاثمائة", 300),
    ("أربعمائة", 400),
    ("خمسمائة", 500),
    ("ستمائة", 600),
    ("سبعمائة", 700),
    ("ثمانمائة", 800),
    ("تسعمائة", 900),
    ("ثلاث مئة", 300),
    ("أربع مئة", 400),
    ("خمس مئة", 500),
    ("ست مئة", 600),
    ("سبع مئة", 700),
    ("ثماني مئة", 800),
    ("تسع مئة", 900),
];

impl NumeralConvention {
    /// Modern Standard Arabic, masculine counted forms, up to the trillions.
    pub fn standard() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();

        let entries = SCALES
            .iter()
            .map(|(multiplier, singular, dual, plural, oblique)| ScaleEntry {
                multiplier: *multiplier,
                singular: singular.to_string(),
                dual: dual.to_string(),
                plural: plural.to_string(),
                plural_max: default_plural_max(),
                aliases: vec![ScaleAlias {
                    word: oblique.to_string(),
                    form: GrammaticalForm::Dual,
                }],
            })
            .collect();

        Self {
            name: "msa".to_string(),
            lexicon: Lexicon {
                zero: "صفر".to_string(),
                conjunction: "و".to_string(),
                conjunction_attached: true,
                units: owned(&UNITS),
                tens: owned(&TENS),
                hundreds: owned(&HUNDREDS),
                aliases: ALIASES
                    .iter()
                    .map(|(word, value)| LexiconAlias {
                        word: word.to_string(),
                        value: *value,
                    })
                    .collect(),
            },
            scales: ScaleTable { entries },
        }
    }

    /// Load and validate a convention from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConventionError> {
        let content = fs::read_to_string(path)?;
        let convention: Self = serde_json::from_str(&content)?;
        convention.validate()?;
        Ok(convention)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), ConventionError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Use the file named by `RAQAM_CONVENTION` when set, the standard
    /// convention otherwise.
    pub fn from_env_or_default() -> Result<Self, ConventionError> {
        match std::env::var(CONVENTION_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "loading numeral convention");
                Self::from_path(path)
            }
            Err(_) => Ok(Self::standard()),
        }
    }

    pub fn validate(&self) -> Result<(), ConventionError> {
        let lexicon = &self.lexicon;
        for (label, table, expected) in [
            ("units", &lexicon.units, 19),
            ("tens", &lexicon.tens, 8),
            ("hundreds", &lexicon.hundreds, 9),
        ] {
            if table.len() != expected {
                return Err(ConventionError::invalid(format!(
                    "{label} needs {expected} words, got {}",
                    table.len()
                )));
            }
        }
        if lexicon.zero.trim().is_empty() || lexicon.conjunction.trim().is_empty() {
            return Err(ConventionError::invalid(
                "zero and conjunction words must be non-empty",
            ));
        }

        let mut expected_multiplier = 1u64;
        for (idx, entry) in self.scales.entries.iter().enumerate() {
            expected_multiplier = expected_multiplier
                .checked_mul(BAND_BASE)
                .ok_or_else(|| ConventionError::invalid("scale table too deep for u64"))?;
            if entry.multiplier != expected_multiplier {
                return Err(ConventionError::invalid(format!(
                    "scale {} has multiplier {}, expected {}",
                    idx + 1,
                    entry.multiplier,
                    expected_multiplier
                )));
            }
            if entry.plural_max < 3 {
                return Err(ConventionError::invalid(format!(
                    "scale {:?} plural range must reach at least 3",
                    entry.singular
                )));
            }
        }
        if expected_multiplier.checked_mul(BAND_BASE).is_none() {
            return Err(ConventionError::invalid("scale table too deep for u64"));
        }

        // Surface forms are checked for empties and collisions here.
        Vocabulary::build(self)?;
        Ok(())
    }

    pub fn max_value(&self) -> u64 {
        self.scales.max_value()
    }

    /// Render `value` as words.
    pub fn render(&self, value: i64) -> Result<String, RangeError> {
        let value = u64::try_from(value).map_err(|_| RangeError::Negative { value })?;
        self.render_unsigned(value)
    }

    pub fn render_unsigned(&self, value: u64) -> Result<String, RangeError> {
        let bands = Decomposer::new(&self.scales).decompose(value)?;
        WordAssembler::new(self).assemble(&bands)
    }

    /// Parse a number phrase back into its value.
    ///
    /// Builds a fresh vocabulary on every call; keep a [`PhraseParser`]
    /// around when parsing many phrases.
    pub fn parse(&self, phrase: &str) -> Result<u64, ParseError> {
        PhraseParser::new(self).parse(phrase)
    }

    /// Render many values in parallel, one result per input, in input order.
    pub fn render_many(&self, values: &[i64]) -> Vec<Result<String, RangeError>> {
        values.par_iter().map(|value| self.render(*value)).collect()
    }

    /// Parse many phrases in parallel, one result per input, in input order.
    pub fn parse_many(&self, phrases: &[&str]) -> Vec<Result<u64, ParseError>> {
        let parser = PhraseParser::new(self);
        phrases.par_iter().map(|phrase| parser.parse(phrase)).collect()
    }
}
