//! Rendering decomposed bands as a number phrase.

use crate::convention::{GrammaticalForm, Lexicon, NumeralConvention, ScaleEntry};
use crate::decompose::{Band, DigitGroup};
use crate::error::RangeError;

/// Joins band phrases into the final text.
pub struct WordAssembler<'a> {
    lexicon: &'a Lexicon,
    convention: &'a NumeralConvention,
}

impl<'a> WordAssembler<'a> {
    pub fn new(convention: &'a NumeralConvention) -> Self {
        Self {
            lexicon: &convention.lexicon,
            convention,
        }
    }

    /// Render bands produced by [`Decomposer`](crate::Decomposer).
    ///
    /// Fails when a band has no scale word in the convention.
    pub fn assemble(&self, bands: &[Band]) -> Result<String, RangeError> {
        if bands.iter().all(|band| band.group.is_zero()) {
            return Ok(self.lexicon.zero.clone());
        }

        let segments = bands
            .iter()
            .filter(|band| !band.group.is_zero())
            .map(|band| self.render_band(band))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(segments.join(&self.lexicon.joiner()))
    }

    fn render_band(&self, band: &Band) -> Result<String, RangeError> {
        if band.scale_index == 0 {
            return Ok(self.render_group(&band.group));
        }

        let entry = self
            .convention
            .scales
            .entry(band.scale_index)
            .ok_or(RangeError::MissingScale {
                scale_index: band.scale_index,
            })?;

        Ok(render_counted(entry, band.group.value(), || {
            self.render_group(&band.group)
        }))
    }

    /// Words for a single digit group, without any scale word.
    pub fn render_group(&self, group: &DigitGroup) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);

        if group.hundreds > 0 {
            parts.extend(self.lexicon.word_for(group.hundreds as u64 * 100));
        }

        let remainder = group.remainder();
        if (1..=19).contains(&remainder) {
            parts.extend(self.lexicon.word_for(remainder));
        } else {
            // Units are read before tens.
            if group.ones > 0 {
                parts.extend(self.lexicon.word_for(group.ones as u64));
            }
            if group.tens > 0 {
                parts.extend(self.lexicon.word_for(group.tens as u64 * 10));
            }
        }

        parts.join(&self.lexicon.joiner())
    }
}

/// A scale word counted `count` times: one and two fold into the singular and
/// dual words, larger counts are spelled out before the agreeing form.
fn render_counted(entry: &ScaleEntry, count: u64, count_words: impl FnOnce() -> String) -> String {
    match entry.form_for(count) {
        GrammaticalForm::Singular if count == 1 => entry.singular.clone(),
        GrammaticalForm::Dual => entry.dual.clone(),
        form => format!("{} {}", count_words(), entry.word(form)),
    }
}
