//! Splitting integers into magnitude bands.

use serde::{Deserialize, Serialize};

use crate::convention::{ScaleTable, BAND_BASE};
use crate::error::RangeError;

/// A value in `0..=999` split into its three decimal digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitGroup {
    pub hundreds: u8,
    pub tens: u8,
    pub ones: u8,
}

impl DigitGroup {
    /// Split `value`; `None` when it does not fit in three digits.
    pub fn new(value: u64) -> Option<Self> {
        if value >= BAND_BASE {
            return None;
        }
        Some(Self {
            hundreds: (value / 100) as u8,
            tens: (value / 10 % 10) as u8,
            ones: (value % 10) as u8,
        })
    }

    pub fn value(&self) -> u64 {
        100 * self.hundreds as u64 + 10 * self.tens as u64 + self.ones as u64
    }

    /// The last two digits as one number.
    pub fn remainder(&self) -> u64 {
        10 * self.tens as u64 + self.ones as u64
    }

    pub fn is_zero(&self) -> bool {
        self.value() == 0
    }
}

/// One digit group at a power-of-a-thousand scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub scale_index: usize,
    pub group: DigitGroup,
}

/// Breaks integers into bands aligned with a [`ScaleTable`].
pub struct Decomposer<'a> {
    scales: &'a ScaleTable,
}

impl<'a> Decomposer<'a> {
    pub fn new(scales: &'a ScaleTable) -> Self {
        Self { scales }
    }

    /// Bands of `value`, most significant first, zero bands omitted.
    ///
    /// Zero itself yields the single band `(0, 0)`. Every other band is
    /// guaranteed a scale word with the matching multiplier.
    pub fn decompose(&self, value: u64) -> Result<Vec<Band>, RangeError> {
        let max = self.scales.max_value();
        if value > max {
            return Err(RangeError::TooLarge { value, max });
        }

        if value == 0 {
            return Ok(vec![Band {
                scale_index: 0,
                group: DigitGroup::default(),
            }]);
        }

        let mut bands = Vec::with_capacity(self.scales.band_count());
        let mut remaining = value;
        let mut scale_index = 0;

        while remaining > 0 {
            let group = DigitGroup::new(remaining % BAND_BASE)
                .ok_or(RangeError::TooLarge { value, max })?;
            if !group.is_zero() {
                if !self.scales.covers(scale_index) {
                    return Err(RangeError::MissingScale { scale_index });
                }
                bands.push(Band { scale_index, group });
            }
            remaining /= BAND_BASE;
            scale_index += 1;
        }

        bands.reverse();
        tracing::trace!(value, bands = bands.len(), "decomposed value");
        Ok(bands)
    }
}
