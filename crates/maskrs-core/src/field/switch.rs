// Maskrs Dynamic Mask Switching
// Picks between a short and a long pattern based on how much the user typed

use serde::Deserialize;

/// Which characters of the masked value count towards the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharCount {
    /// ASCII digits only
    Digits,
    /// ASCII letters and digits
    Alphanumeric,
}

impl CharCount {
    /// Count the characters of `value` in this class
    pub fn count(self, value: &str) -> usize {
        value
            .chars()
            .filter(|c| match self {
                CharCount::Digits => c.is_ascii_digit(),
                CharCount::Alphanumeric => c.is_ascii_alphanumeric(),
            })
            .count()
    }
}

/// Hook that swaps a field's pattern once the value outgrows it.
///
/// After every edit that changed the value, the field asks the switch which
/// pattern fits and rebuilds its mask when the answer differs from the
/// active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSwitch {
    pub count: CharCount,
    pub threshold: usize,
    pub short: String,
    pub long: String,
}

impl MaskSwitch {
    pub fn new(
        count: CharCount,
        threshold: usize,
        short: impl Into<String>,
        long: impl Into<String>,
    ) -> Self {
        Self {
            count,
            threshold,
            short: short.into(),
            long: long.into(),
        }
    }

    /// Pattern that should be active for `masked`
    pub fn select(&self, masked: &str) -> &str {
        if self.count.count(masked) > self.threshold {
            &self.long
        } else {
            &self.short
        }
    }
}
