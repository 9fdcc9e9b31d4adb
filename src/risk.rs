//! Derived employee attributes: age and risk classification.
//!
//! Risk is never persisted. Every consumer goes through one canonical
//! [`RiskTable`] built from config, so the thresholds and labels can be
//! re-cut without a code change.

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One band of the risk table: ages up to and including `upper` get
/// `label`. A band without an upper bound is open-ended and must be last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskBand {
    pub upper: Option<i32>,
    pub label: String,
}

/// Ordered threshold table, evaluated ascending, first match wins.
/// Total over all of `i32`: negative ages land in the lowest band and
/// anything past the last bound lands in the open-ended band.
#[derive(Debug, Clone)]
pub struct RiskTable {
    bands: Vec<RiskBand>,
}

impl RiskTable {
    pub fn new(bands: Vec<RiskBand>) -> Result<Self> {
        let Some((last, bounded)) = bands.split_last() else {
            bail!("Risk table needs at least two bands");
        };
        if bounded.is_empty() {
            bail!("Risk table needs at least two bands");
        }
        if last.upper.is_some() {
            bail!("The last risk band must be open-ended (no upper bound)");
        }

        let mut prev: Option<i32> = None;
        for band in bounded {
            let Some(upper) = band.upper else {
                bail!("Only the last risk band may omit its upper bound");
            };
            if band.label.is_empty() {
                bail!("Risk band labels cannot be empty");
            }
            if prev.is_some_and(|p| upper <= p) {
                bail!("Risk band bounds must be strictly ascending");
            }
            prev = Some(upper);
        }

        if last.label.is_empty() {
            bail!("Risk band labels cannot be empty");
        }

        Ok(Self { bands })
    }

    /// Classify an age into its risk label.
    #[must_use]
    pub fn classify(&self, age: i32) -> &str {
        for band in &self.bands {
            match band.upper {
                Some(upper) if age <= upper => return &band.label,
                Some(_) => {}
                None => return &band.label,
            }
        }
        // new() guarantees a trailing open-ended band
        unreachable!("risk table has no open-ended band")
    }
}

impl Default for RiskTable {
    fn default() -> Self {
        Self::new(default_bands()).expect("default bands are valid")
    }
}

/// Canonical taxonomy: the age-keyed three-tier model.
pub fn default_bands() -> Vec<RiskBand> {
    vec![
        RiskBand {
            upper: Some(27),
            label: "High".to_string(),
        },
        RiskBand {
            upper: Some(35),
            label: "Medium".to_string(),
        },
        RiskBand {
            upper: None,
            label: "Low".to_string(),
        },
    ]
}

/// Age in completed calendar years as of `today`.
///
/// The reference date is a parameter so callers (and tests) control "now".
/// A birth date in the future yields a zero or negative age; rejecting
/// that is input validation's job, not this function's.
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_completed_years() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2025, 6, 15)), 25);
        assert_eq!(age_on(birth, date(2025, 6, 14)), 24);
        assert_eq!(age_on(birth, date(2025, 6, 16)), 25);
        assert_eq!(age_on(birth, date(2025, 12, 31)), 25);
        assert_eq!(age_on(birth, date(2025, 1, 1)), 24);
    }

    #[test]
    fn test_age_future_birth_date_not_rejected() {
        assert_eq!(age_on(date(2030, 1, 1), date(2025, 6, 1)), -5);
        assert_eq!(age_on(date(2025, 6, 1), date(2025, 6, 1)), 0);
    }

    #[test]
    fn test_classify_default_bands() {
        let table = RiskTable::default();
        assert_eq!(table.classify(18), "High");
        assert_eq!(table.classify(27), "High");
        assert_eq!(table.classify(28), "Medium");
        assert_eq!(table.classify(35), "Medium");
        assert_eq!(table.classify(36), "Low");
        assert_eq!(table.classify(80), "Low");
    }

    #[test]
    fn test_classify_is_total() {
        let table = RiskTable::default();
        assert_eq!(table.classify(i32::MIN), "High");
        assert_eq!(table.classify(-1), "High");
        assert_eq!(table.classify(0), "High");
        assert_eq!(table.classify(i32::MAX), "Low");
    }

    #[test]
    fn test_custom_bands() {
        let table = RiskTable::new(vec![
            RiskBand {
                upper: Some(25),
                label: "out of danger".to_string(),
            },
            RiskBand {
                upper: Some(50),
                label: "exercise caution".to_string(),
            },
            RiskBand {
                upper: None,
                label: "please stay home".to_string(),
            },
        ])
        .unwrap();

        assert_eq!(table.classify(25), "out of danger");
        assert_eq!(table.classify(26), "exercise caution");
        assert_eq!(table.classify(51), "please stay home");
    }

    #[test]
    fn test_invalid_tables_rejected() {
        // missing open-ended band
        assert!(RiskTable::new(vec![
            RiskBand {
                upper: Some(27),
                label: "High".to_string()
            },
            RiskBand {
                upper: Some(35),
                label: "Medium".to_string()
            },
        ])
        .is_err());

        // bounds out of order
        assert!(RiskTable::new(vec![
            RiskBand {
                upper: Some(35),
                label: "A".to_string()
            },
            RiskBand {
                upper: Some(27),
                label: "B".to_string()
            },
            RiskBand {
                upper: None,
                label: "C".to_string()
            },
        ])
        .is_err());

        // too short
        assert!(RiskTable::new(vec![RiskBand {
            upper: None,
            label: "Only".to_string()
        }])
        .is_err());
    }
}
