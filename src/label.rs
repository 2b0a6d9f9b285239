//! Classification labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeriNewsError};

/// Outcome of classifying one news item.
///
/// The numeric codes are fixed by the fitted models: 0 is real news and 1 is
/// fake news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    /// Map a model class code to a label.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Label::Real),
            1 => Ok(Label::Fake),
            other => Err(VeriNewsError::invalid_argument(format!(
                "Unknown class code {other}, expected 0 (real) or 1 (fake)"
            ))),
        }
    }

    /// The class code used by the models.
    pub fn code(self) -> u8 {
        match self {
            Label::Real => 0,
            Label::Fake => 1,
        }
    }

    /// Human readable verdict shown to the end user.
    pub fn verdict(self) -> &'static str {
        match self {
            Label::Real => "This news is real ✅",
            Label::Fake => "Careful! This is fake news ⛔",
        }
    }

    /// Check whether this label marks the news as fake.
    pub fn is_fake(self) -> bool {
        self == Label::Fake
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Real => write!(f, "real"),
            Label::Fake => write!(f, "fake"),
        }
    }
}

impl FromStr for Label {
    type Err = VeriNewsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" | "0" => Ok(Label::Real),
            "fake" | "1" => Ok(Label::Fake),
            other => Err(VeriNewsError::invalid_argument(format!(
                "Unknown label '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Label::from_code(0).unwrap(), Label::Real);
        assert_eq!(Label::from_code(1).unwrap(), Label::Fake);
        assert!(Label::from_code(2).is_err());
        assert!(Label::from_code(-1).is_err());
        assert_eq!(Label::Real.code(), 0);
        assert_eq!(Label::Fake.code(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Label::Real.to_string(), "real");
        assert_eq!(Label::Fake.to_string(), "fake");
        assert!(Label::Real.verdict().contains("real"));
        assert!(Label::Fake.verdict().contains("fake"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("REAL".parse::<Label>().unwrap(), Label::Real);
        assert_eq!("1".parse::<Label>().unwrap(), Label::Fake);
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Label::Fake).unwrap(), "\"fake\"");
        let label: Label = serde_json::from_str("\"real\"").unwrap();
        assert_eq!(label, Label::Real);
    }
}
