//! Resolution strategies.
//!
//! A strategy decides how the fragments below a resolution path are combined
//! into a single value.

use crate::error::ConfdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a configuration tree is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// Merge every fragment directly inside the target directory
    #[default]
    Leaves,
    /// Merge ancestor `common` fragments from the root down, then the target's own fragments
    Backcursion,
    /// Collect one document per fragment and per child directory, unmerged
    Array,
}

impl Strategy {
    /// Every known strategy, in declaration order
    pub const ALL: [Strategy; 3] = [Strategy::Leaves, Strategy::Backcursion, Strategy::Array];

    /// The strategy a new handle starts with
    pub fn default_strategy() -> Self {
        Self::default()
    }

    /// Upper-case tag of this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Leaves => "LEAVES",
            Strategy::Backcursion => "BACKCURSION",
            Strategy::Array => "ARRAY",
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfdError::InvalidStrategy {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_leaves() {
        assert_eq!(Strategy::default_strategy(), Strategy::Leaves);
        assert_eq!(Strategy::default(), Strategy::Leaves);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("leaves".parse::<Strategy>().unwrap(), Strategy::Leaves);
        assert_eq!("BackCursion".parse::<Strategy>().unwrap(), Strategy::Backcursion);
        assert_eq!("ARRAY".parse::<Strategy>().unwrap(), Strategy::Array);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "no-such-a-strategy".parse::<Strategy>().unwrap_err();
        assert!(matches!(
            err,
            ConfdError::InvalidStrategy { ref value } if value == "no-such-a-strategy"
        ));
        assert!("".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_serde_uses_upper_case_tags() {
        let json = serde_json::to_string(&Strategy::Backcursion).unwrap();
        assert_eq!(json, "\"BACKCURSION\"");

        let parsed: Strategy = serde_json::from_str("\"ARRAY\"").unwrap();
        assert_eq!(parsed, Strategy::Array);
    }
}
