use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::Error;

/// Family of coefficient penalty
///
/// Selects the penalty term of the held-out cost and the policy used to rank influential
/// features.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegressionKind {
    /// L2 penalty, shrinks coefficients smoothly towards zero
    Ridge,
    /// L1 penalty, drives coefficients exactly to zero
    Lasso,
}

impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegressionKind::Ridge => write!(f, "ridge"),
            RegressionKind::Lasso => write!(f, "lasso"),
        }
    }
}

impl FromStr for RegressionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ridge" | "l2" => Ok(RegressionKind::Ridge),
            "lasso" | "l1" => Ok(RegressionKind::Lasso),
            other => Err(Error::InvalidArgument(format!(
                "unknown regression kind `{}`",
                other
            ))),
        }
    }
}
