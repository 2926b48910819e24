// View Types
// Calendar display granularities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Week,
    Day,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Week => "week",
            Granularity::Day => "day",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Granularity::Month),
            "week" => Ok(Granularity::Week),
            "day" => Ok(Granularity::Day),
            other => Err(format!("Unknown calendar view '{}'", other)),
        }
    }
}

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}
