use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting granularity selected on the stats dashboard.
///
/// The period drives the average's unit, the streak granularity and the
/// trend window together; they are never configured separately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Weekly, Period::Monthly, Period::Yearly];

    /// Number of days in one averaging unit
    pub fn unit_days(&self) -> f64 {
        match self {
            Period::Weekly => 7.0,
            Period::Monthly => 30.44,
            Period::Yearly => 365.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    /// Dashboard caption for the average ("Avg / week")
    pub fn unit_label(&self) -> &'static str {
        match self {
            Period::Weekly => "week",
            Period::Monthly => "month",
            Period::Yearly => "year",
        }
    }

    /// Dashboard caption for the streak ("Daily Streak" on the weekly view)
    pub fn streak_label(&self) -> &'static str {
        match self {
            Period::Weekly => "Daily",
            Period::Monthly => "Weekly",
            Period::Yearly => "Monthly",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Monthly
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            "yearly" | "year" => Ok(Period::Yearly),
            _ => Err(ParseEnumError::new("period", s, "weekly, monthly, yearly")),
        }
    }
}
