use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Reporting granularity selectable for charts and summaries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    CustomDay,
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::CustomDay, Period::Week, Period::Month, Period::Year];
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::CustomDay => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Year => "Year",
        };
        f.write_str(label)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "custom_day" | "customday" => Ok(Period::CustomDay),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(CoreError::InvalidInput(format!("unknown period `{other}`"))),
        }
    }
}
