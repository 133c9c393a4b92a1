use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// First column of the calendar grid and first day of a week range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    pub fn from_monday_flag(week_starts_on_monday: bool) -> Self {
        if week_starts_on_monday {
            WeekStart::Monday
        } else {
            WeekStart::Sunday
        }
    }

    pub fn starts_on_monday(self) -> bool {
        self == WeekStart::Monday
    }

    /// Calendar weekday number of the start day, 1 = Sunday.
    pub fn first_weekday(self) -> u32 {
        match self {
            WeekStart::Sunday => 1,
            WeekStart::Monday => 2,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Days between the most recent week start and `date`, in `0..7`.
    pub fn days_since_start(self, date: NaiveDate) -> u32 {
        (date.weekday().number_from_sunday() + 7 - self.first_weekday()) % 7
    }

    /// The seven weekdays in display order.
    pub fn ordered_weekdays(self) -> [Weekday; 7] {
        let mut days = [self.weekday(); 7];
        for index in 1..7 {
            days[index] = days[index - 1].succ();
        }
        days
    }

    /// Short English weekday labels in display order.
    pub fn header_labels(self) -> [&'static str; 7] {
        self.ordered_weekdays().map(short_label)
    }
}

fn short_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeekStart::Sunday => "Sunday",
            WeekStart::Monday => "Monday",
        };
        f.write_str(label)
    }
}

impl FromStr for WeekStart {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(CoreError::InvalidInput(format!(
                "week start must be sunday or monday, got `{other}`"
            ))),
        }
    }
}
