use std::path::PathBuf;

use chrono::NaiveDate;

use crate::core::services::ViewMode;
use crate::errors::{CoreError, Result};
use crate::time::{Period, WeekStart};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Grid { snapshot: PathBuf },
    Markers { snapshot: PathBuf },
    Stats { snapshot: PathBuf },
    Charts { snapshot: PathBuf, mode: ViewMode },
    Tap { month: NaiveDate, tapped: NaiveDate },
    Seed,
    Version,
    Help,
}

/// Flags shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub period: Option<Period>,
    pub week_start: Option<WeekStart>,
    pub json: bool,
    pub plain: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
}

pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut options = Options::default();
    let mut mode = None;
    let mut help = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--date" | "--month" => {
                options.date = Some(parse_date(&value_for(&arg, args.next())?)?)
            }
            "--period" => options.period = Some(value_for(&arg, args.next())?.parse()?),
            "--week-start" => options.week_start = Some(value_for(&arg, args.next())?.parse()?),
            "--mode" => mode = Some(value_for(&arg, args.next())?.parse::<ViewMode>()?),
            "--json" => options.json = true,
            "--plain" => options.plain = true,
            "-h" | "--help" => help = true,
            flag if flag.starts_with("--") => {
                return Err(CoreError::InvalidInput(format!("unknown option `{flag}`")))
            }
            other => positional.push(other.to_string()),
        }
    }

    if help {
        return Ok(Invocation {
            command: Command::Help,
            options,
        });
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("grid") => Command::Grid {
            snapshot: snapshot_path(positional.next())?,
        },
        Some("markers") => Command::Markers {
            snapshot: snapshot_path(positional.next())?,
        },
        Some("stats") => Command::Stats {
            snapshot: snapshot_path(positional.next())?,
        },
        Some("charts") => Command::Charts {
            snapshot: snapshot_path(positional.next())?,
            mode: mode.unwrap_or_default(),
        },
        Some("tap") => {
            let month = positional
                .next()
                .ok_or_else(|| CoreError::InvalidInput("tap needs a month".into()))?;
            let tapped = positional
                .next()
                .ok_or_else(|| CoreError::InvalidInput("tap needs a tapped date".into()))?;
            Command::Tap {
                month: parse_date(&month)?,
                tapped: parse_date(&tapped)?,
            }
        }
        Some("seed") => Command::Seed,
        Some("version") => Command::Version,
        Some(other) => {
            return Err(CoreError::InvalidInput(format!("unknown command `{other}`")));
        }
    };

    if let Some(extra) = positional.next() {
        return Err(CoreError::InvalidInput(format!(
            "unexpected argument `{extra}`"
        )));
    }

    Ok(Invocation { command, options })
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM` (first of the month).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
        .map_err(|_| CoreError::InvalidInput(format!("invalid date `{trimmed}`")))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| CoreError::InvalidInput(format!("{flag} needs a value")))
}

fn snapshot_path(value: Option<String>) -> Result<PathBuf> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| CoreError::InvalidInput("missing snapshot file".into()))
}
