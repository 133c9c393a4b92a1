use std::path::Path;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::{resolve_tap, shift_month, DayMarkerIndex};
use crate::config::{Config, ConfigManager};
use crate::core::services::{CalendarService, ChartService, MonthView, StatsService, ViewMode};
use crate::currency::{format_money, format_month, format_percent, format_signed_money};
use crate::domain::{default_categories, Displayable, Snapshot};
use crate::errors::{CoreError, Result};
use crate::time::{
    local::{local_date, start_of_local_day},
    Clock, DateRange, Period, SystemClock,
};
use crate::utils::build_info;

use super::args::{Command, Invocation, Options};
use super::output::{self, OutputPreferences};

#[derive(Serialize)]
struct StatsReport {
    period: Period,
    range: DateRange,
    currency_code: String,
    income_total: f64,
    expense_total: f64,
    balance: f64,
}

#[derive(Serialize)]
struct MarkerLine {
    date: NaiveDate,
    has_income: bool,
    has_expense: bool,
}

pub fn execute(invocation: Invocation) -> Result<()> {
    let Invocation { command, options } = invocation;
    output::set_preferences(OutputPreferences {
        plain: options.plain || options.json,
        quiet: options.json,
    });
    tracing::debug!(?command, "executing command");

    match &command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            output::info(build_info::current());
            return Ok(());
        }
        Command::Seed => {
            let snapshot = Snapshot::new(default_categories(), Vec::new());
            return print_json(&snapshot);
        }
        _ => {}
    }

    let manager = match &options.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::default_location(),
    };
    let mut config = manager.load()?;
    if let Some(week_start) = options.week_start {
        config.week_start = week_start;
    }

    match config.fixed_offset()? {
        Some(offset) => run_in_zone(&command, &options, &config, &offset),
        None => run_in_zone(&command, &options, &config, &Local),
    }
}

fn run_in_zone<Tz: TimeZone>(
    command: &Command,
    options: &Options,
    config: &Config,
    tz: &Tz,
) -> Result<()> {
    let anchor = anchor_instant(options, tz)?;
    match command {
        Command::Grid { snapshot } => grid(&load(snapshot)?, options, config, anchor, tz),
        Command::Markers { snapshot } => markers(&load(snapshot)?, options, config, anchor, tz),
        Command::Stats { snapshot } => stats(&load(snapshot)?, options, config, anchor, tz),
        Command::Charts { snapshot, mode } => {
            charts(&load(snapshot)?, options, config, *mode, anchor, tz)
        }
        Command::Tap { month, tapped } => {
            let outcome = resolve_tap(
                *month,
                *tapped,
                config.auto_switch_month_on_out_of_month_tap,
            );
            if options.json {
                return print_json(&outcome);
            }
            output::info(format!(
                "Selected {}, showing {}",
                outcome.selected,
                format_month(outcome.month_start)
            ));
            if outcome.month_changed {
                output::success("Month changed");
            }
            Ok(())
        }
        Command::Help | Command::Version | Command::Seed => Ok(()),
    }
}

fn anchor_instant<Tz: TimeZone>(options: &Options, tz: &Tz) -> Result<DateTime<Utc>> {
    match options.date {
        Some(date) => start_of_local_day(date, tz)
            .ok_or_else(|| CoreError::InvalidInput(format!("date {date} cannot be represented"))),
        None => Ok(SystemClock.now()),
    }
}

fn load(path: &Path) -> Result<Snapshot> {
    Snapshot::load(path)
}

fn period_range<Tz: TimeZone>(
    options: &Options,
    config: &Config,
    anchor: DateTime<Utc>,
    tz: &Tz,
) -> (Period, DateRange) {
    let period = options.period.unwrap_or(config.default_charts_period);
    let range = DateRange::for_period(period, anchor, config.week_start, tz);
    (period, range)
}

fn grid<Tz: TimeZone>(
    snapshot: &Snapshot,
    options: &Options,
    config: &Config,
    anchor: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let view = CalendarService::month_view(
        &snapshot.transactions,
        anchor,
        config.week_start,
        tz,
        &config.default_currency_code,
    );
    if options.json {
        return print_json(&view);
    }
    output::section(format_month(view.grid.month_start));
    render_grid(&view, tz);
    render_totals(
        view.stats.income_total,
        view.stats.expense_total,
        &view.currency_code,
    );
    let month = view.grid.month_start;
    output::info(format!(
        "Previous: {}  Next: {}",
        shift_month(month, -1).format("%Y-%m"),
        shift_month(month, 1).format("%Y-%m")
    ));
    Ok(())
}

fn render_grid<Tz: TimeZone>(view: &MonthView, tz: &Tz) {
    let header: Vec<String> = view
        .grid
        .week_start
        .header_labels()
        .iter()
        .map(|label| format!("{label:<4}"))
        .collect();
    output::info(header.join(" ").trim_end());

    let cells = view.cell_markers(tz);
    for row in cells.chunks(7) {
        let line: Vec<String> = row
            .iter()
            .map(|(date, in_month, marker)| {
                let text = format!("{:>2}{}", date.day(), output::marker_glyphs(*marker));
                if *in_month {
                    text
                } else {
                    output::muted(text)
                }
            })
            .collect();
        output::info(line.join(" "));
    }
}

fn render_totals(income: f64, expense: f64, currency: &str) {
    output::info(format!("Income   {}", format_money(income, currency)));
    output::info(format!("Expense  {}", format_money(expense, currency)));
    let balance = income - expense;
    output::info(format!(
        "Balance  {}",
        output::amount(balance, format_signed_money(balance, currency))
    ));
}

fn markers<Tz: TimeZone>(
    snapshot: &Snapshot,
    options: &Options,
    config: &Config,
    anchor: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let (_, range) = period_range(options, config, anchor, tz);
    let index = DayMarkerIndex::build(&snapshot.transactions, &range, tz);
    let lines: Vec<MarkerLine> = index
        .iter()
        .map(|(start, marker)| MarkerLine {
            date: local_date(*start, tz),
            has_income: marker.has_income,
            has_expense: marker.has_expense,
        })
        .collect();
    if options.json {
        return print_json(&lines);
    }
    output::section(format!("Markers {range}"));
    if lines.is_empty() {
        output::info("No transactions in this period.");
    }
    for line in &lines {
        let mut kinds = Vec::new();
        if line.has_income {
            kinds.push("income");
        }
        if line.has_expense {
            kinds.push("expense");
        }
        output::info(format!("{}  {}", line.date, kinds.join(", ")));
        if let Some(start) = start_of_local_day(line.date, tz) {
            let day = DateRange::day(start, tz);
            for txn in StatsService::transactions_in(&snapshot.transactions, &day, ViewMode::Balance)
            {
                output::info(output::muted(format!("    {}", txn.display_label())));
            }
        }
    }
    Ok(())
}

fn stats<Tz: TimeZone>(
    snapshot: &Snapshot,
    options: &Options,
    config: &Config,
    anchor: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let (period, range) = period_range(options, config, anchor, tz);
    let stats = StatsService::period_stats(&snapshot.transactions, &range);
    let currency_code =
        StatsService::currency_for(&snapshot.transactions, &range, &config.default_currency_code);
    if options.json {
        return print_json(&StatsReport {
            period,
            range,
            currency_code,
            income_total: stats.income_total,
            expense_total: stats.expense_total,
            balance: stats.balance(),
        });
    }
    output::section(format!("{period} {range}"));
    render_totals(stats.income_total, stats.expense_total, &currency_code);
    Ok(())
}

fn charts<Tz: TimeZone>(
    snapshot: &Snapshot,
    options: &Options,
    config: &Config,
    mode: ViewMode,
    anchor: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let (period, range) = period_range(options, config, anchor, tz);
    let chart = match period {
        Period::Month => ChartService::aggregate_month(
            &snapshot.transactions,
            &snapshot.categories,
            anchor,
            tz,
            mode,
        ),
        _ => ChartService::aggregate(&snapshot.transactions, &snapshot.categories, &range, mode),
    };
    if options.json {
        return print_json(&chart);
    }

    let currency =
        StatsService::currency_for(&snapshot.transactions, &range, &config.default_currency_code);
    output::section(format!("{period} {mode} {range}"));
    if chart.is_empty() {
        output::info("No transactions in this period.");
        return Ok(());
    }
    for row in &chart.rows {
        let rendered = match mode {
            ViewMode::Balance => format_signed_money(row.amount, &currency),
            ViewMode::Income | ViewMode::Expense => format_money(row.amount, &currency),
        };
        output::info(format!(
            "{:<20} {:>14} {:>7}",
            row.name,
            rendered,
            format_percent(row.percent)
        ));
    }
    output::info(format!(
        "Total {} across {} transactions",
        match mode {
            ViewMode::Balance => format_signed_money(chart.total_amount, &currency),
            ViewMode::Income | ViewMode::Expense => format_money(chart.total_amount, &currency),
        },
        chart.transaction_count
    ));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_usage() {
    println!(
        "Usage: expense_core_cli <command> [options]\n\
         Commands:\n  \
         grid <snapshot.json>       month grid with day markers and totals\n  \
         markers <snapshot.json>    days with income or expense in the period\n  \
         stats <snapshot.json>      income, expense and balance for the period\n  \
         charts <snapshot.json>     per-category breakdown (--mode income|expense|balance)\n  \
         tap <YYYY-MM> <YYYY-MM-DD> resolve a tap on a grid cell\n  \
         seed                       print the default categories as a snapshot\n  \
         version                    print build information\n\
         Options:\n  \
         --date <YYYY-MM[-DD]>      anchor date (defaults to today)\n  \
         --period <day|week|month|year>\n  \
         --week-start <sunday|monday>\n  \
         --config <path>            config file (defaults to $EXPENSE_CORE_HOME/config.json)\n  \
         --json                     machine-readable output\n  \
         --plain                    disable colors"
    );
}
