//! Money, percent and month-label formatting for presentation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

/// Separators and sign style used when rendering amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "BRL" => "R$".into(),
        "AUD" => "A$".into(),
        "CAD" => "CA$".into(),
        "CHF" => "CHF ".into(),
        other => format!("{other} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(format: &NumberFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, format.grouping_separator);
    if let Some(fraction) = fraction {
        rendered.push(format.decimal_separator);
        rendered.push_str(fraction);
    }
    if value < 0.0 && rendered.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        rendered = match format.negative_style {
            NegativeStyle::Sign => format!("-{rendered}"),
            NegativeStyle::Parentheses => format!("({rendered})"),
        };
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `amount` in `code` with the default number format, e.g. `€1,234.50`.
pub fn format_money(amount: f64, code: &str) -> String {
    format_money_with(&NumberFormat::default(), amount, code)
}

pub fn format_money_with(format: &NumberFormat, amount: f64, code: &str) -> String {
    let body = format_number(format, amount, minor_units_for(code));
    let symbol = symbol_for(code);
    match body.strip_prefix('-') {
        Some(magnitude) => format!("-{symbol}{magnitude}"),
        None => format!("{symbol}{body}"),
    }
}

/// Like [`format_money`] but always shows the sign, as balances do.
pub fn format_signed_money(amount: f64, code: &str) -> String {
    let formatted = format_money(amount, code);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// Formats a `[0, 1]` ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    let ratio = if ratio.is_finite() { ratio } else { 0.0 };
    format!("{:.1}%", ratio * 100.0)
}

/// Header label such as `March 2025`.
pub fn format_month(date: NaiveDate) -> String {
    format!("{} {}", month_label(date.month()), date.year())
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
