#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use expense_core::{
    config::{Config, ConfigManager},
    domain::{default_categories, Category, Snapshot, Transaction},
};
use tempfile::TempDir;

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn category<'a>(categories: &'a [Category], name: &str) -> &'a Category {
    categories
        .iter()
        .find(|category| category.name == name)
        .unwrap_or_else(|| panic!("seed category `{name}` exists"))
}

/// Seed categories plus a handful of March 2025 transactions and two
/// outside the month.
pub fn march_snapshot() -> Snapshot {
    let categories = default_categories();
    let salary = category(&categories, "Salary").id;
    let food = category(&categories, "Food").id;
    let fuel = category(&categories, "Fuel").id;

    let transactions = vec![
        Transaction::income(2500.0, "EUR", utc(2025, 3, 1, 8), salary),
        Transaction::expense(45.0, "EUR", utc(2025, 3, 5, 12), food).with_note("lunch"),
        Transaction::expense(30.0, "EUR", utc(2025, 3, 5, 19), fuel),
        Transaction::expense(120.0, "EUR", utc(2025, 3, 18, 17), food),
        Transaction::income(60.0, "EUR", utc(2025, 3, 18, 9), salary),
        Transaction::expense(999.0, "EUR", utc(2025, 2, 27, 12), food),
        Transaction::income(999.0, "EUR", utc(2025, 4, 2, 12), salary),
    ];
    Snapshot::new(categories, transactions)
}

/// A temp dir holding `snapshot.json` and a UTC `config.json`.
pub struct Workspace {
    pub dir: TempDir,
    pub snapshot: PathBuf,
    pub config: PathBuf,
}

pub fn workspace(snapshot: &Snapshot, config: Config) -> Workspace {
    let dir = TempDir::new().expect("create temp dir");
    let snapshot_path = dir.path().join("snapshot.json");
    std::fs::write(
        &snapshot_path,
        serde_json::to_string_pretty(snapshot).expect("serialize snapshot"),
    )
    .expect("write snapshot");

    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
    manager.save(&config).expect("save config");
    let config_path = manager.path().to_path_buf();

    Workspace {
        dir,
        snapshot: snapshot_path,
        config: config_path,
    }
}

pub fn utc_config() -> Config {
    Config {
        utc_offset_minutes: Some(0),
        ..Config::default()
    }
}
