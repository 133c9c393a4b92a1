//! A consistent, read-only view of the store at one point in time.

use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        category::Category,
        common::Identifiable,
        transaction::{Transaction, TransactionKind},
    },
    errors::Result,
};

/// Categories and transactions as handed over by the store collaborator.
///
/// No ordering is assumed for either collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn new(categories: Vec<Category>, transactions: Vec<Transaction>) -> Self {
        Self {
            categories,
            transactions,
        }
    }

    /// Parses a snapshot and checks every transaction amount.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(data)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<()> {
        self.transactions.iter().try_for_each(Transaction::validate)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            transactions = snapshot.transactions.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id() == id)
    }

    /// Categories offered when entering a new transaction of `kind`,
    /// ordered by `sort_order` then name.
    pub fn active_categories(&self, kind: TransactionKind) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self
            .categories
            .iter()
            .filter(|category| category.kind == kind && category.is_active)
            .collect();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        categories
    }

    /// Id-indexed view of the categories.
    pub fn category_index(&self) -> HashMap<Uuid, &Category> {
        index_categories(&self.categories)
    }
}

pub(crate) fn index_categories(categories: &[Category]) -> HashMap<Uuid, &Category> {
    categories
        .iter()
        .map(|category| (category.id(), category))
        .collect()
}
