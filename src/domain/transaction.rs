//! Income and expense records supplied by the external store.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::common::{BelongsToCategory, Displayable, Identifiable},
    errors::CoreError,
};

/// Direction of a money movement. The sign of an amount is implied by the kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies the kind's sign to a non-negative magnitude.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(CoreError::InvalidInput(format!(
                "unknown transaction kind `{other}`"
            ))),
        }
    }
}

/// A single recorded income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    /// Non-negative magnitude.
    pub amount: f64,
    pub currency_code: String,
    pub timestamp: DateTime<Utc>,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        currency_code: impl Into<String>,
        timestamp: DateTime<Utc>,
        category_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            currency_code: currency_code.into().to_uppercase(),
            timestamp,
            category_id,
            note: None,
        }
    }

    pub fn income(
        amount: f64,
        currency_code: impl Into<String>,
        timestamp: DateTime<Utc>,
        category_id: Uuid,
    ) -> Self {
        Self::new(
            TransactionKind::Income,
            amount,
            currency_code,
            timestamp,
            category_id,
        )
    }

    pub fn expense(
        amount: f64,
        currency_code: impl Into<String>,
        timestamp: DateTime<Utc>,
        category_id: Uuid,
    ) -> Self {
        Self::new(
            TransactionKind::Expense,
            amount,
            currency_code,
            timestamp,
            category_id,
        )
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    /// Rejects amounts that are negative, NaN or infinite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.amount.is_finite() && self.amount >= 0.0 {
            return Ok(());
        }
        Err(CoreError::InvalidInput(format!(
            "transaction {} has invalid amount {}",
            self.id, self.amount
        )))
    }

    /// Net contribution to a balance: `+amount` for income, `-amount` for expense.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> Uuid {
        self.category_id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let base = format!(
            "{} {} {:.2} {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.amount,
            self.currency_code
        );
        match &self.note {
            Some(note) => format!("{base} ({note})"),
            None => base,
        }
    }
}
