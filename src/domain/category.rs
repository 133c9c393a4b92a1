//! Domain types representing transaction categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{Displayable, Identifiable, NamedEntity},
    transaction::TransactionKind,
};

/// Groups transactions of a single kind for charts and pickers.
///
/// Categories are referenced by id from transactions and are never owned by
/// them. Deactivating a category hides it from new-entry pickers while
/// historical transactions keep aggregating under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: TransactionKind,
    pub icon_key: String,
    pub color_key: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "Category::default_is_active")]
    pub is_active: bool,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        kind: TransactionKind,
        icon_key: impl Into<String>,
        color_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            icon_key: icon_key.into(),
            color_key: color_key.into(),
            sort_order: 0,
            is_active: true,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Soft-deletes the category.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    fn default_is_active() -> bool {
        true
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        if self.is_active {
            format!("{} ({})", self.name, self.kind)
        } else {
            format!("{} ({}, inactive)", self.name, self.kind)
        }
    }
}

const DEFAULT_INCOME: [(&str, &str, &str); 3] = [
    ("Salary", "banknote", "incomeGreen"),
    ("Deposit", "arrow.down.circle", "incomeGreen"),
    ("Savings", "tray.full", "incomeGreen"),
];

const DEFAULT_EXPENSE: [(&str, &str, &str); 13] = [
    ("Food", "fork.knife", "expenseGreen"),
    ("Bills", "doc.text", "expenseRed"),
    ("Clothes", "tshirt.fill", "expenseOrange"),
    ("Entertainment", "gamecontroller", "expenseOlive"),
    ("Fuel", "fuelpump", "expenseGray"),
    ("General", "basket", "expenseBrown"),
    ("Gifts", "gift", "expensePink"),
    ("Health", "cross.case", "expenseRed"),
    ("Holidays", "airplane", "expenseBlue"),
    ("Home", "house", "expenseGray"),
    ("Kids", "figure.and.child.holdinghands", "expenseYellow"),
    ("Shopping", "bag", "expenseOrange"),
    ("Sports", "sportscourt", "expenseBlue"),
];

/// The starter category set offered to a fresh store: income categories
/// first, then expense categories, with a running `sort_order`.
pub fn default_categories() -> Vec<Category> {
    let income = DEFAULT_INCOME
        .iter()
        .map(|entry| (TransactionKind::Income, entry));
    let expense = DEFAULT_EXPENSE
        .iter()
        .map(|entry| (TransactionKind::Expense, entry));

    income
        .chain(expense)
        .enumerate()
        .map(|(order, (kind, (name, icon, color)))| {
            Category::new(*name, kind, *icon, *color).with_sort_order(order as i32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_are_ordered_and_active() {
        let categories = default_categories();
        assert_eq!(categories.len(), 16);
        assert!(categories.iter().all(|c| c.is_active));
        assert_eq!(categories[0].name, "Salary");
        assert_eq!(categories[3].name, "Food");
        assert_eq!(categories[3].kind, TransactionKind::Expense);
        let orders: Vec<i32> = categories.iter().map(|c| c.sort_order).collect();
        assert_eq!(orders, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn missing_activity_flag_defaults_to_active() {
        let json = format!(
            r#"{{"id":"{}","name":"Food","kind":"expense","icon_key":"fork.knife","color_key":"green"}}"#,
            Uuid::new_v4()
        );
        let category: Category = serde_json::from_str(&json).unwrap();
        assert!(category.is_active);
        assert_eq!(category.sort_order, 0);
    }

    #[test]
    fn label_marks_inactive_categories() {
        let mut category = Category::new("Gifts", TransactionKind::Expense, "gift", "pink");
        assert_eq!(category.name(), "Gifts");
        assert_eq!(category.display_label(), "Gifts (Expense)");
        category.deactivate();
        assert_eq!(category.display_label(), "Gifts (Expense, inactive)");
    }
}
