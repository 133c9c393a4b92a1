//! Domain records consumed by the engine: transactions, categories and the
//! snapshot that bundles them.

pub mod category;
pub mod common;
pub mod snapshot;
pub mod transaction;

pub use category::{default_categories, Category};
pub use common::{BelongsToCategory, Displayable, Identifiable, NamedEntity};
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionKind};
