use uuid::Uuid;

/// Snapshot records keyed by a stable id (transactions, categories).
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records carrying the name shown in chart rows and listings.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// One-line rendering used by CLI listings and debug logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Records filed under a category; the id may not resolve in the snapshot.
pub trait BelongsToCategory {
    fn category_id(&self) -> Uuid;
}
