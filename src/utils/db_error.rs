//! Classification of PostgreSQL constraint violations.

/// Name of the uniqueness constraint on `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

/// Returns true if the error is a unique violation on the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

/// Returns true if the error is a foreign key violation (e.g. a visit for a
/// link that does not exist).
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
