//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Contact form submissions.
    ///
    /// `seq` only exists to order rows that share a `created_at` value.
    submissions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Insertion sequence, assigned by the database.
        seq -> Int8,
        name -> Text,
        email -> Text,
        /// Age in years, constrained to 1..=120.
        age -> Int2,
        message -> Text,
        created_at -> Timestamptz,
    }
}
