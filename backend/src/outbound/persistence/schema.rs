//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries a unique constraint (`users_email_key`).
    users (id) {
        /// Primary key assigned from a `BIGSERIAL` sequence.
        id -> Int8,
        /// Login email address (max 50 characters).
        email -> Varchar,
        /// Given name (max 20 characters).
        first_name -> Varchar,
        /// Family name (max 20 characters).
        last_name -> Varchar,
        /// Password as supplied by the client (max 10 characters).
        password -> Varchar,
    }
}
