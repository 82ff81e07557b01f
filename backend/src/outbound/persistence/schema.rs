//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Registered users. `username` carries a unique constraint.
    exercise_users (id) {
        /// Short URL-safe identifier.
        id -> Varchar,
        username -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only exercise log. Insertion order follows `id`.
    exercise_entries (id) {
        id -> Int8,
        user_id -> Varchar,
        description -> Text,
        duration -> Int8,
        performed_on -> Date,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(exercise_entries -> exercise_users (user_id));
diesel::allow_tables_to_appear_in_same_query!(exercise_entries, exercise_users);
