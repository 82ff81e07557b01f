//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{exercise_entries, exercise_users};

/// Row struct for reading from the exercise_users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercise_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercise_users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

/// Row struct for reading from the exercise_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercise_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub description: String,
    pub duration: i64,
    pub performed_on: NaiveDate,
}

/// Insertable struct for appending entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercise_entries)]
pub(crate) struct NewEntryRow<'a> {
    pub user_id: &'a str,
    pub description: &'a str,
    pub duration: i64,
    pub performed_on: NaiveDate,
}
