//! Diesel error mapping for the user store adapter.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserStoreError;

use super::pool::PoolError;

/// Columns guarded by CHECK constraints, with the message reported when the
/// constraint trips.
const CHECKED_FIELDS: [(&str, &str); 2] = [
    ("description", "Path `description` is required."),
    ("duration", "Path `duration` is required."),
];

/// Map pool errors into store connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> UserStoreError {
    let message = match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => message,
    };
    UserStoreError::connection(message)
}

fn checked_field(constraint: Option<&str>) -> Option<(&'static str, &'static str)> {
    let constraint = constraint?;
    CHECKED_FIELDS
        .iter()
        .copied()
        .find(|(field, _)| constraint.contains(field))
}

/// Map Diesel errors into store errors.
///
/// Closed connections become connection errors and CHECK violations on
/// entry columns become field validation errors. Everything else is a query
/// error whose message does not leak SQL details.
pub(crate) fn map_diesel_error(error: DieselError) -> UserStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            match checked_field(info.constraint_name()) {
                Some((field, message)) => UserStoreError::validation(field, message),
                None => UserStoreError::query("database constraint violated"),
            }
        }
        DieselError::NotFound => UserStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        _ => UserStoreError::query("database error"),
    }
}
