//! Translation of user store failures into domain errors.

use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::UserStoreError;

/// Map a store failure onto the error channel.
///
/// Connection failures surface as service-unavailable, schema refusals as
/// field errors, and anything else as an internal error.
pub(crate) fn map_store_error(error: UserStoreError) -> Error {
    debug!(%error, "user store operation failed");
    match error {
        UserStoreError::Connection { .. } => Error::service_unavailable("user store unavailable"),
        UserStoreError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserStoreError::Validation { field, message } => Error::field(field, message),
    }
}
