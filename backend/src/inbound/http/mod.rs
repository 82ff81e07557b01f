//! HTTP inbound adapter exposing the exercise REST endpoints.

pub mod error;
pub mod exercises;
pub mod health;
pub mod payload;
pub mod reply;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
