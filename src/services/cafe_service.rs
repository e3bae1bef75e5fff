//! Domain service for cafe records.
//!
//! Handlers talk to [`CafeService`] rather than the store so the HTML and JSON
//! surfaces share one set of rules for lookups, deletion and uniqueness.

use crate::domain::CafeId;
use crate::models::cafe::{Cafe, NewCafe};
use thiserror::Error;

/// Domain errors for cafe operations.
#[derive(Debug, Error)]
pub enum CafeError {
    #[error("Cafe not found: {0}")]
    NotFound(CafeId),

    #[error("Invalid API key")]
    Forbidden,

    #[error("A cafe named '{0}' already exists")]
    Duplicate(String),

    #[error("There are no cafes to choose from")]
    EmptyCollection,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CafeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::db::StoreError> for CafeError {
    fn from(err: crate::db::StoreError) -> Self {
        match err {
            crate::db::StoreError::UniqueViolation(name) => Self::Duplicate(name),
            crate::db::StoreError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Domain service trait for cafe operations.
///
/// # Examples
///
/// ```rust,ignore
/// use cafe_wifi::services::{CafeError, CafeService};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn CafeService>) -> Result<(), CafeError> {
///     let cafe = service.random_cafe().await?;
///     println!("Try {}", cafe.name);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait CafeService: Send + Sync {
    /// Lists every cafe ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CafeError::Database`] on connection failures.
    async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeError>;

    /// Fetches a single cafe.
    ///
    /// # Errors
    ///
    /// - Returns [`CafeError::NotFound`] if no cafe has this id
    /// - Returns [`CafeError::Database`] on connection failures
    async fn get_cafe(&self, id: CafeId) -> Result<Cafe, CafeError>;

    /// Picks one cafe uniformly at random from the current table.
    ///
    /// # Errors
    ///
    /// - Returns [`CafeError::EmptyCollection`] if the table is empty
    /// - Returns [`CafeError::Database`] on connection failures
    async fn random_cafe(&self) -> Result<Cafe, CafeError>;

    /// Returns cafes whose location equals `location` exactly. May be empty.
    ///
    /// # Errors
    ///
    /// Returns [`CafeError::Database`] on connection failures.
    async fn search_by_location(&self, location: &str) -> Result<Vec<Cafe>, CafeError>;

    /// Persists a new cafe. Input is expected to be validated already.
    ///
    /// # Errors
    ///
    /// - Returns [`CafeError::Duplicate`] if the name is taken
    /// - Returns [`CafeError::Database`] on connection failures
    async fn add_cafe(&self, cafe: NewCafe) -> Result<Cafe, CafeError>;

    /// Overwrites the coffee price of an existing cafe. `None` clears it.
    ///
    /// # Errors
    ///
    /// - Returns [`CafeError::NotFound`] if no cafe has this id
    /// - Returns [`CafeError::Database`] on connection failures
    async fn update_price(&self, id: CafeId, new_price: Option<String>) -> Result<(), CafeError>;

    /// Removes a cafe reported as closed. The key is checked before the id.
    ///
    /// # Errors
    ///
    /// - Returns [`CafeError::Forbidden`] if `api_key` does not match
    /// - Returns [`CafeError::NotFound`] if no cafe has this id
    /// - Returns [`CafeError::Database`] on connection failures
    async fn report_closed(&self, id: CafeId, api_key: &str) -> Result<(), CafeError>;
}
