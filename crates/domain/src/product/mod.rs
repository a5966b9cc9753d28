//! Product aggregate and related types.

mod aggregate;
mod events;
mod value_objects;

pub use self::aggregate::{Product, ProductState};
pub use events::{
    ProductCreatedData, ProductEvent, ProductNameChangedData, ProductPriceChangedData,
};
pub use value_objects::{CategoryId, Money, ProductId};

use thiserror::Error;

/// Errors that can occur during product operations.
///
/// Payload validation happens in the command methods before any event
/// is constructed or applied, so an invalid payload never corrupts
/// aggregate state.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Product name must not be empty.
    #[error("product name must not be empty")]
    InvalidName,

    /// Price must be greater than zero.
    #[error("invalid price: {cents} cents (must be greater than 0)")]
    InvalidPrice { cents: i64 },

    /// Replay requires the history to start with a creation event.
    #[error("event history must start with a ProductCreated event")]
    MissingCreation,

    /// A failure surfaced by the aggregate core.
    #[error(transparent)]
    Aggregate(#[from] ::aggregate::AggregateError),
}
