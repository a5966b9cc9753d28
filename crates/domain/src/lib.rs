//! Product domain built on the event-sourced aggregate core.
//!
//! The [`Product`] aggregate mutates state exclusively through domain
//! events: its factory and command methods construct events and apply
//! them via the root's single apply path, so initial construction and
//! replay share one code path.

pub mod product;

pub use product::{
    CategoryId, Money, Product, ProductCreatedData, ProductError, ProductEvent, ProductId,
    ProductNameChangedData, ProductPriceChangedData, ProductState,
};
