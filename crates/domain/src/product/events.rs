//! Product domain events.

use aggregate::{DomainEvent, Version};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Money};

/// Events that can occur on a product aggregate.
///
/// Each variant carries only the data needed to replay its state
/// transition, plus the version stamped by the owning root at apply
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    /// Product was created.
    ProductCreated(ProductCreatedData),

    /// Product was renamed.
    ProductNameChanged(ProductNameChangedData),

    /// Product price was changed.
    ProductPriceChanged(ProductPriceChangedData),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "ProductCreated",
            ProductEvent::ProductNameChanged(_) => "ProductNameChanged",
            ProductEvent::ProductPriceChanged(_) => "ProductPriceChanged",
        }
    }

    fn version(&self) -> Version {
        match self {
            ProductEvent::ProductCreated(data) => data.version,
            ProductEvent::ProductNameChanged(data) => data.version,
            ProductEvent::ProductPriceChanged(data) => data.version,
        }
    }

    fn set_version(&mut self, version: Version) {
        match self {
            ProductEvent::ProductCreated(data) => data.version = version,
            ProductEvent::ProductNameChanged(data) => data.version = version,
            ProductEvent::ProductPriceChanged(data) => data.version = version,
        }
    }
}

/// Data for ProductCreated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreatedData {
    /// Product name.
    pub name: String,

    /// Initial price.
    pub price: Money,

    /// Category the product belongs to.
    pub category_id: CategoryId,

    /// Version stamped at apply time.
    #[serde(default)]
    pub version: Version,
}

/// Data for ProductNameChanged event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductNameChangedData {
    /// The new product name.
    pub new_name: String,

    /// Version stamped at apply time.
    #[serde(default)]
    pub version: Version,
}

/// Data for ProductPriceChanged event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPriceChangedData {
    /// The new price.
    pub new_price: Money,

    /// Version stamped at apply time.
    #[serde(default)]
    pub version: Version,
}

// Convenience constructors for events
impl ProductEvent {
    /// Creates a ProductCreated event.
    pub fn created(name: impl Into<String>, price: Money, category_id: CategoryId) -> Self {
        ProductEvent::ProductCreated(ProductCreatedData {
            name: name.into(),
            price,
            category_id,
            version: Version::initial(),
        })
    }

    /// Creates a ProductNameChanged event.
    pub fn name_changed(new_name: impl Into<String>) -> Self {
        ProductEvent::ProductNameChanged(ProductNameChangedData {
            new_name: new_name.into(),
            version: Version::initial(),
        })
    }

    /// Creates a ProductPriceChanged event.
    pub fn price_changed(new_price: Money) -> Self {
        ProductEvent::ProductPriceChanged(ProductPriceChangedData {
            new_price,
            version: Version::initial(),
        })
    }
}
