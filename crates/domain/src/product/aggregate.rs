//! Product aggregate implementation.

use aggregate::{AggregateRoot, AggregateState, Publishable, Version};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Money, ProductError, ProductEvent, ProductId};

/// Mutable product state, touched only inside registered handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductState {
    name: String,
    price: Money,
    category_id: CategoryId,
}

impl AggregateState for ProductState {
    fn aggregate_name() -> &'static str {
        "product"
    }
}

/// Product aggregate root.
///
/// State changes only through events: the factory and the command
/// methods construct an event and hand it to the owned root's apply
/// path, which stamps, routes and records it.
#[derive(Debug)]
pub struct Product {
    root: AggregateRoot<ProductId, ProductState, ProductEvent>,
}

impl Product {
    /// Creates a new product.
    ///
    /// Derives the identity from the name, registers all variant
    /// handlers and applies the creation event, leaving the aggregate
    /// at version 1 with one recorded event.
    pub fn create(
        name: impl Into<String>,
        price: Money,
        category_id: CategoryId,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price)?;

        let mut root = AggregateRoot::new(ProductId::from_name(&name));
        register_handlers(&mut root);
        root.apply_event(ProductEvent::created(name, price, category_id))?;

        Ok(Self { root })
    }

    /// Rebuilds a product from an already published event history.
    ///
    /// The history must start with a `ProductCreated` event; the
    /// rebuilt aggregate has identical state and final version but an
    /// empty recorded-event buffer.
    pub fn from_events(events: Vec<ProductEvent>) -> Result<Self, ProductError> {
        let Some(ProductEvent::ProductCreated(data)) = events.first() else {
            return Err(ProductError::MissingCreation);
        };

        let mut root = AggregateRoot::new(ProductId::from_name(&data.name));
        register_handlers(&mut root);
        root.replay(events)?;

        Ok(Self { root })
    }

    /// Changes the product price.
    pub fn change_price(&mut self, new_price: Money) -> Result<(), ProductError> {
        validate_price(new_price)?;
        self.root.apply_event(ProductEvent::price_changed(new_price))?;
        Ok(())
    }

    /// Renames the product.
    ///
    /// The identity stays the one derived at creation time.
    pub fn change_name(&mut self, new_name: impl Into<String>) -> Result<(), ProductError> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        self.root.apply_event(ProductEvent::name_changed(new_name))?;
        Ok(())
    }
}

// Query methods
impl Product {
    /// Returns the product identity.
    pub fn id(&self) -> ProductId {
        *self.root.id()
    }

    /// Returns the current version.
    pub fn version(&self) -> Version {
        self.root.version()
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.root.state().name
    }

    /// Returns the current price.
    pub fn price(&self) -> Money {
        self.root.state().price
    }

    /// Returns the category.
    pub fn category_id(&self) -> CategoryId {
        self.root.state().category_id
    }

    /// Returns true if events are recorded and not yet cleared.
    pub fn has_changes(&self) -> bool {
        self.root.has_changes()
    }

    /// Returns true if nothing has been published and cleared yet.
    pub fn is_new(&self) -> bool {
        self.root.is_new()
    }
}

impl Publishable for Product {
    type Event = ProductEvent;

    fn aggregate_name(&self) -> &'static str {
        ProductState::aggregate_name()
    }

    fn id_as_string(&self) -> String {
        self.root.id_as_string()
    }

    fn domain_events(&self) -> &[ProductEvent] {
        Publishable::domain_events(&self.root)
    }

    fn clear_domain_events(&mut self) {
        Publishable::clear_domain_events(&mut self.root)
    }
}

/// Equality tracks identity: same id means same product, regardless of
/// version or state.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for Product {}

impl std::hash::Hash for Product {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        std::hash::Hash::hash(&self.root, hasher);
    }
}

fn register_handlers(root: &mut AggregateRoot<ProductId, ProductState, ProductEvent>) {
    root.register("ProductCreated", |state, event| {
        if let ProductEvent::ProductCreated(data) = event {
            state.name = data.name.clone();
            state.price = data.price;
            state.category_id = data.category_id;
        }
    });
    root.register("ProductNameChanged", |state, event| {
        if let ProductEvent::ProductNameChanged(data) = event {
            state.name = data.new_name.clone();
        }
    });
    root.register("ProductPriceChanged", |state, event| {
        if let ProductEvent::ProductPriceChanged(data) = event {
            state.price = data.new_price;
        }
    });
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::InvalidName);
    }
    Ok(())
}

fn validate_price(price: Money) -> Result<(), ProductError> {
    if !price.is_positive() {
        return Err(ProductError::InvalidPrice {
            cents: price.cents(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregate::DomainEvent;

    fn widget() -> Product {
        Product::create("Widget", Money::from_cents(1000), CategoryId::new(1)).unwrap()
    }

    #[test]
    fn create_applies_the_creation_event() {
        let product = widget();

        assert_eq!(product.version(), Version::first());
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price(), Money::from_cents(1000));
        assert_eq!(product.category_id(), CategoryId::new(1));
        assert_eq!(product.domain_events().len(), 1);
        assert!(product.is_new());
        assert!(product.has_changes());
    }

    #[test]
    fn create_derives_a_deterministic_id() {
        let first = widget();
        let second = widget();

        assert_eq!(first.id(), second.id());
        assert_eq!(first.id(), ProductId::from_name("Widget"));
    }

    #[test]
    fn create_rejects_empty_name() {
        let result = Product::create("   ", Money::from_cents(1000), CategoryId::new(1));
        assert!(matches!(result, Err(ProductError::InvalidName)));
    }

    #[test]
    fn create_rejects_non_positive_price() {
        let result = Product::create("Widget", Money::zero(), CategoryId::new(1));
        assert!(matches!(
            result,
            Err(ProductError::InvalidPrice { cents: 0 })
        ));

        let result = Product::create("Widget", Money::from_cents(-500), CategoryId::new(1));
        assert!(matches!(result, Err(ProductError::InvalidPrice { .. })));
    }

    #[test]
    fn change_price_records_a_second_event() {
        let mut product = widget();
        product.change_price(Money::from_cents(1250)).unwrap();

        assert_eq!(product.version(), Version::new(2));
        assert_eq!(product.price(), Money::from_cents(1250));

        let types: Vec<&str> = product
            .domain_events()
            .iter()
            .map(|event| event.event_type())
            .collect();
        assert_eq!(types, vec!["ProductCreated", "ProductPriceChanged"]);
    }

    #[test]
    fn change_price_rejects_non_positive_amounts() {
        let mut product = widget();
        let result = product.change_price(Money::zero());

        assert!(matches!(result, Err(ProductError::InvalidPrice { .. })));
        // A rejected command leaves no trace.
        assert_eq!(product.version(), Version::first());
        assert_eq!(product.domain_events().len(), 1);
        assert_eq!(product.price(), Money::from_cents(1000));
    }

    #[test]
    fn change_name_keeps_the_original_identity() {
        let mut product = widget();
        let id = product.id();

        product.change_name("Widget Pro").unwrap();

        assert_eq!(product.name(), "Widget Pro");
        assert_eq!(product.id(), id);
    }

    #[test]
    fn change_name_rejects_empty_name() {
        let mut product = widget();
        let result = product.change_name("");

        assert!(matches!(result, Err(ProductError::InvalidName)));
        assert_eq!(product.name(), "Widget");
    }

    #[test]
    fn events_are_stamped_in_apply_order() {
        let mut product = widget();
        product.change_price(Money::from_cents(1100)).unwrap();
        product.change_name("Widget Pro").unwrap();

        let versions: Vec<u64> = product
            .domain_events()
            .iter()
            .map(|event| event.version().as_u64())
            .collect();
        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[test]
    fn replay_reproduces_state_and_version() {
        let mut product = widget();
        product.change_price(Money::from_cents(1250)).unwrap();
        product.change_name("Widget Pro").unwrap();

        let history = product.domain_events().to_vec();
        let replayed = Product::from_events(history).unwrap();

        assert_eq!(replayed.id(), product.id());
        assert_eq!(replayed.version(), product.version());
        assert_eq!(replayed.name(), product.name());
        assert_eq!(replayed.price(), product.price());
        assert_eq!(replayed.category_id(), product.category_id());
        assert!(!replayed.has_changes());
        assert!(!replayed.is_new());
    }

    #[test]
    fn replay_requires_a_creation_event_first() {
        let result = Product::from_events(vec![]);
        assert!(matches!(result, Err(ProductError::MissingCreation)));

        let result = Product::from_events(vec![ProductEvent::price_changed(Money::from_cents(
            1250,
        ))]);
        assert!(matches!(result, Err(ProductError::MissingCreation)));
    }

    #[test]
    fn clear_after_publish_marks_the_aggregate_as_not_new() {
        let mut product = widget();
        product.change_price(Money::from_cents(1250)).unwrap();

        product.clear_domain_events();

        assert!(product.domain_events().is_empty());
        assert!(!product.has_changes());
        assert!(!product.is_new());
        assert_eq!(product.version(), Version::new(2));
    }

    #[test]
    fn equality_is_by_id_regardless_of_state() {
        let mut left = widget();
        let right = widget();
        let other = Product::create("Gadget", Money::from_cents(500), CategoryId::new(2)).unwrap();

        left.change_price(Money::from_cents(9999)).unwrap();

        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    fn aggregate_name_is_the_lower_case_type_name() {
        let product = widget();
        assert_eq!(product.aggregate_name(), "product");
    }
}
