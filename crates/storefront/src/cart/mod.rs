//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s plus totals derived from
//! them. Line items are identified by their [`VariantKey`]; adding a variant
//! that is already present increases its quantity instead of adding a row.
//!
//! Every mutation recomputes the totals before returning, so a `Cart` value
//! always satisfies `total == subtotal + tax + shipping`.
//!
//! Persistence to the visitor session lives in [`store`].

pub mod store;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kinnk_core::{Price, ProductId, round_cents};

pub use store::CartStoreError;

/// Sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Flat shipping fee charged on any non-empty cart.
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Subtotal at which the cart page reports free shipping. Display only.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(7500, 0, 0, false, 2);

/// Identity of a cart line: product plus optional size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantKey {
    /// Build a key, treating blank size/color values as "no variant".
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size: non_blank(size),
            color: non_blank(color),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A line in the cart.
///
/// Name, image and unit price are snapshots taken when the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub image: String,
}

impl CartItem {
    /// Whether this line is identified by `key`.
    #[must_use]
    pub fn matches(&self, key: &VariantKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// This line's variant key.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Human-readable variant label, e.g. "M / Black".
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        match (&self.size, &self.color) {
            (Some(size), Some(color)) => Some(format!("{size} / {color}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

/// Totals derived from a list of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Compute subtotal, tax, shipping and total for `items`.
///
/// Each figure is rounded to cents and `total` is the sum of the rounded
/// parts. An empty list yields all zeros.
#[must_use]
pub fn calculate_totals(items: &[CartItem]) -> CartTotals {
    let subtotal = round_cents(items.iter().map(CartItem::line_total).sum());
    let tax = round_cents(subtotal * TAX_RATE);
    let shipping = if items.is_empty() {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    };

    CartTotals {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl Cart {
    /// An empty cart with zero totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, computing totals.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self {
            items,
            ..Self::default()
        };
        cart.recalculate();
        cart
    }

    /// Add `item`, merging with an existing line for the same variant.
    ///
    /// Items with a zero quantity are ignored.
    pub fn add_item(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }

        let key = item.key();
        match self.items.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
        self.recalculate();
    }

    /// Set the quantity of the line identified by `key`.
    ///
    /// A quantity of zero or less removes the line. Quantities above
    /// `u32::MAX` are clamped. Unknown keys are ignored.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(key);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        for item in self.items.iter_mut().filter(|item| item.matches(key)) {
            item.quantity = quantity;
        }
        self.recalculate();
    }

    /// Remove every line matching `key`, returning the first one if present.
    pub fn remove_item(&mut self, key: &VariantKey) -> Option<CartItem> {
        let removed = self.find(key).cloned();
        self.items.retain(|item| !item.matches(key));
        self.recalculate();
        removed
    }

    /// Empty the cart and zero all totals.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn find(&self, key: &VariantKey) -> Option<&CartItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// The current totals.
    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self.subtotal,
            tax: self.tax,
            shipping: self.shipping,
            total: self.total,
        }
    }

    /// Order value as a displayable price.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }

    /// How much more the subtotal needs to reach free shipping, or `None`
    /// once it qualifies.
    #[must_use]
    pub fn free_shipping_remaining(&self) -> Option<Decimal> {
        (self.subtotal < FREE_SHIPPING_THRESHOLD).then(|| FREE_SHIPPING_THRESHOLD - self.subtotal)
    }

    /// Recompute totals from the current items.
    pub fn recalculate(&mut self) {
        let totals = calculate_totals(&self.items);
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.shipping = totals.shipping;
        self.total = totals.total;
    }
}
