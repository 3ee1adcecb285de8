//! Catalog reference types.
//!
//! These mirror the JSON shapes served by the `/api` endpoints, so field
//! names serialize in camelCase.

use chrono::NaiveDate;
use kinnk_core::{
    ArticleId, CategoryId, CollectionId, CurrencyCode, FaqId, Price, ProductId, SubcategoryId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image: String,
    pub images: Vec<String>,
    /// Category slug.
    pub category: String,
    /// Collection slug.
    pub collection: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    pub stock: u32,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    pub tags: Vec<String>,
}

impl Product {
    /// Current selling price.
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::new(self.price, CurrencyCode::USD)
    }

    /// Pre-discount price, when the product is on sale.
    #[must_use]
    pub fn compare_at_price(&self) -> Option<Price> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(Price::usd)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `term` must already be lowercased.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
    }
}

/// A top-level product category (e.g. "men").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub subcategories: Vec<Subcategory>,
}

/// A product type within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub slug: String,
    pub name: String,
    /// e.g. `t-shirt`, `hoodie`, `long-sleeve`.
    pub product_type: String,
}

/// A merchandising collection shown on the home page carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub featured: bool,
}

/// An editorial article. `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub image: String,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    pub category: String,
}
