//! In-memory catalog: mock reference tables and the helpers pages use to
//! present them.
//!
//! Nothing here performs I/O. The [`crate::api::ApiClient`] facade is the
//! only consumer of the raw tables; handlers go through it.

pub mod data;
pub mod types;

use comrak::{Options, markdown_to_html};

pub use types::{Article, Category, Collection, Faq, Product, Subcategory};

/// Sort orders offered on the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Reverse catalog order (later entries are newer).
    Newest,
}

impl ProductSort {
    /// All sorts, in the order shown in the sort menu.
    pub const ALL: [Self; 4] = [Self::Featured, Self::PriceLow, Self::PriceHigh, Self::Newest];

    /// Parse a query-string value, falling back to [`ProductSort::Featured`].
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("price-low") => Self::PriceLow,
            Some("price-high") => Self::PriceHigh,
            Some("newest") => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// Query-string value for this sort.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Newest => "newest",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Newest => "Newest",
        }
    }

    /// Sort products in place. All sorts are stable.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Featured => products.sort_by_key(|p| !p.featured),
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Newest => products.reverse(),
        }
    }
}

/// Render article Markdown to HTML.
///
/// Raw HTML in the source is omitted from the output.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(markdown, &options)
}

/// Estimated reading time at roughly 200 words per minute, at least 1.
#[must_use]
pub fn reading_time_minutes(markdown: &str) -> u32 {
    let words = markdown.split_whitespace().count();
    u32::try_from(words.div_ceil(200)).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_sort_is_stable() {
        let mut products = data::PRODUCTS.clone();
        ProductSort::Featured.apply(&mut products);

        let featured: Vec<_> = products
            .iter()
            .take_while(|p| p.featured)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(featured, ["prod-001", "prod-003", "prod-005", "prod-008"]);
        assert!(products.iter().skip(featured.len()).all(|p| !p.featured));
    }

    #[test]
    fn test_price_sorts() {
        let mut low = data::PRODUCTS.clone();
        ProductSort::PriceLow.apply(&mut low);
        let mut high = data::PRODUCTS.clone();
        ProductSort::PriceHigh.apply(&mut high);

        assert_eq!(low.first().map(|p| p.slug.as_str()), Some("canvas-tote"));
        assert_eq!(high.first().map(|p| p.slug.as_str()), Some("oversized-hoodie-sand"));

        assert!(low.windows(2).all(|w| matches!(w, [a, b] if a.price <= b.price)));
        assert!(high.windows(2).all(|w| matches!(w, [a, b] if a.price >= b.price)));
    }

    #[test]
    fn test_newest_reverses_catalog_order() {
        let mut products = data::PRODUCTS.clone();
        ProductSort::Newest.apply(&mut products);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("prod-010"));
    }

    #[test]
    fn test_from_query_defaults_to_featured() {
        assert_eq!(ProductSort::from_query(None), ProductSort::Featured);
        assert_eq!(ProductSort::from_query(Some("bogus")), ProductSort::Featured);
        assert_eq!(ProductSort::from_query(Some("newest")), ProductSort::Newest);
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("## Title\n\n**bold**");
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_reading_time_minimum_one() {
        assert_eq!(reading_time_minutes("short"), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(401)), 3);
    }
}
