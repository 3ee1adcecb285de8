//! Static mock tables backing the catalog.
//!
//! Table order is significant: it is the default listing order and the
//! "newest" sort reverses it.

use std::sync::LazyLock;

use chrono::NaiveDate;
use kinnk_core::{ArticleId, CategoryId, CollectionId, FaqId, ProductId, SubcategoryId};
use rust_decimal::Decimal;

use super::types::{Article, Category, Collection, Faq, Product, Subcategory};

/// All products, in catalog order.
pub static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        ProductRow {
            id: "prod-001",
            slug: "essential-tee-black",
            name: "Essential Tee Black",
            description: "Our everyday heavyweight cotton tee with a relaxed fit and ribbed collar.",
            cents: 2999,
            original_cents: None,
            category: "men",
            collection: "essentials",
            sizes: &["S", "M", "L", "XL"],
            colors: &["Black"],
            stock: 120,
            featured: true,
            rating: Some((4.7, 128)),
            tags: &["tee", "cotton", "basics"],
        }
        .build(),
        ProductRow {
            id: "prod-002",
            slug: "essential-tee-white",
            name: "Essential Tee White",
            description: "The heavyweight cotton tee in optic white. Pre-shrunk and garment dyed.",
            cents: 2999,
            original_cents: None,
            category: "men",
            collection: "essentials",
            sizes: &["S", "M", "L", "XL"],
            colors: &["White"],
            stock: 95,
            featured: false,
            rating: Some((4.6, 87)),
            tags: &["tee", "cotton", "basics"],
        }
        .build(),
        ProductRow {
            id: "prod-003",
            slug: "heavyweight-hoodie",
            name: "Heavyweight Hoodie",
            description: "A 450gsm brushed fleece hoodie with a double-lined hood and kangaroo pocket.",
            cents: 7999,
            original_cents: Some(9999),
            category: "men",
            collection: "essentials",
            sizes: &["S", "M", "L", "XL", "XXL"],
            colors: &["Black", "Heather Grey", "Forest"],
            stock: 42,
            featured: true,
            rating: Some((4.9, 203)),
            tags: &["hoodie", "fleece", "outerwear"],
        }
        .build(),
        ProductRow {
            id: "prod-004",
            slug: "long-sleeve-logo-tee",
            name: "Long Sleeve Logo Tee",
            description: "Long sleeve cotton jersey with a tonal chest logo and sleeve print.",
            cents: 4499,
            original_cents: None,
            category: "men",
            collection: "summer-drop",
            sizes: &["S", "M", "L", "XL"],
            colors: &["Black", "Sand"],
            stock: 60,
            featured: false,
            rating: Some((4.4, 41)),
            tags: &["long-sleeve", "logo"],
        }
        .build(),
        ProductRow {
            id: "prod-005",
            slug: "cropped-boxy-tee",
            name: "Cropped Boxy Tee",
            description: "A cropped, boxy cotton tee cut for high-waisted fits.",
            cents: 3499,
            original_cents: None,
            category: "women",
            collection: "summer-drop",
            sizes: &["XS", "S", "M", "L"],
            colors: &["White", "Lilac", "Black"],
            stock: 75,
            featured: true,
            rating: Some((4.8, 64)),
            tags: &["tee", "cropped", "cotton"],
        }
        .build(),
        ProductRow {
            id: "prod-006",
            slug: "oversized-hoodie-sand",
            name: "Oversized Hoodie Sand",
            description: "An oversized fleece hoodie with dropped shoulders in a warm sand tone.",
            cents: 8499,
            original_cents: None,
            category: "women",
            collection: "essentials",
            sizes: &["XS", "S", "M", "L"],
            colors: &["Sand"],
            stock: 30,
            featured: false,
            rating: Some((4.7, 52)),
            tags: &["hoodie", "fleece", "oversized"],
        }
        .build(),
        ProductRow {
            id: "prod-007",
            slug: "ribbed-crop-top",
            name: "Ribbed Crop Top",
            description: "A fitted ribbed knit crop top with a square neckline.",
            cents: 2799,
            original_cents: Some(3499),
            category: "women",
            collection: "summer-drop",
            sizes: &["XS", "S", "M", "L"],
            colors: &["Black", "Cream"],
            stock: 18,
            featured: false,
            rating: None,
            tags: &["crop-top", "knit"],
        }
        .build(),
        ProductRow {
            id: "prod-008",
            slug: "dad-cap",
            name: "Washed Dad Cap",
            description: "An unstructured six-panel cap in washed cotton twill with an adjustable strap.",
            cents: 2499,
            original_cents: None,
            category: "accessories",
            collection: "essentials",
            sizes: &[],
            colors: &["Black", "Navy", "Stone"],
            stock: 200,
            featured: true,
            rating: Some((4.5, 33)),
            tags: &["hat", "cap", "cotton"],
        }
        .build(),
        ProductRow {
            id: "prod-009",
            slug: "canvas-tote",
            name: "Canvas Tote",
            description: "A 16oz canvas tote with reinforced handles and an inner pocket.",
            cents: 1999,
            original_cents: None,
            category: "accessories",
            collection: "limited-edition",
            sizes: &[],
            colors: &[],
            stock: 0,
            featured: false,
            rating: None,
            tags: &["bag", "tote", "canvas"],
        }
        .build(),
        ProductRow {
            id: "prod-010",
            slug: "archive-graphic-tee",
            name: "Archive Graphic Tee",
            description: "A reissue of our first graphic tee, printed on vintage-washed cotton.",
            cents: 3999,
            original_cents: Some(4999),
            category: "men",
            collection: "archive",
            sizes: &["M", "L", "XL"],
            colors: &["Washed Black"],
            stock: 12,
            featured: false,
            rating: Some((4.3, 19)),
            tags: &["tee", "graphic", "archive"],
        }
        .build(),
    ]
});

/// All categories with their subcategories.
pub static CATEGORIES: LazyLock<Vec<Category>> = LazyLock::new(|| {
    vec![
        category(
            "cat-men",
            "men",
            "Men",
            "Heavyweight staples and seasonal drops cut for a relaxed fit.",
            &[
                ("sub-men-tees", "t-shirts", "T-Shirts", "t-shirt"),
                ("sub-men-hoodies", "hoodies", "Hoodies", "hoodie"),
                ("sub-men-ls", "long-sleeves", "Long Sleeves", "long-sleeve"),
            ],
        ),
        category(
            "cat-women",
            "women",
            "Women",
            "Cropped cuts, oversized fleece and fitted knits.",
            &[
                ("sub-women-tees", "t-shirts", "T-Shirts", "t-shirt"),
                ("sub-women-hoodies", "hoodies", "Hoodies", "hoodie"),
                ("sub-women-crops", "crop-tops", "Crop Tops", "crop-top"),
            ],
        ),
        category(
            "cat-accessories",
            "accessories",
            "Accessories",
            "Caps, totes and the small things that finish a fit.",
            &[
                ("sub-acc-hats", "hats", "Hats", "hat"),
                ("sub-acc-bags", "bags", "Bags", "bag"),
            ],
        ),
    ]
});

/// All merchandising collections.
pub static COLLECTIONS: LazyLock<Vec<Collection>> = LazyLock::new(|| {
    vec![
        collection(
            "col-essentials",
            "essentials",
            "Essentials",
            "The core range. Heavyweight, garment dyed, built to be worn daily.",
            true,
        ),
        collection(
            "col-summer-drop",
            "summer-drop",
            "Summer Drop",
            "Lighter weights and new colorways for the warm months.",
            true,
        ),
        collection(
            "col-limited-edition",
            "limited-edition",
            "Limited Edition",
            "Small runs that will not be restocked.",
            true,
        ),
        collection(
            "col-archive",
            "archive",
            "Archive",
            "Reissues of pieces from past seasons.",
            false,
        ),
    ]
});

/// All articles, newest first.
pub static ARTICLES: LazyLock<Vec<Article>> = LazyLock::new(|| {
    vec![
        article(
            "art-001",
            "how-we-make-the-heavyweight-tee",
            "How We Make the Heavyweight Tee",
            "From yarn to garment dye: a look inside the making of our best seller.",
            "Maya Chen",
            (2024, 6, 12),
            &["process", "cotton"],
            "## Starting with the yarn\n\n\
             Every Essential Tee starts as **combed ring-spun cotton**, knit into a \
             240gsm jersey.\n\n\
             ## Garment dyeing\n\n\
             We dye after sewing, which gives each piece a slightly lived-in finish and \
             means the tee will not shrink further in your wash.\n\n\
             - Pre-shrunk\n- Double-needle hems\n- Ribbed collar that holds its shape\n",
        ),
        article(
            "art-002",
            "caring-for-fleece",
            "Caring for Your Fleece",
            "Keep your hoodie soft for years with a few simple habits.",
            "Jordan Alvarez",
            (2024, 4, 2),
            &["care", "fleece"],
            "Brushed fleece loves cold water and hates the tumble dryer.\n\n\
             1. Turn the hoodie inside out.\n\
             2. Wash cold with similar colors.\n\
             3. Lay flat to dry.\n\n\
             Skip fabric softener: it coats the fibers and flattens the brushed side.\n",
        ),
        article(
            "art-003",
            "summer-drop-lookbook",
            "Summer Drop Lookbook",
            "Five ways to wear the new summer colorways.",
            "Maya Chen",
            (2024, 3, 18),
            &["lookbook", "summer-drop"],
            "The Summer Drop brings **Lilac**, **Sand** and **Cream** into the range.\n\n\
             Pair the Cropped Boxy Tee with wide-leg trousers, or layer the Long Sleeve \
             Logo Tee under an open overshirt for cooler evenings.\n",
        ),
    ]
});

/// All FAQs grouped by category in display order.
pub static FAQS: LazyLock<Vec<Faq>> = LazyLock::new(|| {
    vec![
        faq(
            "faq-001",
            "shipping",
            "How much does shipping cost?",
            "We charge a flat $9.99 shipping fee on every order.",
        ),
        faq(
            "faq-002",
            "shipping",
            "How long does delivery take?",
            "Orders ship within 2 business days and usually arrive 3-7 business days later.",
        ),
        faq(
            "faq-003",
            "shipping",
            "Do you ship internationally?",
            "We currently ship to the United States, Canada and Mexico.",
        ),
        faq(
            "faq-004",
            "returns",
            "What is your return policy?",
            "Unworn items can be returned within 30 days of delivery for a full refund.",
        ),
        faq(
            "faq-005",
            "returns",
            "How do I start a return?",
            "Email support with your order number and we will send a prepaid label.",
        ),
        faq(
            "faq-006",
            "orders",
            "Can I change my order after placing it?",
            "Contact us within one hour of ordering and we will do our best to update it.",
        ),
        faq(
            "faq-007",
            "orders",
            "Is sales tax included in prices?",
            "No. An 8% sales tax is added to your subtotal at checkout.",
        ),
        faq(
            "faq-008",
            "products",
            "How do your tees fit?",
            "Our tees have a relaxed fit. Size down if you prefer a closer fit.",
        ),
    ]
});

// =============================================================================
// Row Builders
// =============================================================================

struct ProductRow {
    id: &'static str,
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    original_cents: Option<i64>,
    category: &'static str,
    collection: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    stock: u32,
    featured: bool,
    rating: Option<(f32, u32)>,
    tags: &'static [&'static str],
}

impl ProductRow {
    fn build(self) -> Product {
        let image = format!("/static/images/products/{}.jpg", self.slug);
        let images = vec![
            image.clone(),
            format!("/static/images/products/{}-2.jpg", self.slug),
        ];

        Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            slug: self.slug.to_owned(),
            description: self.description.to_owned(),
            price: Decimal::new(self.cents, 2),
            original_price: self.original_cents.map(|cents| Decimal::new(cents, 2)),
            image,
            images,
            category: self.category.to_owned(),
            collection: self.collection.to_owned(),
            sizes: strings(self.sizes),
            colors: strings(self.colors),
            stock: self.stock,
            featured: self.featured,
            rating: self.rating.map(|(rating, _)| rating),
            reviews: self.rating.map(|(_, reviews)| reviews),
            tags: strings(self.tags),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

fn category(
    id: &str,
    slug: &str,
    name: &str,
    description: &str,
    subcategories: &[(&str, &str, &str, &str)],
) -> Category {
    Category {
        id: CategoryId::new(id),
        slug: slug.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        image: format!("/static/images/categories/{slug}.jpg"),
        subcategories: subcategories
            .iter()
            .map(|(id, slug, name, product_type)| Subcategory {
                id: SubcategoryId::new(*id),
                slug: (*slug).to_owned(),
                name: (*name).to_owned(),
                product_type: (*product_type).to_owned(),
            })
            .collect(),
    }
}

fn collection(id: &str, slug: &str, name: &str, description: &str, featured: bool) -> Collection {
    Collection {
        id: CollectionId::new(id),
        slug: slug.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        image: format!("/static/images/collections/{slug}.jpg"),
        link: format!("/products?collection={slug}"),
        featured,
    }
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    slug: &str,
    title: &str,
    excerpt: &str,
    author: &str,
    (year, month, day): (i32, u32, u32),
    tags: &[&str],
    content: &str,
) -> Article {
    Article {
        id: ArticleId::new(id),
        slug: slug.to_owned(),
        title: title.to_owned(),
        excerpt: excerpt.to_owned(),
        content: content.to_owned(),
        author: author.to_owned(),
        image: format!("/static/images/articles/{slug}.jpg"),
        published_at: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        tags: strings(tags),
    }
}

fn faq(id: &str, category: &str, question: &str, answer: &str) -> Faq {
    Faq {
        id: FaqId::new(id),
        question: question.to_owned(),
        answer: answer.to_owned(),
        category: category.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_product_ids_and_slugs_are_unique() {
        let ids: HashSet<_> = PRODUCTS.iter().map(|p| p.id.clone()).collect();
        let slugs: HashSet<_> = PRODUCTS.iter().map(|p| p.slug.clone()).collect();
        assert_eq!(ids.len(), PRODUCTS.len());
        assert_eq!(slugs.len(), PRODUCTS.len());
    }

    #[test]
    fn test_products_reference_known_categories_and_collections() {
        for product in PRODUCTS.iter() {
            assert!(
                CATEGORIES.iter().any(|c| c.slug == product.category),
                "unknown category on {}",
                product.slug
            );
            assert!(
                COLLECTIONS.iter().any(|c| c.slug == product.collection),
                "unknown collection on {}",
                product.slug
            );
        }
    }

    #[test]
    fn test_article_dates_are_valid() {
        for article in ARTICLES.iter() {
            assert_ne!(article.published_at, NaiveDate::default());
        }
    }
}
