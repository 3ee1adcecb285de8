//! Cart route handlers.
//!
//! The cart lives in the visitor session. Every form posts back here and is
//! answered with a redirect to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use kinnk_core::ProductId;

use crate::cart::{self, Cart, CartItem, VariantKey};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::{Layout, api_data, redirect_with_error, safe_redirect_target};
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Identifies one cart line in the remove form.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: Option<u32>,
    /// Page to return to when the item cannot be added.
    pub redirect: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: i64,
}

fn variant_key(product_id: &str, size: Option<&String>, color: Option<&String>) -> VariantKey {
    VariantKey::new(ProductId::new(product_id), size.cloned(), color.cloned())
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: Cart,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(session: Session, layout: Layout, tracker: Tracker) -> Result<CartShowTemplate> {
    let cart = cart::store::load(&session).await?;
    tracker.page_view(&layout.current_path, "Cart");
    Ok(CartShowTemplate { layout, cart })
}

/// Add an item to the cart.
///
/// Name, price and image are taken from the catalog, never from the form.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(state, session, tracker))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    tracker: Tracker,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let key = variant_key(&form.product_id, form.size.as_ref(), form.color.as_ref());
    let product = api_data(state.api().get_product_by_id(&key.product_id).await)?;
    let back = safe_redirect_target(form.redirect.as_deref(), &format!("/products/{}", product.slug));

    if !product.in_stock() {
        return Ok(redirect_with_error(&back, "This product is out of stock"));
    }

    let item = CartItem {
        product_id: product.id,
        name: product.name,
        price: product.price,
        quantity: form.quantity.unwrap_or(1),
        size: key.size,
        color: key.color,
        image: product.image,
    };
    if item.quantity == 0 {
        return Ok(Redirect::to(&back));
    }

    let cart = cart::store::add_item(&session, item.clone()).await?;
    tracker.add_to_cart(&item, &cart);
    add_breadcrumb("cart", "Added to cart", &[("product_id", item.product_id.as_str())]);

    Ok(Redirect::to("/cart"))
}

/// Change a line's quantity. Zero or less removes the line.
#[instrument(skip(session, tracker))]
pub async fn update(
    session: Session,
    tracker: Tracker,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let key = variant_key(&form.product_id, form.size.as_ref(), form.color.as_ref());
    if form.quantity <= 0 {
        let (_, removed) = cart::store::remove_item(&session, &key).await?;
        if let Some(item) = removed {
            tracker.remove_from_cart(&item);
        }
    } else {
        cart::store::update_quantity(&session, &key, form.quantity).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session, tracker))]
pub async fn remove(
    session: Session,
    tracker: Tracker,
    Form(form): Form<LineForm>,
) -> Result<Redirect> {
    let key = variant_key(&form.product_id, form.size.as_ref(), form.color.as_ref());
    let (_, removed) = cart::store::remove_item(&session, &key).await?;
    if let Some(item) = removed {
        tracker.remove_from_cart(&item);
    }
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(session: Session) -> Result<Redirect> {
    cart::store::clear(&session).await?;
    Ok(Redirect::to("/cart"))
}

/// Cart count badge.
#[instrument(skip_all)]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let count = cart::store::load(&session).await?.item_count();
    Ok(CartCountTemplate { count })
}

/// Create the cart routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show))
        .route("/add", post(add))
        .route("/update", post(update))
        .route("/remove", post(remove))
        .route("/clear", post(clear))
        .route("/count", get(count))
}
