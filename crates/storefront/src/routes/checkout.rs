//! Checkout route handlers.
//!
//! One page renders whichever step the visitor's [`CheckoutFlow`] is on.
//! Forms post to step-specific endpoints and redirect back to `/checkout`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{self, Cart};
use crate::checkout::{self as flow, CheckoutError, CheckoutFlow, CheckoutStep};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::{Address, Country, Order, PaymentDetails};
use crate::routes::Layout;
use crate::services::analytics::Tracker;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub step: CheckoutStep,
    pub cart: Cart,
    pub address: Address,
    pub order: Option<Order>,
    pub error: Option<String>,
    pub countries: [Country; 3],
}

impl CheckoutTemplate {
    /// Whether `country` is the selected shipping country.
    pub fn is_country(&self, country: &Country) -> bool {
        self.address.country == *country
    }
}

/// Display the current checkout step.
///
/// An empty cart with no placed order goes back to the cart page. The
/// confirmation is shown once; afterwards the flow starts over.
#[instrument(skip_all)]
pub async fn show(session: Session, layout: Layout, tracker: Tracker) -> Result<Response> {
    let cart = cart::store::load(&session).await?;
    let mut checkout = flow::load(&session).await?;

    if cart.is_empty() && checkout.step != CheckoutStep::Confirmation {
        return Ok(Redirect::to("/cart").into_response());
    }

    let tracked_cart = checkout
        .order
        .as_ref()
        .filter(|_| checkout.step == CheckoutStep::Confirmation)
        .map_or_else(|| cart.clone(), |order| Cart::from_items(order.items.clone()));
    tracker.begin_checkout(&tracked_cart, checkout.step);
    tracker.page_view(&layout.current_path, "Checkout");

    let error = checkout.take_error();
    let page = CheckoutTemplate {
        layout,
        step: checkout.step,
        cart,
        address: checkout.shipping_address.clone().unwrap_or_default(),
        order: checkout.order.clone(),
        error,
        countries: Country::ALL,
    };

    if checkout.step == CheckoutStep::Confirmation {
        flow::clear(&session).await?;
    } else {
        flow::save(&session, &checkout).await?;
    }

    Ok(page.into_response())
}

/// Submit the shipping form.
#[instrument(skip_all)]
pub async fn shipping(session: Session, Form(address): Form<Address>) -> Result<Redirect> {
    let mut checkout = flow::load(&session).await?;
    match checkout.submit_shipping(address) {
        Ok(()) | Err(CheckoutError::MissingFields(_) | CheckoutError::InvalidTransition { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    flow::save(&session, &checkout).await?;
    Ok(Redirect::to("/checkout"))
}

/// Go back from payment to shipping.
#[instrument(skip_all)]
pub async fn back(session: Session) -> Result<Redirect> {
    let mut checkout = flow::load(&session).await?;
    if let Err(e) = checkout.back_to_shipping() {
        tracing::debug!(error = %e, "Ignoring back navigation");
    }
    flow::save(&session, &checkout).await?;
    Ok(Redirect::to("/checkout"))
}

/// Submit payment and place the order.
///
/// On success the cart is cleared and the confirmation is shown. On failure
/// the visitor stays on the payment step with an error.
#[instrument(skip_all)]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    tracker: Tracker,
    Form(payment): Form<PaymentDetails>,
) -> Result<Redirect> {
    let cart = cart::store::load(&session).await?;
    let mut checkout: CheckoutFlow = flow::load(&session).await?;

    match checkout
        .place_order(state.api(), cart.items, &payment)
        .await
    {
        Ok(order) => {
            tracker.purchase(&order);
            add_breadcrumb("checkout", "Order placed", &[("order_id", order.id.as_str())]);
            cart::store::clear(&session).await?;
        }
        Err(CheckoutError::Session(e)) => return Err(CheckoutError::Session(e).into()),
        Err(e) => {
            tracing::info!(error = %e, "Order not placed");
        }
    }

    flow::save(&session, &checkout).await?;
    Ok(Redirect::to("/checkout"))
}

/// Create the checkout routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show))
        .route("/shipping", post(shipping))
        .route("/back", post(back))
        .route("/place-order", post(place_order))
}
