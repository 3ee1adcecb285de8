//! Checkout step state machine.
//!
//! Steps run `Shipping -> Payment -> Confirmation`. Payment may go back to
//! shipping; confirmation is terminal until the flow is reset. Reaching
//! confirmation requires a successful order from the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_sessions::Session;

use crate::api::ApiClient;
use crate::cart::CartItem;
use crate::models::{Address, Order, PaymentDetails, session_keys};

/// Shown when the API rejects an order.
pub const ORDER_FAILED_MESSAGE: &str = "Failed to place order. Please try again.";

/// A checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }

    /// Step name reported to analytics. The shipping step counts as `cart`.
    #[must_use]
    pub const fn analytics_step(self) -> &'static str {
        match self {
            Self::Shipping => "cart",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }

    /// 1-based position for the progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout failures shown to the visitor.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Cannot {action} from the {from} step")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error("Failed to place order. Please try again.")]
    OrderFailed(String),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Per-visitor checkout progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    pub step: CheckoutStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Message from the last failed action, shown once on the current step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutFlow {
    /// Accept the shipping form and advance to payment.
    ///
    /// # Errors
    ///
    /// Fails on blank required fields (the step stays at shipping) or when
    /// called after the order is placed.
    pub fn submit_shipping(&mut self, address: Address) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(self.reject(CheckoutError::InvalidTransition {
                from: self.step,
                action: "edit shipping",
            }));
        }

        let address = address.normalized();
        let missing = address.missing_fields();
        self.step = CheckoutStep::Shipping;
        self.shipping_address = Some(address);
        if !missing.is_empty() {
            return Err(self.reject(CheckoutError::MissingFields(missing)));
        }

        self.step = CheckoutStep::Payment;
        self.error = None;
        Ok(())
    }

    /// Return from payment to shipping, keeping the entered address.
    ///
    /// # Errors
    ///
    /// Fails once the order is confirmed.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        match self.step {
            CheckoutStep::Shipping | CheckoutStep::Payment => {
                self.step = CheckoutStep::Shipping;
                self.error = None;
                Ok(())
            }
            CheckoutStep::Confirmation => Err(CheckoutError::InvalidTransition {
                from: self.step,
                action: "go back",
            }),
        }
    }

    /// Submit payment and ask the API to create the order.
    ///
    /// On success the flow moves to confirmation and holds the order. On
    /// any failure it stays at payment with an error message.
    ///
    /// # Errors
    ///
    /// Fails outside the payment step, on blank payment fields, or when the
    /// API rejects the order.
    pub async fn place_order(
        &mut self,
        api: &ApiClient,
        items: Vec<CartItem>,
        payment: &PaymentDetails,
    ) -> Result<Order, CheckoutError> {
        let address = match (&self.step, &self.shipping_address) {
            (CheckoutStep::Payment, Some(address)) => address.clone(),
            _ => {
                return Err(CheckoutError::InvalidTransition {
                    from: self.step,
                    action: "place an order",
                });
            }
        };

        let missing = payment.missing_fields();
        if !missing.is_empty() {
            return Err(self.reject(CheckoutError::MissingFields(missing)));
        }

        match api.create_order(items, &address, payment).await.into_result() {
            Ok(order) => {
                self.step = CheckoutStep::Confirmation;
                self.order = Some(order.clone());
                self.error = None;
                Ok(order)
            }
            Err(reason) => {
                tracing::warn!(%reason, "Order creation failed");
                self.error = Some(ORDER_FAILED_MESSAGE.to_string());
                Err(CheckoutError::OrderFailed(reason))
            }
        }
    }

    /// Start over at shipping.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Take the pending error message, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    fn reject(&mut self, error: CheckoutError) -> CheckoutError {
        self.error = Some(error.to_string());
        error
    }
}

/// Load the visitor's checkout flow. Missing or unreadable state starts a
/// fresh flow.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load(session: &Session) -> Result<CheckoutFlow, CheckoutError> {
    let Some(value) = session.get_value(session_keys::CHECKOUT).await? else {
        return Ok(CheckoutFlow::default());
    };
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable checkout state");
        CheckoutFlow::default()
    }))
}

/// Persist the visitor's checkout flow.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(session: &Session, flow: &CheckoutFlow) -> Result<(), CheckoutError> {
    session.insert(session_keys::CHECKOUT, flow).await?;
    Ok(())
}

/// Drop the stored checkout flow.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear(session: &Session) -> Result<(), CheckoutError> {
    session.remove_value(session_keys::CHECKOUT).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use kinnk_core::ProductId;
    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;
    use url::Url;

    use super::*;
    use crate::models::Country;

    fn api() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:3000/api").unwrap())
    }

    fn address() -> Address {
        Address {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            street: "1 Analytical Way".to_string(),
            apartment: None,
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip_code: "97201".to_string(),
            country: Country::US,
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            cardholder_name: "Ada Lovelace".to_string(),
            card_number: "4242424242424242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn items() -> Vec<CartItem> {
        vec![CartItem {
            product_id: ProductId::new("prod-001"),
            name: "Essential Tee Black".to_string(),
            price: Decimal::new(2000, 2),
            quantity: 2,
            size: Some("M".to_string()),
            color: Some("Black".to_string()),
            image: String::new(),
        }]
    }

    fn at_payment() -> CheckoutFlow {
        let mut flow = CheckoutFlow::default();
        flow.submit_shipping(address()).unwrap();
        flow
    }

    #[test]
    fn test_shipping_advances_to_payment() {
        let flow = at_payment();
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert_eq!(flow.error, None);
        assert_eq!(flow.shipping_address, Some(address()));
    }

    #[test]
    fn test_shipping_missing_fields_stays() {
        let mut flow = CheckoutFlow::default();
        let incomplete = Address {
            phone: "  ".to_string(),
            ..address()
        };

        let err = flow.submit_shipping(incomplete).unwrap_err();
        assert!(matches!(err, CheckoutError::MissingFields(ref f) if *f == ["phone"]));
        assert_eq!(flow.step, CheckoutStep::Shipping);
        assert_eq!(flow.error.as_deref(), Some("Please fill in: phone"));
    }

    #[test]
    fn test_back_from_payment_keeps_address() {
        let mut flow = at_payment();
        flow.back_to_shipping().unwrap();
        assert_eq!(flow.step, CheckoutStep::Shipping);
        assert!(flow.shipping_address.is_some());
    }

    #[tokio::test]
    async fn test_successful_order_confirms() {
        let mut flow = at_payment();
        let order = flow.place_order(&api(), items(), &payment()).await.unwrap();

        assert_eq!(flow.step, CheckoutStep::Confirmation);
        assert_eq!(flow.order.as_ref(), Some(&order));
        assert_eq!(order.total, Decimal::new(5319, 2));
    }

    #[tokio::test]
    async fn test_failed_order_stays_at_payment() {
        let mut flow = at_payment();
        let err = flow
            .place_order(&api(), Vec::new(), &payment())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::OrderFailed(_)));
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert_eq!(flow.order, None);
        assert_eq!(flow.error.as_deref(), Some(ORDER_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_payment_fields_stay_at_payment() {
        let mut flow = at_payment();
        let blank = PaymentDetails::default();
        let err = flow.place_order(&api(), items(), &blank).await.unwrap_err();

        assert!(matches!(err, CheckoutError::MissingFields(_)));
        assert_eq!(flow.step, CheckoutStep::Payment);
    }

    #[tokio::test]
    async fn test_cannot_place_order_from_shipping() {
        let mut flow = CheckoutFlow::default();
        let err = flow
            .place_order(&api(), items(), &payment())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
        assert_eq!(flow.step, CheckoutStep::Shipping);
    }

    #[tokio::test]
    async fn test_confirmation_is_terminal() {
        let mut flow = at_payment();
        flow.place_order(&api(), items(), &payment()).await.unwrap();

        assert!(flow.back_to_shipping().is_err());
        assert!(flow.submit_shipping(address()).is_err());
        assert_eq!(flow.step, CheckoutStep::Confirmation);

        flow.reset();
        assert_eq!(flow, CheckoutFlow::default());
    }

    #[test]
    fn test_analytics_step_names() {
        assert_eq!(CheckoutStep::Shipping.analytics_step(), "cart");
        assert_eq!(CheckoutStep::Payment.analytics_step(), "payment");
        assert_eq!(CheckoutStep::Confirmation.analytics_step(), "confirmation");
    }

    #[tokio::test]
    async fn test_session_round_trip_and_corrupt_state() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(load(&session).await.unwrap(), CheckoutFlow::default());

        save(&session, &at_payment()).await.unwrap();
        assert_eq!(load(&session).await.unwrap().step, CheckoutStep::Payment);

        session.insert(session_keys::CHECKOUT, 42).await.unwrap();
        assert_eq!(load(&session).await.unwrap(), CheckoutFlow::default());

        clear(&session).await.unwrap();
        assert!(session.get_value(session_keys::CHECKOUT).await.unwrap().is_none());
    }
}
