//! Cart persistence in the visitor session.
//!
//! The cart is read at the start of every request that needs it and written
//! back after every mutation.

use thiserror::Error;
use tower_sessions::Session;

use super::{Cart, CartItem, VariantKey};
use crate::models::session_keys;

/// Errors reading or writing the stored cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The session store failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Load the visitor's cart.
///
/// A missing cart is an empty cart. A stored value that no longer
/// deserializes is logged, discarded and replaced with an empty cart.
/// Totals are always recomputed from the stored items.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load(session: &Session) -> Result<Cart, CartStoreError> {
    let Some(value) = session.get_value(session_keys::CART).await? else {
        return Ok(Cart::new());
    };

    match serde_json::from_value::<Cart>(value) {
        Ok(mut cart) => {
            cart.items.retain(|item| item.quantity > 0);
            cart.recalculate();
            Ok(cart)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cart from session, starting empty");
            session.remove_value(session_keys::CART).await?;
            Ok(Cart::new())
        }
    }
}

/// Persist the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), CartStoreError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Load, apply `mutate`, and persist in one step. Returns the updated cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn update<F>(session: &Session, mutate: F) -> Result<Cart, CartStoreError>
where
    F: FnOnce(&mut Cart),
{
    let mut cart = load(session).await?;
    mutate(&mut cart);
    save(session, &cart).await?;
    Ok(cart)
}

/// Add an item and persist.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn add_item(session: &Session, item: CartItem) -> Result<Cart, CartStoreError> {
    update(session, |cart| cart.add_item(item)).await
}

/// Update a line's quantity (removing it when `quantity <= 0`) and persist.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn update_quantity(
    session: &Session,
    key: &VariantKey,
    quantity: i64,
) -> Result<Cart, CartStoreError> {
    update(session, |cart| cart.update_quantity(key, quantity)).await
}

/// Remove a line and persist. Returns the updated cart and the removed line.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn remove_item(
    session: &Session,
    key: &VariantKey,
) -> Result<(Cart, Option<CartItem>), CartStoreError> {
    let mut removed = None;
    let cart = update(session, |cart| removed = cart.remove_item(key)).await?;
    Ok((cart, removed))
}

/// Empty the cart and persist.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear(session: &Session) -> Result<Cart, CartStoreError> {
    update(session, Cart::clear).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use kinnk_core::ProductId;
    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::cart::CartTotals;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn tee(quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new("prod-001"),
            name: "Essential Tee Black".to_string(),
            price: Decimal::new(2000, 2),
            quantity,
            size: Some("M".to_string()),
            color: None,
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_cart_loads_empty() {
        let session = session();
        let cart = load(&session).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let session = session();
        add_item(&session, tee(1)).await.unwrap();
        add_item(&session, tee(1)).await.unwrap();

        let cart = load(&session).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total, Decimal::new(5319, 2));
    }

    #[tokio::test]
    async fn test_corrupt_cart_is_replaced() {
        let session = session();
        session
            .insert(session_keys::CART, "not a cart")
            .await
            .unwrap();

        let cart = load(&session).await.unwrap();
        assert!(cart.is_empty());
        assert!(session.get_value(session_keys::CART).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_totals_are_recomputed() {
        let session = session();
        let mut tampered = Cart::from_items(vec![tee(2)]);
        tampered.total = Decimal::ONE;
        save(&session, &tampered).await.unwrap();

        let cart = load(&session).await.unwrap();
        assert_eq!(cart.total, Decimal::new(5319, 2));
    }

    #[tokio::test]
    async fn test_clear_persists_empty_cart() {
        let session = session();
        add_item(&session, tee(3)).await.unwrap();
        clear(&session).await.unwrap();

        let cart = load(&session).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }
}
