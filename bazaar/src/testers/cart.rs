use super::{announce, Outcome};
use crate::notifications::Notification;
use bazaar_api::endpoints::cart::{Cart, CartItem};
use bazaar_api::repositories::CartItemRepository;
use bazaar_api::Request;
use bazaar_auth::AuthSession;
use serde_json::Value;

/// The cart most recently fetched, kept so later commands can validate
/// quantities and address the cart by id.
#[derive(Debug, Default)]
pub struct CartState {
    cart: Option<Cart>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub async fn get(&mut self, session: &AuthSession, cart_id: &str) -> Outcome {
        let Some(token) = session.access_token() else {
            return Outcome::rejected(login_required());
        };

        let envelope = session
            .client()
            .call(&Request::cart(cart_id).get(), Some(token.as_str()))
            .await;

        let Some(cart) = envelope.data().and_then(cart_payload) else {
            return Outcome::new(envelope).notify(Notification::destructive(
                "Failed to fetch cart",
                "An error occurred while fetching the cart.",
            ));
        };

        let details = describe(&cart);
        self.cart = Some(cart);
        Outcome::new(envelope).with_details(details)
    }

    pub async fn clear(&mut self, session: &AuthSession) -> Outcome {
        let Some(token) = session.access_token() else {
            return Outcome::rejected(login_required());
        };
        let Some(cart_id) = self.cart.as_ref().map(|cart| cart.id.clone()) else {
            return Outcome::rejected(no_cart());
        };

        let envelope = session
            .client()
            .call(&Request::cart(cart_id).clear(), Some(token.as_str()))
            .await;
        if envelope.is_success() {
            if let Some(cart) = self.cart.as_mut() {
                cart.items.clear();
            }
        }

        announce(
            envelope,
            Notification::success("Cart cleared", "All items have been removed from your cart."),
            Notification::destructive(
                "Failed to clear cart",
                "An error occurred while clearing the cart.",
            ),
        )
    }

    pub async fn remove_item(&mut self, session: &AuthSession, item_id: &str) -> Outcome {
        let Some(token) = session.access_token() else {
            return Outcome::rejected(login_required());
        };

        let request = CartItemRepository::new().remove(item_id);
        let envelope = session.client().call(&request, Some(token.as_str())).await;
        if envelope.is_success() {
            if let Some(cart) = self.cart.as_mut() {
                cart.items.retain(|item| item.id != item_id);
            }
        }

        announce(
            envelope,
            Notification::success("Item removed", "The item has been removed from your cart."),
            Notification::destructive(
                "Failed to remove item",
                "An error occurred while removing the item from the cart.",
            ),
        )
    }

    /// Set an item's quantity. Items in the loaded cart are checked against
    /// product stock before anything is sent.
    pub async fn set_quantity(
        &mut self,
        session: &AuthSession,
        item_id: &str,
        quantity: u32,
    ) -> Outcome {
        let Some(token) = session.access_token() else {
            return Outcome::rejected(login_required());
        };
        if let Some(item) = self.cart.as_ref().and_then(|cart| cart.item(item_id)) {
            if !item.accepts_quantity(quantity) {
                return Outcome::rejected(invalid_quantity(item));
            }
        } else if quantity == 0 {
            return Outcome::rejected(Notification::destructive(
                "Invalid quantity",
                "Quantity must be at least 1.",
            ));
        }

        let request = CartItemRepository::new().update(item_id, quantity);
        let envelope = session.client().call(&request, Some(token.as_str())).await;
        if envelope.is_success() {
            if let Some(item) = self
                .cart
                .as_mut()
                .and_then(|cart| cart.items.iter_mut().find(|item| item.id == item_id))
            {
                item.quantity = quantity;
            }
        }

        announce(
            envelope,
            Notification::success(
                "Quantity updated",
                "The item quantity has been updated in your cart.",
            ),
            Notification::destructive(
                "Failed to update quantity",
                "An error occurred while updating the item quantity.",
            ),
        )
    }

    /// Step an item's quantity up or down from its current value.
    pub async fn adjust_quantity(
        &mut self,
        session: &AuthSession,
        item_id: &str,
        change: i64,
    ) -> Outcome {
        let Some(cart) = self.cart.as_ref() else {
            return Outcome::rejected(no_cart());
        };
        let Some(item) = cart.item(item_id) else {
            return Outcome::rejected(item_not_in_cart(item_id));
        };

        let target = match u32::try_from(i64::from(item.quantity) + change) {
            Ok(quantity) if item.accepts_quantity(quantity) => Ok(quantity),
            _ => Err(invalid_quantity(item)),
        };

        match target {
            Ok(quantity) => self.set_quantity(session, item_id, quantity).await,
            Err(notification) => Outcome::rejected(notification),
        }
    }
}

fn login_required() -> Notification {
    Notification::destructive("Authentication required", "Please log in to view your cart.")
}

fn no_cart() -> Notification {
    Notification::destructive("No cart loaded", "Fetch a cart with 'cart get <id>' first.")
}

fn item_not_in_cart(item_id: &str) -> Notification {
    Notification::destructive(
        "Item not in cart",
        format!("The loaded cart has no item '{}'.", item_id),
    )
}

fn invalid_quantity(item: &CartItem) -> Notification {
    let description = match &item.product {
        Some(product) => format!("Quantity must be between 1 and {}.", product.quantity),
        None => "Quantity must be at least 1.".to_string(),
    };
    Notification::destructive("Invalid quantity", description)
}

/// Cart bodies come bare, under `data`, or under `cart`.
fn cart_payload(body: &Value) -> Option<Cart> {
    [Some(body), body.get("data"), body.get("cart")]
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
}

fn describe(cart: &Cart) -> Vec<String> {
    let mut lines = vec![format!("cart {} ({} items)", cart.id, cart.items.len())];
    lines.extend(cart.items.iter().map(|item| {
        let name = item
            .product
            .as_ref()
            .map(|product| product.name.as_str())
            .unwrap_or("-");
        format!("  {}  {}  x{}  {:.2}", item.id, name, item.quantity, item.amount)
    }));
    lines.push(format!("total {:.2}", cart.total_amount()));
    lines
}
