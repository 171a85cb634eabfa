use super::{Method, Request};
use super::products::Product;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub cart_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub amount: f64,
    pub product: Option<Product>,
}

impl CartItem {
    /// Whether `quantity` is allowed for this item: positive and, when the
    /// product is known, no more than its stock.
    pub fn accepts_quantity(&self, quantity: u32) -> bool {
        quantity > 0
            && self
                .product
                .as_ref()
                .is_none_or(|product| quantity <= product.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub user_id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn total_amount(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.amount * f64::from(item.quantity))
            .sum()
    }
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct GetCart {
    id: String,
}

impl GetCart {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetCart {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/cart/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearCart {
    id: String,
}

impl ClearCart {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for ClearCart {
    type Body = ();
    const METHOD: Method = Method::Put;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/cart/clear/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItem {
    cart_item_id: String,
}

impl RemoveCartItem {
    pub fn new(cart_item_id: impl Into<String>) -> Self {
        Self {
            cart_item_id: cart_item_id.into(),
        }
    }
}

impl Request for RemoveCartItem {
    type Body = Self;
    const METHOD: Method = Method::Delete;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/cart/items/{}", self.cart_item_id).into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItem {
    cart_item_id: String,
    quantity: u32,
}

impl UpdateCartItem {
    pub fn new(cart_item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            cart_item_id: cart_item_id.into(),
            quantity,
        }
    }
}

impl Request for UpdateCartItem {
    type Body = Self;
    const METHOD: Method = Method::Patch;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/cart/items/{}", self.cart_item_id).into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}
