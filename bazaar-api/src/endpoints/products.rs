use super::{Method, Request};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub min_purchase: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub mkt_price: f64,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub shop_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListProducts;

impl ListProducts {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListProducts {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        "/products".into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    name: String,
    quantity: u32,
    min_purchase: u32,
    description: String,
    brand: String,
    mkt_price: f64,
    selling_price: f64,
    size: String,
    colors: Vec<String>,
    img: String,
    shop_id: String,
    category_id: i64,
}

impl CreateProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    setter!(quantity: u32);
    setter!(min_purchase: u32);
    setter!(description: String);
    setter!(brand: String);
    setter!(mkt_price: f64);
    setter!(selling_price: f64);
    setter!(size: String);
    setter!(img: String);
    setter!(shop_id: String);
    setter!(category_id: i64);

    /// Comma separated colour list, whitespace trimmed.
    pub fn colors(mut self, colors: &str) -> Self {
        self.colors = colors
            .split(',')
            .map(str::trim)
            .filter(|color| !color.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

impl Request for CreateProduct {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/products".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}
