use super::{Method, Request};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub street: Option<String>,
    pub business_type: Option<String>,
    pub building_name: Option<String>,
    pub shop_number: Option<String>,
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListShops;

impl ListShops {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListShops {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        "/shops".into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShop {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    desc: String,
    street: String,
    business_type: String,
    building_name: String,
    shop_number: String,
    user_id: String,
}

impl CreateShop {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    setter!(opt name: String);
    setter!(desc: String);
    setter!(street: String);
    setter!(business_type: String);
    setter!(building_name: String);
    setter!(shop_number: String);
}

impl Request for CreateShop {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/shops".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopsResponse {
    pub shops: Vec<Shop>,
}
