use super::{Method, Request};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListCategories;

impl ListCategories {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListCategories {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCategory {
    name: String,
    description: String,
}

impl CreateCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Request for CreateCategory {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// Responses

/// Categories come back either bare or wrapped as `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoriesResponse {
    Wrapped { data: Vec<Category> },
    Bare(Vec<Category>),
}

impl CategoriesResponse {
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}
