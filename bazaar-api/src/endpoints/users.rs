use super::{Method, Request};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

// Common

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buyer => f.write_str("buyer"),
            Self::Seller => f.write_str("seller"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}' (expected buyer, seller or admin)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct ListUsers {
    page: u32,
    limit: u32,
}

impl Default for ListUsers {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl ListUsers {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page: u32);
    setter!(limit: u32);
}

impl Request for ListUsers {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/users?page={}&limit={}", self.page, self.limit).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUser {
    id: String,
}

impl GetUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetUser {
    type Body = ();

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/users/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterUser {
    username: String,
    password: String,
    phone: String,
    role: Role,
}

impl RegisterUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            phone: phone.into(),
            role,
        }
    }
}

impl Request for RegisterUser {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/register".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Partial profile update. Fields left unset are not sent.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateUser {
    #[serde(skip)]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

impl UpdateUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            phone: None,
            role: None,
        }
    }

    setter!(opt username: String);
    setter!(opt phone: String);
    setter!(opt role: Role);

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.phone.is_none() && self.role.is_none()
    }
}

impl Request for UpdateUser {
    type Body = Self;
    const METHOD: Method = Method::Patch;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/users/{}", self.id).into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_users_defaults_to_first_page() {
        assert_eq!(ListUsers::new().endpoint(), "/users?page=1&limit=10");
        assert_eq!(
            ListUsers::new().page(3u32).limit(25u32).endpoint(),
            "/users?page=3&limit=25"
        );
    }

    #[test]
    fn update_user_omits_unset_fields_and_id() {
        let request = UpdateUser::new("abc").phone("0700").role(Role::Seller);
        assert_eq!(request.endpoint(), "/users/abc");
        assert_eq!(
            serde_json::to_value(request.body().unwrap()).unwrap(),
            json!({"phone": "0700", "role": "seller"})
        );
    }

    #[test]
    fn role_parses_any_case() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn user_deserializes_timestamps() {
        let user: User = serde_json::from_value(json!({
            "id": "abc",
            "username": "amy",
            "role": "buyer",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(user.role, Some(Role::Buyer));
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
    }
}
