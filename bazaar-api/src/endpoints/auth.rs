use super::{Method, Request, TokenPair};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct Login {
    phone: String,
    password: String,
}

impl Login {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }
}

impl Request for Login {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logout {
    refresh_token: Option<String>,
}

impl Logout {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self { refresh_token }
    }
}

impl Request for Logout {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/logout".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Exchange a refresh token for a new token pair.
///
/// Either credential may be missing; the backend then rejects the call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    user_id: Option<String>,
    refresh_token: Option<String>,
}

impl RefreshToken {
    pub const ENDPOINT: &'static str = "/auth/refresh-token";

    pub fn new(user_id: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            user_id,
            refresh_token,
        }
    }
}

impl Request for RefreshToken {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        Self::ENDPOINT.into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtp {
    phone: String,
    otp: String,
}

impl VerifyOtp {
    pub fn new(phone: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            otp: otp.into(),
        }
    }
}

impl Request for VerifyOtp {
    type Body = Self;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/verify-otp".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUser,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn refresh_body_uses_camel_case_and_nulls() {
        let request = RefreshToken::new(Some("u1".into()), None);
        assert_eq!(
            serde_json::to_value(request.body().unwrap()).unwrap(),
            json!({"userId": "u1", "refreshToken": null})
        );
        assert_eq!(request.endpoint(), "/auth/refresh-token");
        assert_eq!(RefreshToken::METHOD, Method::Post);
    }

    #[test]
    fn login_response_reads_user_and_tokens() {
        let body = json!({
            "user": {"id": "u1", "username": "amy"},
            "tokens": {"accessToken": "a", "refreshToken": "r"}
        });
        let response: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.user.id, "u1");
        assert_eq!(response.tokens.refresh_token, "r");
    }
}
