pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
pub mod shops;
pub mod users;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Patch,
        Method::Put,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method: {}", s))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A typed call against one backend route.
pub trait Request {
    type Body: Serialize;
    const METHOD: Method = Method::Get;

    fn endpoint(&self) -> Cow<'_, str>;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// Untyped request descriptor: endpoint, method, optional body and token.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
    pub token: Option<String>,
}

impl RawRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            ..Self::default()
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Access and refresh token issued by login or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    /// Find a token pair in a response body.
    ///
    /// The backend nests tokens differently per route, so this accepts them at
    /// the top level, under `data`, or under `tokens` (at either level).
    pub fn from_body(body: &Value) -> Option<Self> {
        let candidates = [
            Some(body),
            body.get("tokens"),
            body.get("data"),
            body.get("data").and_then(|data| data.get("tokens")),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("patch".parse::<Method>(), Ok(Method::Patch));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn token_pair_found_at_any_nesting() {
        let expected = TokenPair {
            access_token: "new".into(),
            refresh_token: "new2".into(),
        };

        let top = json!({"accessToken": "new", "refreshToken": "new2"});
        let wrapped = json!({"success": true, "data": {"accessToken": "new", "refreshToken": "new2"}});
        let login = json!({"user": {"id": "u1"}, "tokens": {"accessToken": "new", "refreshToken": "new2"}});

        assert_eq!(TokenPair::from_body(&top), Some(expected.clone()));
        assert_eq!(TokenPair::from_body(&wrapped), Some(expected.clone()));
        assert_eq!(TokenPair::from_body(&login), Some(expected));
    }

    #[test]
    fn token_pair_requires_both_tokens() {
        assert_eq!(
            TokenPair::from_body(&json!({"success": false, "data": {"accessToken": "a"}})),
            None
        );
        assert_eq!(TokenPair::from_body(&json!("request completed successfully")), None);
    }
}
