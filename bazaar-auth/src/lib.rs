// Session and configuration layer on top of bazaar-api
mod client;
mod error;

pub use client::{connect, AuthSession, SessionStore, Settings};
pub use error::AuthError;
