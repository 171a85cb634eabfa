use super::{announce, Outcome};
use crate::events::UserForm;
use crate::notifications::Notification;
use bazaar_api::endpoints::users::{Role, User};
use bazaar_api::Request;
use bazaar_auth::AuthSession;
use serde_json::Value;

fn invalid_input() -> Notification {
    Notification::destructive("Invalid Input", "Please fill in all required fields.")
}

fn not_signed_in() -> Notification {
    Notification::destructive("Not Logged In", "Please log in first.")
}

/// Fetch one user; without an id, the signed-in user.
pub async fn get(session: &AuthSession, id: Option<String>) -> Outcome {
    let Some(id) = id.or_else(|| session.user_id()) else {
        return Outcome::rejected(not_signed_in());
    };

    let token = session.access_token();
    let envelope = session
        .client()
        .call(&Request::users().get(id), token.as_deref())
        .await;

    let details = envelope
        .data()
        .and_then(user_payload)
        .map(|user| vec![describe(&user)])
        .unwrap_or_default();

    announce(
        envelope,
        Notification::success("User Retrieved", "User data has been successfully fetched."),
        Notification::destructive("Fetch Failed", "Failed to retrieve user data."),
    )
    .with_details(details)
}

pub async fn list(session: &AuthSession, page: u32, limit: u32) -> Outcome {
    let token = session.access_token();
    let request = Request::users().list().page(page).limit(limit);
    let envelope = session.client().call(&request, token.as_deref()).await;

    let details = envelope
        .data()
        .map(users_payload)
        .unwrap_or_default()
        .iter()
        .map(describe)
        .collect();

    announce(
        envelope,
        Notification::success("Users Retrieved", "List of users has been successfully fetched."),
        Notification::destructive("Fetch Failed", "Failed to retrieve users list."),
    )
    .with_details(details)
}

pub async fn register(session: &AuthSession, form: UserForm) -> Outcome {
    if [&form.username, &form.password, &form.phone, &form.role]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Outcome::rejected(invalid_input());
    }
    let role: Role = match form.role.parse() {
        Ok(role) => role,
        Err(message) => return Outcome::rejected(Notification::destructive("Invalid Input", message)),
    };

    let request = Request::users().register(form.username, form.password, form.phone, role);
    announce(
        session.client().call(&request, None).await,
        Notification::success("User Registered", "New user has been successfully registered."),
        Notification::destructive("Registration Failed", "Failed to register new user."),
    )
}

/// Patch the signed-in user with whichever fields were given.
pub async fn update(session: &AuthSession, form: UserForm) -> Outcome {
    let Some(user_id) = session.user_id() else {
        return Outcome::rejected(not_signed_in());
    };

    let mut request = Request::users().update(user_id);
    if !form.username.is_empty() {
        request = request.username(form.username);
    }
    if !form.phone.is_empty() {
        request = request.phone(form.phone);
    }
    if !form.role.is_empty() {
        match form.role.parse::<Role>() {
            Ok(role) => request = request.role(role),
            Err(message) => {
                return Outcome::rejected(Notification::destructive("Invalid Input", message))
            }
        }
    }
    if request.is_empty() {
        return Outcome::rejected(invalid_input());
    }

    let token = session.access_token();
    announce(
        session.client().call(&request, token.as_deref()).await,
        Notification::success("User Updated", "User data has been successfully updated."),
        Notification::destructive("Update Failed", "Failed to update user data."),
    )
}

fn user_payload(body: &Value) -> Option<User> {
    [Some(body), body.get("data"), body.get("user")]
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
}

fn users_payload(body: &Value) -> Vec<User> {
    [Some(body), body.get("data"), body.get("users")]
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
        .unwrap_or_default()
}

fn describe(user: &User) -> String {
    format!(
        "{}  {}  {}  {}",
        user.id,
        user.username.as_deref().unwrap_or("-"),
        user.phone.as_deref().unwrap_or("-"),
        user.role.map(|role| role.to_string()).unwrap_or_else(|| "-".to_string()),
    )
}
