use super::{announce, Outcome};
use crate::notifications::Notification;
use bazaar_auth::AuthSession;
use bazaar_api::TokenPair;

pub async fn login(session: &AuthSession, phone: &str, password: &str) -> Outcome {
    let envelope = session.login(phone, password).await;

    // A 2xx without tokens did not sign anyone in
    let signed_in = envelope.data().and_then(TokenPair::from_body).is_some();
    let notification = if signed_in {
        Notification::success("Login Successful", "You have successfully logged in.")
    } else {
        Notification::destructive("Login Failed", "Please check your credentials and try again.")
    };

    Outcome::new(envelope).notify(notification)
}

pub async fn logout(session: &AuthSession) -> Outcome {
    announce(
        session.logout().await,
        Notification::success("Logout Successful", "You have been logged out."),
        Notification::destructive("Logout Failed", "An error occurred during logout."),
    )
}

pub async fn refresh(session: &AuthSession) -> Outcome {
    let envelope = session.refresh().await;

    let refreshed = envelope.data().and_then(TokenPair::from_body).is_some();
    let notification = if refreshed {
        Notification::success("Token Refreshed", "Your access token has been refreshed.")
    } else {
        Notification::destructive("Token Refresh Failed", "Failed to refresh the access token.")
    };

    Outcome::new(envelope).notify(notification)
}

pub async fn verify_otp(session: &AuthSession, phone: &str, otp: &str) -> Outcome {
    announce(
        session.verify_otp(phone, otp).await,
        Notification::success("OTP Verified", "The one-time password was accepted."),
        Notification::destructive("OTP Verification Failed", "The one-time password was rejected."),
    )
}
