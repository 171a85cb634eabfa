use super::{announce, Outcome};
use crate::events::ShopForm;
use crate::notifications::Notification;
use bazaar_api::endpoints::shops::{Shop, ShopsResponse};
use bazaar_api::Request;
use bazaar_auth::AuthSession;

pub async fn list(session: &AuthSession) -> Outcome {
    let token = session.access_token();
    let envelope = session
        .client()
        .call(&Request::shops().list(), token.as_deref())
        .await;

    let details = envelope
        .data_as::<ShopsResponse>()
        .map(|response| response.shops)
        .unwrap_or_default()
        .iter()
        .map(describe)
        .collect();

    let outcome = Outcome::new(envelope).with_details(details);
    if outcome.is_success() {
        outcome
    } else {
        outcome.notify(Notification::destructive(
            "Failed to fetch shops",
            "An error occurred while fetching shops.",
        ))
    }
}

/// Create a shop owned by the signed-in user.
pub async fn create(session: &AuthSession, form: ShopForm) -> Outcome {
    let Some(user_id) = session.user_id() else {
        return Outcome::rejected(Notification::destructive(
            "Not Logged In",
            "Please log in first.",
        ));
    };

    let mut request = Request::shops()
        .create(user_id)
        .desc(form.desc)
        .street(form.street)
        .business_type(form.business_type)
        .building_name(form.building_name)
        .shop_number(form.shop_number);
    if !form.name.is_empty() {
        request = request.name(form.name);
    }

    let token = session.access_token();
    announce(
        session.client().call(&request, token.as_deref()).await,
        Notification::success("Shop Created", "The new shop has been successfully created."),
        Notification::destructive(
            "Failed to create shop",
            "An error occurred while creating the shop.",
        ),
    )
}

fn describe(shop: &Shop) -> String {
    let address = [shop.street.as_deref(), shop.building_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}  {}  {}  #{}",
        shop.id,
        shop.name.as_deref().unwrap_or("(unnamed)"),
        address,
        shop.shop_number.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_joins_known_address_parts() {
        let shop: Shop = serde_json::from_value(json!({
            "id": "s1",
            "name": "Corner",
            "street": "Main St",
            "buildingName": "",
            "shopNumber": "12"
        }))
        .unwrap();

        assert_eq!(describe(&shop), "s1  Corner  Main St  #12");
    }
}
