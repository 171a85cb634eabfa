use super::{announce, Outcome};
use crate::events::ProductForm;
use crate::notifications::Notification;
use bazaar_api::endpoints::categories::{CategoriesResponse, Category};
use bazaar_api::endpoints::products::{Product, ProductsResponse};
use bazaar_api::Request;
use bazaar_auth::AuthSession;

// Listing is public; creating sends whatever token the session holds.

pub async fn list_categories(session: &AuthSession) -> Outcome {
    let envelope = session
        .client()
        .call(&Request::categories().list(), None)
        .await;

    let details = envelope
        .data_as::<CategoriesResponse>()
        .map(CategoriesResponse::into_categories)
        .unwrap_or_default()
        .iter()
        .map(describe_category)
        .collect();

    let outcome = Outcome::new(envelope).with_details(details);
    if outcome.is_success() {
        outcome
    } else {
        outcome.notify(Notification::destructive(
            "Failed to fetch categories",
            "An error occurred while fetching categories.",
        ))
    }
}

pub async fn create_category(session: &AuthSession, name: &str, description: &str) -> Outcome {
    if name.trim().is_empty() {
        return Outcome::rejected(Notification::destructive(
            "Invalid Input",
            "Please fill in all required fields.",
        ));
    }

    let token = session.access_token();
    announce(
        session
            .client()
            .call(&Request::categories().create(name, description), token.as_deref())
            .await,
        Notification::success(
            "Category Created",
            "The new category has been successfully created.",
        ),
        Notification::destructive(
            "Failed to create category",
            "An error occurred while creating the category.",
        ),
    )
}

pub async fn list_products(session: &AuthSession) -> Outcome {
    let envelope = session
        .client()
        .call(&Request::products().list(), None)
        .await;

    let details = envelope
        .data_as::<ProductsResponse>()
        .map(|response| response.products)
        .unwrap_or_default()
        .iter()
        .map(describe_product)
        .collect();

    let outcome = Outcome::new(envelope).with_details(details);
    if outcome.is_success() {
        outcome
    } else {
        outcome.notify(Notification::destructive(
            "Failed to fetch products",
            "An error occurred while fetching products.",
        ))
    }
}

pub async fn create_product(session: &AuthSession, form: ProductForm) -> Outcome {
    if form.name.trim().is_empty() {
        return Outcome::rejected(Notification::destructive(
            "Invalid Input",
            "Please fill in all required fields.",
        ));
    }

    let request = Request::products()
        .create(form.name)
        .quantity(form.quantity)
        .min_purchase(form.min_purchase)
        .description(form.description)
        .brand(form.brand)
        .mkt_price(form.mkt_price)
        .selling_price(form.selling_price)
        .size(form.size)
        .colors(&form.colors)
        .img(form.img)
        .shop_id(form.shop_id)
        .category_id(form.category_id);

    let token = session.access_token();
    announce(
        session.client().call(&request, token.as_deref()).await,
        Notification::success(
            "Product Created",
            "The new product has been successfully created.",
        ),
        Notification::destructive(
            "Failed to create product",
            "An error occurred while creating the product.",
        ),
    )
}

fn describe_category(category: &Category) -> String {
    match category.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("{}  {} - {}", category.id, category.name, description)
        }
        _ => format!("{}  {}", category.id, category.name),
    }
}

fn describe_product(product: &Product) -> String {
    format!(
        "{}  {}  qty {}  {:.2} (was {:.2})",
        product.id, product.name, product.quantity, product.selling_price, product.mkt_price
    )
}
