use crate::commands::Response;
use crate::testers::Outcome;
use bazaar_api::Method;
use itertools::Itertools;

/// Documented backend routes, listed by the `routes` command.
const ROUTES: &[(Method, &str, &str)] = &[
    (Method::Post, "/auth/login", "Sign in with phone and password"),
    (Method::Post, "/auth/logout", "End the session for a refresh token"),
    (Method::Post, "/auth/refresh-token", "Exchange a refresh token for new tokens"),
    (Method::Post, "/auth/verify-otp", "Confirm a one-time password"),
    (Method::Get, "/users", "List users (page, limit)"),
    (Method::Get, "/users/:id", "Fetch one user"),
    (Method::Post, "/users/register", "Create a user"),
    (Method::Patch, "/users/:id", "Update a user"),
    (Method::Get, "/categories", "List categories"),
    (Method::Post, "/categories", "Create a category"),
    (Method::Get, "/shops", "List shops"),
    (Method::Post, "/shops", "Create a shop"),
    (Method::Get, "/products", "List products"),
    (Method::Post, "/products", "Create a product"),
    (Method::Get, "/cart/:id", "Fetch a cart"),
    (Method::Put, "/cart/clear/:id", "Remove every item from a cart"),
    (Method::Patch, "/cart/items/:id", "Change an item's quantity"),
    (Method::Delete, "/cart/items/:id", "Remove an item"),
];

const HELP: &[(&str, &str)] = &[
    ("login <phone> <password>", "sign in and store the session tokens"),
    ("logout", "sign out and forget the session"),
    ("auth refresh", "exchange the refresh token for new tokens"),
    ("auth verify-otp <phone> <otp>", "verify a one-time password"),
    ("users get [id]", "fetch a user (defaults to yourself)"),
    ("users list [page] [limit]", "list users"),
    ("users register username= password= phone= role=", "create a user"),
    ("users update [username=] [phone=] [role=]", "update your profile"),
    ("categories list", "list categories"),
    ("categories create name= [description=]", "create a category"),
    ("shops list", "list shops"),
    (
        "shops create [name=] desc= street= businessType= buildingName= shopNumber=",
        "create a shop you own",
    ),
    ("products list", "list products"),
    (
        "products create name= quantity= minPurchase= sellingPrice= mktPrice= ...",
        "create a product (also description, brand, size, colors, img, shopId, categoryId)",
    ),
    ("cart get <cart-id>", "load a cart"),
    ("cart clear", "empty the loaded cart"),
    ("cart remove <item-id>", "remove an item"),
    ("cart set <item-id> <quantity>", "set an item's quantity"),
    ("cart inc|dec <item-id>", "step an item's quantity"),
    ("send <METHOD> <endpoint> [--token <t>] [json]", "raw request against any route"),
    ("session", "show the stored credentials"),
    ("routes", "list the backend routes"),
    ("quit", "leave the console"),
];

pub fn help() -> String {
    let width = HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    HELP.iter()
        .map(|(usage, summary)| format!("  {:<width$}  {}", usage, summary, width = width))
        .join("\n")
}

pub fn routes() -> String {
    ROUTES
        .iter()
        .map(|(method, path, summary)| format!("  {:<7}{:<22}{}", method.as_str(), path, summary))
        .join("\n")
}

pub fn render(response: &Response) -> String {
    match response {
        Response::Outcome(outcome) => render_outcome(outcome),
        Response::Text(text) => text.clone(),
        Response::Quit => String::new(),
    }
}

/// Notification first, then summary lines, then the envelope as pretty JSON.
pub fn render_outcome(outcome: &Outcome) -> String {
    let mut sections = Vec::new();

    if let Some(notification) = &outcome.notification {
        sections.push(notification.to_string());
    }
    if !outcome.details.is_empty() {
        sections.push(outcome.details.iter().join("\n"));
    }
    if let Some(envelope) = &outcome.envelope {
        let json = serde_json::to_string_pretty(envelope)
            .unwrap_or_else(|e| format!("<unprintable response: {}>", e));
        sections.push(format!("API Response:\n{}", json));
    }

    sections.join("\n\n")
}
