use crate::display;
use crate::events::*;
use crate::testers::{auth, catalog, shops, users, CartState, Outcome};
use bazaar_api::{Client, CredentialKey};
use bazaar_auth::AuthSession;
use std::sync::Arc;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Outcome(Outcome),
    Text(String),
    Quit,
}

/// Executes parsed commands against the backend, holding the state that
/// outlives a single command.
pub struct Console {
    session: AuthSession,
    cart: CartState,
}

impl Console {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            session: AuthSession::new(client),
            cart: CartState::new(),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub async fn execute(&mut self, command: Command) -> Response {
        tracing::debug!(command = command.name(), "executing command");

        let outcome = match command {
            Command::Help => return Response::Text(display::help()),
            Command::Routes => return Response::Text(display::routes()),
            Command::Session => return Response::Text(self.describe_session()),
            Command::Quit => return Response::Quit,

            Command::Auth(command) => self.execute_auth(command).await,
            Command::Users(command) => self.execute_users(command).await,
            Command::Categories(CategoryCommand::List) => {
                catalog::list_categories(&self.session).await
            }
            Command::Categories(CategoryCommand::Create { name, description }) => {
                catalog::create_category(&self.session, &name, &description).await
            }
            Command::Shops(ShopCommand::List) => shops::list(&self.session).await,
            Command::Shops(ShopCommand::Create(form)) => shops::create(&self.session, form).await,
            Command::Products(ProductCommand::List) => catalog::list_products(&self.session).await,
            Command::Products(ProductCommand::Create(form)) => {
                catalog::create_product(&self.session, form).await
            }
            Command::Cart(command) => self.execute_cart(command).await,
            Command::Send(request) => {
                Outcome::new(self.session.client().send_raw(&request).await)
            }
        };

        if let Some(notification) = &outcome.notification {
            if notification.is_destructive() {
                tracing::warn!(title = %notification.title, "command failed");
            } else {
                tracing::info!(title = %notification.title, "command succeeded");
            }
        }

        Response::Outcome(outcome)
    }

    async fn execute_auth(&mut self, command: AuthCommand) -> Outcome {
        match command {
            AuthCommand::Login { phone, password } => {
                let outcome = auth::login(&self.session, &phone, &password).await;
                // A new sign-in makes any loaded cart stale
                if outcome.is_success() {
                    self.cart = CartState::new();
                }
                outcome
            }
            AuthCommand::Logout => {
                self.cart = CartState::new();
                auth::logout(&self.session).await
            }
            AuthCommand::Refresh => auth::refresh(&self.session).await,
            AuthCommand::VerifyOtp { phone, otp } => {
                auth::verify_otp(&self.session, &phone, &otp).await
            }
        }
    }

    async fn execute_users(&self, command: UserCommand) -> Outcome {
        match command {
            UserCommand::Get { id } => users::get(&self.session, id).await,
            UserCommand::List { page, limit } => users::list(&self.session, page, limit).await,
            UserCommand::Register(form) => users::register(&self.session, form).await,
            UserCommand::Update(form) => users::update(&self.session, form).await,
        }
    }

    async fn execute_cart(&mut self, command: CartCommand) -> Outcome {
        let session = &self.session;
        let cart = &mut self.cart;
        match command {
            CartCommand::Get { cart_id } => cart.get(session, &cart_id).await,
            CartCommand::Clear => cart.clear(session).await,
            CartCommand::RemoveItem { item_id } => cart.remove_item(session, &item_id).await,
            CartCommand::SetQuantity { item_id, quantity } => {
                cart.set_quantity(session, &item_id, quantity).await
            }
            CartCommand::AdjustQuantity { item_id, change } => {
                cart.adjust_quantity(session, &item_id, change).await
            }
        }
    }

    fn describe_session(&self) -> String {
        let credentials = self.session.client().store().snapshot();
        let line = |key: CredentialKey| {
            let value = match key {
                CredentialKey::UserId => credentials.get(key).map(str::to_string),
                _ => credentials.get(key).map(mask),
            };
            format!("{:<14}{}", key.as_str(), value.unwrap_or_else(|| "(not set)".to_string()))
        };

        let mut lines = vec![format!("{:<14}{}", "baseUrl", self.session.client().base_url())];
        lines.extend(CredentialKey::ALL.into_iter().map(line));
        lines.join("\n")
    }
}

/// Show only the start of a token.
fn mask(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if visible.len() < token.len() {
        format!("{}...", visible)
    } else {
        visible
    }
}
