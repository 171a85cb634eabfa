use bazaar_api::RawRequest;

/// Commands typed at the console prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Routes,
    Session,
    Quit,

    Auth(AuthCommand),
    Users(UserCommand),
    Categories(CategoryCommand),
    Shops(ShopCommand),
    Products(ProductCommand),
    Cart(CartCommand),

    // Free-form request against any route
    Send(RawRequest),
}

impl Command {
    /// Label for logs. Never includes arguments, which may hold passwords.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Routes => "routes",
            Command::Session => "session",
            Command::Quit => "quit",
            Command::Auth(AuthCommand::Login { .. }) => "auth login",
            Command::Auth(AuthCommand::Logout) => "auth logout",
            Command::Auth(AuthCommand::Refresh) => "auth refresh",
            Command::Auth(AuthCommand::VerifyOtp { .. }) => "auth verify-otp",
            Command::Users(UserCommand::Get { .. }) => "users get",
            Command::Users(UserCommand::List { .. }) => "users list",
            Command::Users(UserCommand::Register(_)) => "users register",
            Command::Users(UserCommand::Update(_)) => "users update",
            Command::Categories(CategoryCommand::List) => "categories list",
            Command::Categories(CategoryCommand::Create { .. }) => "categories create",
            Command::Shops(ShopCommand::List) => "shops list",
            Command::Shops(ShopCommand::Create(_)) => "shops create",
            Command::Products(ProductCommand::List) => "products list",
            Command::Products(ProductCommand::Create(_)) => "products create",
            Command::Cart(CartCommand::Get { .. }) => "cart get",
            Command::Cart(CartCommand::Clear) => "cart clear",
            Command::Cart(CartCommand::RemoveItem { .. }) => "cart remove",
            Command::Cart(CartCommand::SetQuantity { .. }) => "cart set",
            Command::Cart(CartCommand::AdjustQuantity { .. }) => "cart adjust",
            Command::Send(_) => "send",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCommand {
    Login { phone: String, password: String },
    Logout,
    Refresh,
    VerifyOtp { phone: String, otp: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Falls back to the signed-in user when no id is given
    Get {
        id: Option<String>,
    },
    List {
        page: u32,
        limit: u32,
    },
    Register(UserForm),
    Update(UserForm),
}

/// Field values as typed; empty means "not provided".
#[derive(Default, Debug, Clone, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryCommand {
    List,
    Create { name: String, description: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShopCommand {
    List,
    Create(ShopForm),
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct ShopForm {
    pub name: String,
    pub desc: String,
    pub street: String,
    pub business_type: String,
    pub building_name: String,
    pub shop_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductCommand {
    List,
    Create(ProductForm),
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub quantity: u32,
    pub min_purchase: u32,
    pub description: String,
    pub brand: String,
    pub mkt_price: f64,
    pub selling_price: f64,
    pub size: String,
    pub colors: String,
    pub img: String,
    pub shop_id: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    Get { cart_id: String },
    Clear,
    RemoveItem { item_id: String },
    SetQuantity { item_id: String, quantity: u32 },
    AdjustQuantity { item_id: String, change: i64 },
}
