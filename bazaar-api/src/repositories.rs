use crate::endpoints::{
    auth::{Login, Logout, RefreshToken, VerifyOtp},
    cart::{ClearCart, GetCart, RemoveCartItem, UpdateCartItem},
    categories::{CreateCategory, ListCategories},
    products::{CreateProduct, ListProducts},
    shops::{CreateShop, ListShops},
    users::{GetUser, ListUsers, RegisterUser, Role, UpdateUser},
};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn login(&self, phone: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(phone, password)
    }

    pub fn logout(&self, refresh_token: Option<String>) -> Logout {
        Logout::new(refresh_token)
    }

    pub fn refresh(&self, user_id: Option<String>, refresh_token: Option<String>) -> RefreshToken {
        RefreshToken::new(user_id, refresh_token)
    }

    pub fn verify_otp(&self, phone: impl Into<String>, otp: impl Into<String>) -> VerifyOtp {
        VerifyOtp::new(phone, otp)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListUsers {
        ListUsers::new()
    }

    pub fn get(&self, id: impl Into<String>) -> GetUser {
        GetUser::new(id)
    }

    pub fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
        role: Role,
    ) -> RegisterUser {
        RegisterUser::new(username, password, phone, role)
    }

    pub fn update(&self, id: impl Into<String>) -> UpdateUser {
        UpdateUser::new(id)
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListCategories {
        ListCategories::new()
    }

    pub fn create(&self, name: impl Into<String>, description: impl Into<String>) -> CreateCategory {
        CreateCategory::new(name, description)
    }
}

pub struct ShopRepository;

impl ShopRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListShops {
        ListShops::new()
    }

    pub fn create(&self, user_id: impl Into<String>) -> CreateShop {
        CreateShop::new(user_id)
    }
}

pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListProducts {
        ListProducts::new()
    }

    pub fn create(&self, name: impl Into<String>) -> CreateProduct {
        CreateProduct::new(name)
    }
}

#[derive(Default)]
pub struct CartRepository {
    cart_id: String,
}

impl CartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cart(mut self, cart_id: impl Into<String>) -> Self {
        self.cart_id = cart_id.into();
        self
    }

    pub fn get(&self) -> GetCart {
        GetCart::new(self.cart_id.clone())
    }

    pub fn clear(&self) -> ClearCart {
        ClearCart::new(self.cart_id.clone())
    }

    pub fn items(&self) -> CartItemRepository {
        CartItemRepository::new()
    }
}

pub struct CartItemRepository;

impl CartItemRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn update(&self, cart_item_id: impl Into<String>, quantity: u32) -> UpdateCartItem {
        UpdateCartItem::new(cart_item_id, quantity)
    }

    pub fn remove(&self, cart_item_id: impl Into<String>) -> RemoveCartItem {
        RemoveCartItem::new(cart_item_id)
    }
}
