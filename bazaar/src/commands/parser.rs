use crate::events::*;
use bazaar_api::{Method, RawRequest};
use std::collections::HashMap;

/// Parse one console line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // Raw requests carry a JSON body that must not go through the tokenizer
    if let Some(("send", rest)) = next_word(line) {
        return parse_send(rest).map(Some);
    }

    let tokens = tokenize(line)?;
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    let command = match words.as_slice() {
        ["help"] | ["?"] => Command::Help,
        ["routes"] => Command::Routes,
        ["session"] => Command::Session,
        ["quit"] | ["exit"] | ["q"] => Command::Quit,

        ["login", args @ ..] => Command::Auth(parse_login(args)?),
        ["logout"] => Command::Auth(AuthCommand::Logout),
        ["auth", "login", args @ ..] => Command::Auth(parse_login(args)?),
        ["auth", "logout"] => Command::Auth(AuthCommand::Logout),
        ["auth", "refresh"] => Command::Auth(AuthCommand::Refresh),
        ["auth", "verify-otp", phone, otp] => Command::Auth(AuthCommand::VerifyOtp {
            phone: phone.to_string(),
            otp: otp.to_string(),
        }),

        ["users", "get"] => Command::Users(UserCommand::Get { id: None }),
        ["users", "get", id] => Command::Users(UserCommand::Get {
            id: Some(id.to_string()),
        }),
        ["users", "list", args @ ..] => Command::Users(parse_user_list(args)?),
        ["users", "register", args @ ..] => {
            Command::Users(UserCommand::Register(parse_user_form(args, true)?))
        }
        ["users", "update", args @ ..] => {
            Command::Users(UserCommand::Update(parse_user_form(args, false)?))
        }

        ["categories", "list"] => Command::Categories(CategoryCommand::List),
        ["categories", "create", args @ ..] => {
            let mut fields = parse_fields(args, &["name", "description"])?;
            Command::Categories(CategoryCommand::Create {
                name: fields.remove("name").unwrap_or_default(),
                description: fields.remove("description").unwrap_or_default(),
            })
        }

        ["shops", "list"] => Command::Shops(ShopCommand::List),
        ["shops", "create", args @ ..] => Command::Shops(ShopCommand::Create(parse_shop_form(args)?)),

        ["products", "list"] => Command::Products(ProductCommand::List),
        ["products", "create", args @ ..] => {
            Command::Products(ProductCommand::Create(parse_product_form(args)?))
        }

        ["cart", "get", cart_id] => Command::Cart(CartCommand::Get {
            cart_id: cart_id.to_string(),
        }),
        ["cart", "clear"] => Command::Cart(CartCommand::Clear),
        ["cart", "remove", item_id] => Command::Cart(CartCommand::RemoveItem {
            item_id: item_id.to_string(),
        }),
        ["cart", "set", item_id, quantity] => Command::Cart(CartCommand::SetQuantity {
            item_id: item_id.to_string(),
            quantity: parse_number("quantity", quantity)?,
        }),
        ["cart", "inc", item_id] => Command::Cart(CartCommand::AdjustQuantity {
            item_id: item_id.to_string(),
            change: 1,
        }),
        ["cart", "dec", item_id] => Command::Cart(CartCommand::AdjustQuantity {
            item_id: item_id.to_string(),
            change: -1,
        }),

        [first, ..] => {
            return Err(format!(
                "Unrecognized command '{}'. Type 'help' for usage.",
                first
            ))
        }
        [] => return Ok(None),
    };

    Ok(Some(command))
}

fn parse_login(args: &[&str]) -> Result<AuthCommand, String> {
    match args {
        [phone, password] => Ok(AuthCommand::Login {
            phone: phone.to_string(),
            password: password.to_string(),
        }),
        _ => Err("Usage: login <phone> <password>".to_string()),
    }
}

fn parse_user_list(args: &[&str]) -> Result<UserCommand, String> {
    let (page, limit) = match args {
        [] => (1, 10),
        [page] => (parse_number("page", page)?, 10),
        [page, limit] => (parse_number("page", page)?, parse_number("limit", limit)?),
        _ => return Err("Usage: users list [page] [limit]".to_string()),
    };
    Ok(UserCommand::List { page, limit })
}

fn parse_user_form(args: &[&str], with_password: bool) -> Result<UserForm, String> {
    let allowed: &[&str] = if with_password {
        &["username", "password", "phone", "role"]
    } else {
        &["username", "phone", "role"]
    };
    let mut fields = parse_fields(args, allowed)?;

    Ok(UserForm {
        username: fields.remove("username").unwrap_or_default(),
        password: fields.remove("password").unwrap_or_default(),
        phone: fields.remove("phone").unwrap_or_default(),
        role: fields.remove("role").unwrap_or_default(),
    })
}

fn parse_shop_form(args: &[&str]) -> Result<ShopForm, String> {
    let mut fields = parse_fields(
        args,
        &[
            "name",
            "desc",
            "street",
            "businessType",
            "buildingName",
            "shopNumber",
        ],
    )?;

    Ok(ShopForm {
        name: fields.remove("name").unwrap_or_default(),
        desc: fields.remove("desc").unwrap_or_default(),
        street: fields.remove("street").unwrap_or_default(),
        business_type: fields.remove("businessType").unwrap_or_default(),
        building_name: fields.remove("buildingName").unwrap_or_default(),
        shop_number: fields.remove("shopNumber").unwrap_or_default(),
    })
}

fn parse_product_form(args: &[&str]) -> Result<ProductForm, String> {
    let mut fields = parse_fields(
        args,
        &[
            "name",
            "quantity",
            "minPurchase",
            "description",
            "brand",
            "mktPrice",
            "sellingPrice",
            "size",
            "colors",
            "img",
            "shopId",
            "categoryId",
        ],
    )?;

    Ok(ProductForm {
        quantity: optional_number("quantity", fields.remove("quantity"))?,
        min_purchase: optional_number("minPurchase", fields.remove("minPurchase"))?,
        mkt_price: optional_number("mktPrice", fields.remove("mktPrice"))?,
        selling_price: optional_number("sellingPrice", fields.remove("sellingPrice"))?,
        category_id: optional_number("categoryId", fields.remove("categoryId"))?,
        name: fields.remove("name").unwrap_or_default(),
        description: fields.remove("description").unwrap_or_default(),
        brand: fields.remove("brand").unwrap_or_default(),
        size: fields.remove("size").unwrap_or_default(),
        colors: fields.remove("colors").unwrap_or_default(),
        img: fields.remove("img").unwrap_or_default(),
        shop_id: fields.remove("shopId").unwrap_or_default(),
    })
}

/// `send <METHOD> <endpoint> [--token <token>] [json body]`
fn parse_send(rest: &str) -> Result<Command, String> {
    const USAGE: &str = "Usage: send <METHOD> <endpoint> [--token <token>] [json body]";

    let (method, rest) = next_word(rest).ok_or(USAGE)?;
    let method: Method = method.parse()?;
    let (endpoint, mut rest) = next_word(rest).ok_or(USAGE)?;
    if !endpoint.starts_with('/') {
        return Err(format!("Endpoint must start with '/': {}", endpoint));
    }

    let mut request = RawRequest::new(method, endpoint);

    if let Some(("--token", after)) = next_word(rest) {
        let (token, after) = next_word(after).ok_or(USAGE)?;
        request = request.token(token);
        rest = after;
    }

    let body = rest.trim();
    if !body.is_empty() {
        let body = serde_json::from_str(body).map_err(|e| format!("Invalid JSON body: {}", e))?;
        request = request.body(body);
    }

    Ok(Command::Send(request))
}

fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if has_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Parse `key=value` arguments, rejecting keys outside `allowed`.
fn parse_fields(args: &[&str], allowed: &[&str]) -> Result<HashMap<String, String>, String> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{}'", arg))?;
            if !allowed.contains(&key) {
                return Err(format!(
                    "Unknown field '{}' (expected one of: {})",
                    key,
                    allowed.join(", ")
                ));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{} must be a number, got '{}'", name, value))
}

fn optional_number<T: std::str::FromStr + Default>(
    name: &str,
    value: Option<String>,
) -> Result<T, String> {
    match value {
        Some(value) => parse_number(name, &value),
        None => Ok(T::default()),
    }
}
