use bazaar_api::{ApiError, Client, MemoryCredentialStore, Request};
use std::sync::Arc;

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new(
        "http://localhost:3000/v1",
        Arc::new(MemoryCredentialStore::new()),
    )?;

    let req = Request::categories().list();

    let res = client.call(&req, None).await;
    println!("{}", serde_json::to_string_pretty(&res)?);
    Ok(())
}
