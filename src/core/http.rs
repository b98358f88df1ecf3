use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::CardsmithError;

/// `None` leaves requests unbounded, which is what a batch waiting on image
/// generation usually wants.
pub fn http_client(timeout: Option<Duration>) -> Result<Client, CardsmithError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| CardsmithError::Custom(format!("HTTP client build failed: {e}")))
}

/// Downloads `url` fully into memory. An error status or an empty body is a fetch failure.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, CardsmithError> {
    let resp = client.get(url).header(USER_AGENT, "cardsmith/0.1 (+reqwest)").send().await?;
    ensure_success(&resp)?;

    let bytes = resp.bytes().await?;
    if bytes.is_empty() {
        return Err(CardsmithError::Fetch(format!("Image response is empty for {url}")));
    }
    Ok(bytes.to_vec())
}

fn ensure_success(resp: &Response) -> Result<(), CardsmithError> {
    if !resp.status().is_success() {
        return Err(CardsmithError::Fetch(format!(
            "HTTP error {} from {}",
            resp.status(),
            resp.url()
        )));
    }
    Ok(())
}
