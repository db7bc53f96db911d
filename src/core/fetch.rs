use reqwest::Client;

/// 單次 GET，非 2xx 視為失敗，不重試
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    tracing::debug!("Making HTTP request to: {}", url);
    let response = client.get(url).send().await?;
    tracing::debug!("HTTP response status: {}", response.status());

    let body = response.error_for_status()?.bytes().await?;
    tracing::info!("📥 Downloaded {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}
