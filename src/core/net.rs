use url::Url;

use crate::core::{CapClient, CapError};

/// Fetch a page and return its body as text, mapping non-2xx statuses to
/// [`CapError::Status`].
pub(crate) async fn fetch_text(client: &CapClient, url: Url) -> Result<String, CapError> {
    let resp = client.http().get(url).send().await?;
    if !resp.status().is_success() {
        return Err(CapError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp.text().await?)
}
