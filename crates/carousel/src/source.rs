//! Where the carousel gets its content from.

use async_trait::async_trait;
use surprise_core::content::ActiveContent;

use crate::error::CarouselError;

/// A source of resolved active content.
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<ActiveContent, CarouselError>;
}

/// Fetches `GET {api_url}/api/v1/slides/active` with [`reqwest`].
pub struct HttpContentSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpContentSource {
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:3000`.
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/slides/active", self.api_url)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self) -> Result<ActiveContent, CarouselError> {
        let response = self.client.get(self.endpoint()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CarouselError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let content: ActiveContent = response.json().await?;
        if content.slides.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(content)
    }
}
