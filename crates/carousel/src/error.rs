/// Errors from fetching carousel content.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Content API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API answered 2xx with a payload that has no slides.
    #[error("Content API returned no slides")]
    Empty,
}
