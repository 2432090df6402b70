/// Errors returned by the [`BundleSimulator`] client.
///
/// [`BundleSimulator`]: crate::BundleSimulator
#[derive(thiserror::Error, Debug)]
pub enum BundleApiError {
    /// An error occurred while building the endpoint URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// An error occurred while contacting the API.
    #[error("error contacting bundle API: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("bundle API returned {status}: {body}")]
    Status {
        /// The HTTP status.
        status: reqwest::StatusCode,
        /// The response body.
        body: String,
    },

    /// The response body was not a valid bundle response.
    #[error("malformed bundle API response: {source}")]
    Json {
        /// The decoding error.
        #[source]
        source: serde_json::Error,
        /// The response body.
        body: String,
    },

    /// The API returned a different number of results than simulations
    /// submitted.
    #[error("bundle API returned {received} results for {submitted} simulations")]
    LengthMismatch {
        /// Simulations submitted.
        submitted: usize,
        /// Results received.
        received: usize,
    },
}
