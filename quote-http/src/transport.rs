use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};
use url::Url;

use quote_core::submission::{FormTransport, Submission, TransportError};

/// Posts submissions to a form endpoint over HTTP.
///
/// Any 2xx status counts as acceptance. No timeout is applied beyond the
/// client's own connection error reporting.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for `endpoint`, which must be an absolute
    /// `http` or `https` URL.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            TransportError::Configuration(format!("invalid endpoint '{endpoint}': {e}"))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::Configuration(format!(
                "unsupported endpoint scheme '{}'",
                endpoint.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl FormTransport for HttpTransport {
    async fn post_form(
        &self,
        submission: &Submission,
    ) -> Result<(), TransportError> {
        debug!(endpoint = %self.endpoint, "posting form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, Submission::CONTENT_TYPE)
            .body(submission.encode())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "form endpoint unreachable");
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            info!(%status, "form accepted");
            Ok(())
        } else {
            warn!(%status, "form rejected");
            Err(TransportError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
