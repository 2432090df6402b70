use crate::{
    ApiCredentials, BundleApiError, BundleRequest, BundleResponse, BundleTransport, SimulationKind,
};
use tracing::{debug, instrument, warn};

/// Header carrying the access key.
const ACCESS_KEY_HEADER: &str = "X-Access-Key";

/// HTTP client for the bundle simulation API.
///
/// Posts a [`BundleRequest`] to the `simulate-bundle` endpoint and checks that
/// the response carries one result per simulation.
#[derive(Debug, Clone)]
pub struct BundleSimulator {
    /// API credentials.
    credentials: ApiCredentials,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// Persist successful simulations.
    save: bool,
    /// Persist failed simulations.
    save_if_fails: bool,
    /// Simulation detail.
    kind: SimulationKind,
}

impl BundleSimulator {
    /// Create a new simulator with the given credentials and client.
    pub const fn new_with_client(credentials: ApiCredentials, client: reqwest::Client) -> Self {
        Self { credentials, client, save: false, save_if_fails: false, kind: SimulationKind::Quick }
    }

    /// Create a new simulator with the given credentials and a new reqwest
    /// client.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self::new_with_client(credentials, reqwest::Client::new())
    }

    /// Persist simulations on the API side.
    pub const fn save(mut self, on_success: bool, on_failure: bool) -> Self {
        self.save = on_success;
        self.save_if_fails = on_failure;
        self
    }

    /// Set the simulation detail.
    pub const fn with_kind(mut self, kind: SimulationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Get the credentials.
    pub const fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Submit a bundle and return the results in submission order.
    #[instrument(skip_all, fields(simulations = bundle.len()))]
    pub async fn simulate(
        &self,
        mut bundle: BundleRequest,
    ) -> Result<BundleResponse, BundleApiError> {
        for sim in bundle.simulations.iter_mut() {
            sim.save = self.save;
            sim.save_if_fails = self.save_if_fails;
            sim.simulation_type = self.kind;
        }
        let submitted = bundle.len();

        let url = self
            .credentials
            .simulate_bundle_url()
            .inspect_err(|e| warn!(%e, "Failed to build URL. Not submitting bundle."))?;

        let response = self
            .client
            .post(url)
            .header(ACCESS_KEY_HEADER, self.credentials.access_key())
            .json(&bundle)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to submit bundle"))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, "Bundle API returned an error");
            return Err(BundleApiError::Status { status, body });
        }

        let response: BundleResponse = serde_json::from_str(&body).map_err(|source| {
            warn!(%source, "Failed to parse response from bundle API");
            BundleApiError::Json { source, body }
        })?;

        let received = response.simulation_results.len();
        if received != submitted {
            return Err(BundleApiError::LengthMismatch { submitted, received });
        }
        debug!(received, "Bundle simulated");

        Ok(response)
    }
}

impl BundleTransport for BundleSimulator {
    async fn simulate_bundle(
        &self,
        bundle: BundleRequest,
    ) -> Result<BundleResponse, BundleApiError> {
        self.simulate(bundle).await
    }
}
