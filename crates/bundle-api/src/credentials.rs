use shortcut_types::config::{env_utils, ConfigError};
use url::Url;

/// Environment variable holding the API access key.
pub const TENDERLY_ACCESS_KEY: &str = "TENDERLY_ACCESS_KEY";
/// Environment variable holding the project slug.
pub const TENDERLY_PROJECT: &str = "TENDERLY_PROJECT";
/// Environment variable holding the account slug.
pub const TENDERLY_USER: &str = "TENDERLY_USER";
/// Optional environment variable overriding the API base URL.
pub const TENDERLY_API_URL: &str = "TENDERLY_API_URL";

/// The default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.tenderly.co";

/// Credentials for the bundle simulation API: an access key and the
/// account/project pair the simulations are filed under.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    access_key: String,
    project: String,
    user: String,
    api_url: Url,
}

impl core::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("access_key", &"<redacted>")
            .field("project", &self.project)
            .field("user", &self.user)
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl ApiCredentials {
    /// Create credentials against the default API URL.
    pub fn new(
        access_key: impl Into<String>,
        project: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_url =
            Url::parse(DEFAULT_API_URL).map_err(|e| ConfigError::invalid(TENDERLY_API_URL, e))?;
        Ok(Self::with_url(access_key, project, user, api_url))
    }

    /// Create credentials against a specific API URL.
    pub fn with_url(
        access_key: impl Into<String>,
        project: impl Into<String>,
        user: impl Into<String>,
        api_url: Url,
    ) -> Self {
        Self { access_key: access_key.into(), project: project.into(), user: user.into(), api_url }
    }

    /// Load the credentials from the environment.
    ///
    /// # Errors
    ///
    /// Fails if any of [`TENDERLY_ACCESS_KEY`], [`TENDERLY_PROJECT`] or
    /// [`TENDERLY_USER`] is unset or empty, or if [`TENDERLY_API_URL`] is set
    /// but is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_key = env_utils::load_string(TENDERLY_ACCESS_KEY)?;
        let project = env_utils::load_string(TENDERLY_PROJECT)?;
        let user = env_utils::load_string(TENDERLY_USER)?;

        let api_url = env_utils::load_string_opt(TENDERLY_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = Url::parse(&api_url).map_err(|e| ConfigError::invalid(TENDERLY_API_URL, e))?;

        Ok(Self::with_url(access_key, project, user, api_url))
    }

    /// The access key, sent in the `X-Access-Key` header.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The project slug.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The account slug.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The API base URL.
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The bundle simulation endpoint.
    pub fn simulate_bundle_url(&self) -> Result<Url, url::ParseError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend([
                "api",
                "v1",
                "account",
                self.user.as_str(),
                "project",
                self.project.as_str(),
                "simulate-bundle",
            ]);
        Ok(url)
    }
}
