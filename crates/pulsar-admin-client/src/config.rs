use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WEB_SERVICE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration of the admin client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Web service URL of the broker or proxy
    pub web_service_url: String,
    /// Bearer token sent with every request (if any)
    pub auth_token: Option<String>,
    pub tls: TlsConfig,
    /// API version to use per resource
    pub api_profile: ApiProfile,
    /// Timeout applied to each HTTP round trip
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            web_service_url: DEFAULT_WEB_SERVICE_URL.to_string(),
            auth_token: None,
            tls: TlsConfig::default(),
            api_profile: ApiProfile::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// PEM file with additional trusted CA certificates
    pub trust_certs_file_path: Option<PathBuf>,
    /// Accept any server certificate
    pub allow_insecure_connection: bool,
    pub enable_hostname_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            trust_certs_file_path: None,
            allow_insecure_connection: false,
            enable_hostname_verification: true,
        }
    }
}

/// Admin REST API version.
///
/// `V1` has no version segment in the path (`/admin/<resource>`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
    V3,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "",
            ApiVersion::V2 => "v2",
            ApiVersion::V3 => "v3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API version used for each admin resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiProfile {
    pub tenants: ApiVersion,
    pub topics: ApiVersion,
    pub sinks: ApiVersion,
    pub sources: ApiVersion,
    pub broker_stats: ApiVersion,
    pub resource_quotas: ApiVersion,
}

impl Default for ApiProfile {
    fn default() -> Self {
        Self {
            tenants: ApiVersion::V2,
            topics: ApiVersion::V2,
            // Connectors are served by the functions worker under v3
            sinks: ApiVersion::V3,
            sources: ApiVersion::V3,
            broker_stats: ApiVersion::V2,
            resource_quotas: ApiVersion::V2,
        }
    }
}
