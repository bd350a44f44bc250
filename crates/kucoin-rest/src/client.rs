//! Main REST client implementation

use crate::endpoints::{
    AccountEndpoints, EarnEndpoints, FuturesAccountEndpoints, FuturesPositionEndpoints,
    FuturesTradingEndpoints, HfTradingEndpoints, LendingEndpoints, MarginEndpoints,
    MarketEndpoints, SpotTradingEndpoints, SubAccountEndpoints, UtilityEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::notice::LicenseNotice;
use crate::query::build_query_string;
use crate::request::assemble;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{ApiRequest, ApiResponse};
use kucoin_auth::Credentials;
use kucoin_types::Environment;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("kucoin-rest/", env!("CARGO_PKG_VERSION"));

/// KuCoin REST API client
///
/// Every call is signed; cloning is cheap and clones share the transport.
///
/// # Example
///
/// ```no_run
/// use kucoin_rest::{ApiRequest, KuCoinRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KuCoinRestClient::from_env()?;
///
///     // Typed endpoint
///     let accounts = client.account().list(Some("USDT"), None).await?;
///
///     // Any endpoint
///     let fills = client
///         .execute(ApiRequest::get("/api/v1/fills").query("symbol", "BTC-USDT"))
///         .await?;
///
///     println!("{} {}", accounts, fills);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KuCoinRestClient {
    credentials: Arc<Credentials>,
    transport: Arc<dyn HttpTransport>,
    notice: Arc<LicenseNotice>,
}

impl KuCoinRestClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new(credentials))
    }

    /// Create a client from `KUCOIN_*` environment variables
    pub fn from_env() -> RestResult<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs), user_agent)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    ///
    /// `timeout_secs` and `user_agent` are left to the transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        info!(environment = %config.credentials.environment(), "Created KuCoin REST client");

        Self {
            credentials: Arc::new(config.credentials),
            transport,
            notice: Arc::new(LicenseNotice::new(config.license_notice)),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> Environment {
        self.credentials.environment()
    }

    /// Execute one signed request and unwrap the response envelope
    ///
    /// Returns `data` on success, or the whole envelope when `data` is
    /// absent. Bare arrays and objects are returned as they are.
    ///
    /// # Errors
    /// * [`RestError::Business`] - `code` present and not `200000`
    /// * [`RestError::Transport`] - non-2xx status or no response
    /// * [`RestError::Parse`] - 2xx body that is not a known shape
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> RestResult<Value> {
        request.validate()?;
        let path = format!("{}{}", request.path, build_query_string(&request.query));

        self.notice.log_once();
        let signed = assemble(
            &self.credentials,
            request.method,
            &path,
            request.body.as_ref(),
            request.family,
        )?;

        debug!(family = request.family.as_str(), "Sending request");
        let response = self.transport.send(signed).await?;

        if !response.is_success() {
            return Err(RestError::from_http_status(response.status, &response.body));
        }

        ApiResponse::decode(&response.body)?.into_data()
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Account balances, ledgers and internal transfers
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    pub fn sub_account(&self) -> SubAccountEndpoints<'_> {
        SubAccountEndpoints::new(self)
    }

    /// Classic spot orders
    pub fn spot(&self) -> SpotTradingEndpoints<'_> {
        SpotTradingEndpoints::new(self)
    }

    /// High-frequency spot orders
    pub fn hf(&self) -> HfTradingEndpoints<'_> {
        HfTradingEndpoints::new(self)
    }

    pub fn margin(&self) -> MarginEndpoints<'_> {
        MarginEndpoints::new(self)
    }

    pub fn lending(&self) -> LendingEndpoints<'_> {
        LendingEndpoints::new(self)
    }

    /// Market data
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Futures contracts and orders
    pub fn futures(&self) -> FuturesTradingEndpoints<'_> {
        FuturesTradingEndpoints::new(self)
    }

    pub fn futures_position(&self) -> FuturesPositionEndpoints<'_> {
        FuturesPositionEndpoints::new(self)
    }

    pub fn futures_account(&self) -> FuturesAccountEndpoints<'_> {
        FuturesAccountEndpoints::new(self)
    }

    pub fn earn(&self) -> EarnEndpoints<'_> {
        EarnEndpoints::new(self)
    }

    /// Server time, service status and announcements
    pub fn utility(&self) -> UtilityEndpoints<'_> {
        UtilityEndpoints::new(self)
    }
}

impl std::fmt::Debug for KuCoinRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KuCoinRestClient")
            .field("credentials", &self.credentials)
            .field("notice_logged", &self.notice.is_logged())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Log the license notice on first use
    pub license_notice: bool,
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            license_notice: true,
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Turn the license notice off
    pub fn without_license_notice(mut self) -> Self {
        self.license_notice = false;
        self
    }
}
