//! Account endpoints
//!
//! Balances, ledgers and transfers between the caller's own accounts.

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::pagination::DEFAULT_ITEMS_FIELD;
use crate::types::ApiRequest;
use kucoin_types::{generate_client_oid, AccountType};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Get account summary info (sub-account counts, limits)
    #[instrument(skip(self))]
    pub async fn summary(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v2/user-info")).await
    }

    /// List accounts
    ///
    /// # Arguments
    /// * `currency` - Filter by currency (optional)
    /// * `account_type` - Filter by account type (optional)
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        currency: Option<&str>,
        account_type: Option<AccountType>,
    ) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/accounts")
            .query_opt("currency", currency)
            .query_opt("type", account_type.map(|t| t.as_str()));
        self.client.execute(request).await
    }

    /// Get one account by ID
    #[instrument(skip(self))]
    pub async fn detail(&self, account_id: &str) -> RestResult<Value> {
        let id = path_segment("accountId", account_id)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/accounts/{}", id)))
            .await
    }

    fn ledgers_request(currency: Option<&str>, account_type: Option<AccountType>) -> ApiRequest {
        ApiRequest::get("/api/v1/accounts/ledgers")
            .query_opt("currency", currency)
            .query_opt("type", account_type.map(|t| t.as_str()))
    }

    /// Get the first page of account ledgers
    #[instrument(skip(self))]
    pub async fn ledgers(
        &self,
        currency: Option<&str>,
        account_type: Option<AccountType>,
    ) -> RestResult<Value> {
        self.client
            .execute(Self::ledgers_request(currency, account_type))
            .await
    }

    /// Get every ledger entry, following pagination
    #[instrument(skip(self))]
    pub async fn all_ledgers(
        &self,
        currency: Option<&str>,
        account_type: Option<AccountType>,
    ) -> RestResult<Vec<Value>> {
        self.client
            .fetch_all_pages(Self::ledgers_request(currency, account_type), DEFAULT_ITEMS_FIELD)
            .await
    }

    /// Get the transferable balance of a currency in one account
    #[instrument(skip(self))]
    pub async fn transferable(&self, currency: &str, account_type: AccountType) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/accounts/transferable")
            .query("currency", required("currency", currency)?)
            .query("type", account_type.as_str());
        self.client.execute(request).await
    }

    /// Transfer between the caller's own accounts
    #[instrument(skip(self))]
    pub async fn inner_transfer(
        &self,
        currency: &str,
        from: AccountType,
        to: AccountType,
        amount: Decimal,
    ) -> RestResult<Value> {
        self.transfer("/api/v2/accounts/inner-transfer", currency, from, to, amount)
            .await
    }

    /// Flex (universal) transfer between account types
    #[instrument(skip(self))]
    pub async fn flex_transfer(
        &self,
        currency: &str,
        from: AccountType,
        to: AccountType,
        amount: Decimal,
    ) -> RestResult<Value> {
        self.transfer("/api/v3/accounts/universal-transfer", currency, from, to, amount)
            .await
    }

    async fn transfer(
        &self,
        path: &str,
        currency: &str,
        from: AccountType,
        to: AccountType,
        amount: Decimal,
    ) -> RestResult<Value> {
        let body = json!({
            "clientOid": generate_client_oid(),
            "currency": required("currency", currency)?,
            "from": from,
            "to": to,
            "amount": amount,
        });
        self.client
            .execute(ApiRequest::post(path).json_body(&body)?)
            .await
    }
}
