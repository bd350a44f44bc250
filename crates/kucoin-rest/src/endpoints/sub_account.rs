//! Sub-account endpoints

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::types::ApiRequest;
use kucoin_types::{generate_client_oid, TransferDirection};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Sub-account endpoints
pub struct SubAccountEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> SubAccountEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// List sub-accounts (first page)
    #[instrument(skip(self))]
    pub async fn list(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v2/sub/user")).await
    }

    /// Create a sub-account
    #[instrument(skip(self, password))]
    pub async fn create(&self, sub_name: &str, password: &str) -> RestResult<Value> {
        let body = json!({
            "password": required("password", password)?,
            "subName": required("subName", sub_name)?,
        });
        self.client
            .execute(ApiRequest::post("/api/v2/sub/user/created").json_body(&body)?)
            .await
    }

    /// Balances of one sub-account
    #[instrument(skip(self))]
    pub async fn balance(&self, sub_user_id: &str) -> RestResult<Value> {
        let id = path_segment("subUserId", sub_user_id)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/sub-accounts/{}", id)))
            .await
    }

    /// Move funds between the master account and a sub-account
    ///
    /// `Out` sends from the master, `In` pulls back into it.
    #[instrument(skip(self))]
    pub async fn transfer(
        &self,
        sub_user_id: &str,
        currency: &str,
        amount: Decimal,
        direction: TransferDirection,
    ) -> RestResult<Value> {
        let body = json!({
            "clientOid": generate_client_oid(),
            "currency": required("currency", currency)?,
            "amount": amount,
            "direction": direction,
            "subUserId": required("subUserId", sub_user_id)?,
        });
        self.client
            .execute(ApiRequest::post("/api/v2/accounts/sub-transfer").json_body(&body)?)
            .await
    }
}
