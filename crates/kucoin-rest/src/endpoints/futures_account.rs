//! Futures account endpoints
//!
//! Overview, transaction history and transfers between the futures and
//! spot accounts.

use crate::client::KuCoinRestClient;
use crate::endpoints::required;
use crate::error::RestResult;
use crate::types::ApiRequest;
use chrono::{DateTime, Utc};
use kucoin_types::{generate_client_oid, AccountType};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Futures account endpoints
pub struct FuturesAccountEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> FuturesAccountEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Account overview, USDT unless a settlement currency is given
    #[instrument(skip(self))]
    pub async fn overview(&self, currency: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/account-overview")
            .query_opt("currency", currency)
            .futures();
        self.client.execute(request).await
    }

    /// Transaction history
    ///
    /// # Arguments
    /// * `start` / `end` - Time bounds, sent in milliseconds
    /// * `kind` - e.g. `RealisedPNL`, `Deposit`, `Withdrawal`, `TransferIn`
    /// * `currency` - Settlement currency filter
    #[instrument(skip(self))]
    pub async fn transaction_history(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        kind: Option<&str>,
        currency: Option<&str>,
    ) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/transaction-history")
            .query_opt("startAt", start.map(|t| t.timestamp_millis()))
            .query_opt("endAt", end.map(|t| t.timestamp_millis()))
            .query_opt("type", kind)
            .query_opt("currency", currency)
            .futures();
        self.client.execute(request).await
    }

    /// Move funds out of the futures account
    ///
    /// `recipient` is the spot-side account receiving the funds.
    #[instrument(skip(self))]
    pub async fn transfer_out(
        &self,
        currency: &str,
        amount: Decimal,
        recipient: AccountType,
    ) -> RestResult<Value> {
        let body = json!({
            "bizNo": generate_client_oid(),
            "amount": amount,
            "currency": required("currency", currency)?,
            "recAccountType": recipient.as_str().to_uppercase(),
        });
        let request = ApiRequest::post("/api/v3/transfer-out").json_body(&body)?.futures();
        self.client.execute(request).await
    }

    /// Move funds into the futures account
    ///
    /// `payer` is the spot-side account funding the transfer.
    #[instrument(skip(self))]
    pub async fn transfer_in(&self, currency: &str, amount: Decimal, payer: AccountType) -> RestResult<Value> {
        let body = json!({
            "amount": amount,
            "currency": required("currency", currency)?,
            "payAccountType": payer.as_str().to_uppercase(),
        });
        let request = ApiRequest::post("/api/v1/transfer-in").json_body(&body)?.futures();
        self.client.execute(request).await
    }

    /// Transfer-out records
    #[instrument(skip(self))]
    pub async fn transfer_records(&self, currency: Option<&str>, status: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/transfer-list")
            .query_opt("currency", currency)
            .query_opt("status", status)
            .futures();
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use chrono::{TimeZone, Utc};
    use kucoin_types::AccountType;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_transaction_history_uses_milliseconds() {
        let (client, transport) = client_answering(json!({"dataList": []}));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        client
            .futures_account()
            .transaction_history(Some(start), None, Some("RealisedPNL"), None)
            .await
            .unwrap();
        assert_eq!(
            transport.requests()[0].path,
            "/api/v1/transaction-history?startAt=1704067200000&type=RealisedPNL"
        );
    }

    #[tokio::test]
    async fn test_transfer_out_body() {
        let (client, transport) = client_answering(json!({"applyId": "x"}));
        client
            .futures_account()
            .transfer_out("USDT", dec!(3.25), AccountType::Main)
            .await
            .unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.url, "https://api-futures.kucoin.com/api/v3/transfer-out");
        let body = sent_body(&transport);
        assert_eq!(body["amount"], "3.25");
        assert_eq!(body["recAccountType"], "MAIN");
        assert!(body["bizNo"].is_string());
    }

    #[tokio::test]
    async fn test_transfer_in_path_and_body() {
        let (client, transport) = client_answering(json!(null));
        client
            .futures_account()
            .transfer_in("USDT", dec!(10), AccountType::Trade)
            .await
            .unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.url, "https://api-futures.kucoin.com/api/v1/transfer-in");
        assert_eq!(
            sent_body(&transport),
            json!({"amount": "10", "currency": "USDT", "payAccountType": "TRADE"})
        );
    }

    #[tokio::test]
    async fn test_overview_default_currency() {
        let (client, transport) = client_answering(json!({"accountEquity": 1}));
        client.futures_account().overview(None).await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/account-overview");
    }
}
