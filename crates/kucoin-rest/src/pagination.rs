//! Page-numbered collection fetching
//!
//! KuCoin paginates with `currentPage` / `pageSize` query parameters and
//! answers with `{currentPage, pageSize, totalNum, totalPage, items}`.
//! Some endpoints ignore pagination and return a bare array.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::KuCoinRestClient;
use crate::error::{RestError, RestResult};
use crate::query::QueryParams;
use crate::types::ApiRequest;

/// Page size requested on every page
pub const PAGE_SIZE: u32 = 50;

/// List field read when the named field is absent
pub const DEFAULT_ITEMS_FIELD: &str = "items";

/// Cursor for one paginated fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page to request next
    pub current_page: u64,
    pub page_size: u32,
    /// `totalPage` from the last response
    pub total_pages: Option<u64>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            total_pages: None,
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `currentPage` and `pageSize` into the query
    pub fn apply(&self, query: &mut QueryParams) {
        query
            .set("currentPage", self.current_page)
            .set("pageSize", self.page_size);
    }

    /// Move past the page just fetched
    ///
    /// Returns `true` while another page remains.
    pub fn advance(&mut self, total_pages: Option<u64>) -> bool {
        self.total_pages = total_pages;
        self.current_page += 1;
        self.has_next()
    }

    pub fn has_next(&self) -> bool {
        matches!(self.total_pages, Some(total) if total > 0 && self.current_page <= total)
    }
}

/// One decoded page
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    /// Bare array; the endpoint is not paginated
    Sequence(Vec<Value>),
    /// Paginated object
    Page {
        items: Vec<Value>,
        total_pages: Option<u64>,
    },
}

impl PageData {
    /// Classify a response payload
    ///
    /// Reads the list from `field`, then from `items`. A `null` list is an
    /// empty page; an object with neither list is rejected.
    pub fn from_response(value: Value, field: &str) -> RestResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::Sequence(items)),
            Value::Object(mut map) => {
                let total_pages = map.get("totalPage").and_then(read_count);
                let candidates = [field, DEFAULT_ITEMS_FIELD];
                let names = if field == DEFAULT_ITEMS_FIELD {
                    &candidates[..1]
                } else {
                    &candidates[..]
                };
                let mut saw_null = false;
                let mut found = None;
                for name in names {
                    match map.remove(*name) {
                        Some(Value::Array(items)) => {
                            found = Some(items);
                            break;
                        }
                        Some(Value::Null) => saw_null = true,
                        _ => {}
                    }
                }
                // A null list is an empty page
                let items = match found {
                    Some(items) => items,
                    None if saw_null => Vec::new(),
                    None => {
                        return Err(RestError::UnexpectedShape(format!(
                            "no list under {}",
                            names
                                .iter()
                                .map(|name| format!("'{}'", name))
                                .collect::<Vec<_>>()
                                .join(" or ")
                        )))
                    }
                };
                Ok(Self::Page { items, total_pages })
            }
            other => Err(RestError::UnexpectedShape(format!(
                "expected a list or a page object, got {}",
                other
            ))),
        }
    }
}

/// Page counts arrive as numbers, occasionally as numeric strings
fn read_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl KuCoinRestClient {
    /// Fetch every page of a collection endpoint
    ///
    /// Requests pages 1, 2, … with `pageSize=50` until `totalPage` is
    /// reached, concatenating items in order. A bare array ends the loop
    /// after the first call.
    ///
    /// # Arguments
    /// * `request` - Base request; its query is copied, not modified
    /// * `field` - Name of the list field, `"items"` for most endpoints
    #[instrument(skip(self, request), fields(path = %request.path))]
    pub async fn fetch_all_pages(&self, request: ApiRequest, field: &str) -> RestResult<Vec<Value>> {
        let mut state = PageState::new();
        let mut collected = Vec::new();

        loop {
            let mut query = request.query.clone();
            state.apply(&mut query);
            let page = self.execute(request.clone().with_query(query)).await?;

            match PageData::from_response(page, field)? {
                PageData::Sequence(items) => {
                    collected.extend(items);
                    break;
                }
                PageData::Page { items, total_pages } => {
                    debug!(page = state.current_page, count = items.len(), ?total_pages, "Fetched page");
                    collected.extend(items);
                    if !state.advance(total_pages) {
                        break;
                    }
                }
            }
        }

        Ok(collected)
    }
}
