//! Graph list item client

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, warn};

use ev_core::domain::entities::VerificationRecord;
use ev_core::domain::value_objects::{AccessToken, PatchOutcome, Precondition, RecordFilter, RecordPatch};
use ev_core::errors::StoreError;
use ev_shared::StoreConfig;

use super::dto::ListItemsResponse;
use super::odata::render_filter;
use crate::{send_error, truncate_body};

const PREFER_NON_INDEXED: &str = "HonorNonIndexedQueriesWarningMayFailRandomly";

/// Reads and patches items of the configured verification list
pub struct GraphListClient {
    http: Client,
    config: StoreConfig,
}

impl GraphListClient {
    pub fn new(http: Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    /// `GET …/items?$expand=fields&$filter=…`
    pub async fn query_items(
        &self,
        token: &AccessToken,
        filter: &RecordFilter,
    ) -> Result<Vec<VerificationRecord>, StoreError> {
        let odata_filter = render_filter(filter);
        debug!(filter = %odata_filter, "Querying verification list");

        let mut request = self
            .http
            .get(self.config.items_url())
            .bearer_auth(token.secret())
            .header(header::ACCEPT, "application/json")
            .query(&[("$expand", "fields"), ("$filter", odata_filter.as_str())]);

        if self.config.honor_non_indexed_queries {
            request = request.header("Prefer", PREFER_NON_INDEXED);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "List query could not be sent");
            send_error("list query", e)
        })?;

        let response = Self::ensure_success(response, "list query").await?;

        let items: ListItemsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::decode(format!("list items: {}", e)))?;

        debug!(matches = items.value.len(), "List query returned");

        Ok(items.value.into_iter().map(VerificationRecord::from).collect())
    }

    /// `PATCH …/items/{id}/fields`, optionally guarded by `If-Match`
    pub async fn patch_fields(
        &self,
        token: &AccessToken,
        item_id: &str,
        patch: &RecordPatch,
        precondition: Precondition,
    ) -> Result<PatchOutcome, StoreError> {
        debug!(item_id = item_id, status = %patch.status, "Patching list item fields");

        let mut request = self
            .http
            .patch(self.config.item_fields_url(item_id))
            .bearer_auth(token.secret())
            .json(patch);

        if let Precondition::IfMatch(etag) = &precondition {
            request = request.header(header::IF_MATCH, etag.as_str());
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, item_id = item_id, "List item patch could not be sent");
            send_error("item patch", e)
        })?;

        if response.status() == StatusCode::PRECONDITION_FAILED
            && matches!(precondition, Precondition::IfMatch(_))
        {
            warn!(item_id = item_id, "List item changed since it was read");
            return Ok(PatchOutcome::PreconditionFailed);
        }

        Self::ensure_success(response, "item patch").await?;
        Ok(PatchOutcome::Applied)
    }

    async fn ensure_success(response: Response, operation: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = status.as_u16(),
            operation = operation,
            "List store returned an error status"
        );
        Err(StoreError::unexpected_status(
            status.as_u16(),
            format!("{}: {}", operation, truncate_body(&body)),
        ))
    }
}
