//! HTTP client for the monitoring-checks server.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::types::{CheckDraft, CheckId, CheckSummary};

/// What the pages need from the server. The real implementation is
/// [`HttpApi`]; tests substitute recording fakes.
pub trait CheckApi {
    fn list_checks(&self) -> Result<Vec<CheckSummary>>;
    fn fetch_check(&self, id: CheckId) -> Result<CheckDraft>;
    /// Returns the server-assigned identifier for the new check.
    fn create_check(&self, draft: &CheckDraft) -> Result<CheckId>;
    /// The update response body is logged and otherwise discarded.
    fn update_check(&self, draft: &CheckDraft) -> Result<()>;
}

pub struct HttpApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpApi {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("server returned HTTP {status} for {path}");
        }

        response
            .json()
            .with_context(|| format!("malformed JSON response from {path}"))
    }

    fn post_draft(&self, path: &str, draft: &CheckDraft) -> Result<Value> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("server returned HTTP {status} for {path}");
        }

        response
            .json()
            .with_context(|| format!("malformed JSON response from {path}"))
    }
}

impl CheckApi for HttpApi {
    fn list_checks(&self) -> Result<Vec<CheckSummary>> {
        let body = self.get_json("checks")?;
        serde_json::from_value(body).context("malformed check list from server")
    }

    fn fetch_check(&self, id: CheckId) -> Result<CheckDraft> {
        let body = self.get_json(&format!("checks/{id}"))?;
        Ok(CheckDraft::from_wire(&body))
    }

    fn create_check(&self, draft: &CheckDraft) -> Result<CheckId> {
        let body = self.post_draft("add/save", draft)?;
        let id = parse_assigned_id(&body)
            .with_context(|| format!("creation response carries no usable `_id`: {body}"))?;
        debug!(%id, "server assigned check id");
        Ok(id)
    }

    fn update_check(&self, draft: &CheckDraft) -> Result<()> {
        let body = self.post_draft("edit/save", draft)?;
        debug!(response = %body, "update acknowledged");
        Ok(())
    }
}

/// The `_id` field of a creation response, tolerating number or string form.
fn parse_assigned_id(body: &Value) -> Option<CheckId> {
    match body.get("_id")? {
        Value::Number(number) => number.as_i64().map(CheckId),
        Value::String(text) => text.trim().parse().ok().map(CheckId),
        _ => None,
    }
}
