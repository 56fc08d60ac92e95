//! HTTP access to the `/usuarios/{id}/{receitas|despesas}` endpoints.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use web_sys::RequestCredentials;

use crate::error::GatewayError;
use crate::model::{NewRecord, Record, RecordKind};

/// Record storage as seen by the dashboard.
///
/// Futures are not `Send`: everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait RecordGateway {
    async fn list(&self, kind: RecordKind) -> Result<Vec<Record>, GatewayError>;

    async fn create(&self, kind: RecordKind, record: &NewRecord) -> Result<(), GatewayError>;

    async fn delete(&self, kind: RecordKind, id: i64) -> Result<(), GatewayError>;
}

pub fn records_url(base_url: &str, user_id: &str, kind: RecordKind) -> String {
    format!(
        "{}/usuarios/{}/{}",
        base_url.trim_end_matches('/'),
        user_id,
        kind.path()
    )
}

pub fn record_url(base_url: &str, user_id: &str, kind: RecordKind, id: i64) -> String {
    format!("{}/{}", records_url(base_url, user_id, kind), id)
}

/// Talks to the real API. Every request carries the browser's cookies.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpGateway {
    base_url: String,
    user_id: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
        }
    }
}

fn network_error(url: &str, err: gloo_net::Error) -> GatewayError {
    GatewayError::Network {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

fn ensure_ok(url: &str, resp: Response) -> Result<Response, GatewayError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(GatewayError::Status {
            url: url.to_string(),
            status: resp.status(),
        })
    }
}

#[async_trait(?Send)]
impl RecordGateway for HttpGateway {
    async fn list(&self, kind: RecordKind) -> Result<Vec<Record>, GatewayError> {
        let url = records_url(&self.base_url, &self.user_id, kind);
        let resp = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|err| network_error(&url, err))?;
        let resp = ensure_ok(&url, resp)?;

        let records = resp
            .json::<Vec<Record>>()
            .await
            .map_err(|err| GatewayError::Decode {
                url: url.clone(),
                reason: err.to_string(),
            })?;
        log::debug!("GET {url}: {} records", records.len());
        Ok(records)
    }

    async fn create(&self, kind: RecordKind, record: &NewRecord) -> Result<(), GatewayError> {
        let url = records_url(&self.base_url, &self.user_id, kind);
        let request = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(record)
            .map_err(|err| GatewayError::Encode {
                url: url.clone(),
                reason: err.to_string(),
            })?;
        let resp = request
            .send()
            .await
            .map_err(|err| network_error(&url, err))?;
        let resp = ensure_ok(&url, resp)?;

        // The page reloads both collections afterwards, so the echoed record
        // is only logged.
        match resp.json::<Record>().await {
            Ok(created) => log::debug!("POST {url}: created record {}", created.id),
            Err(err) => log::debug!("POST {url}: response body not a record ({err})"),
        }
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: i64) -> Result<(), GatewayError> {
        let url = record_url(&self.base_url, &self.user_id, kind, id);
        let resp = Request::delete(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|err| network_error(&url, err))?;
        ensure_ok(&url, resp)?;
        log::debug!("DELETE {url}");
        Ok(())
    }
}
