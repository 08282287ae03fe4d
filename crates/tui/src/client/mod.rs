use std::{future::Future, time::Duration};

use api_types::{balance::DailyBalance, entry::CashflowEntry};
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("rejected by backend: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Operations offered by the cash-flow backend.
///
/// Every call is a single request/response: no caching, no retry.
pub trait CashflowApi {
    fn list(&self) -> impl Future<Output = ClientResult<Vec<CashflowEntry>>> + Send;

    fn list_by_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = ClientResult<Vec<CashflowEntry>>> + Send;

    /// Creates `entry`; any `id` it carries is not sent.
    fn create(
        &self,
        entry: &CashflowEntry,
    ) -> impl Future<Output = ClientResult<CashflowEntry>> + Send;

    fn update(
        &self,
        id: u64,
        entry: &CashflowEntry,
    ) -> impl Future<Output = ClientResult<CashflowEntry>> + Send;

    fn remove(&self, id: u64) -> impl Future<Output = ClientResult<()>> + Send;

    fn get_by_id(&self, id: u64) -> impl Future<Output = ClientResult<CashflowEntry>> + Send;

    fn balance(&self) -> impl Future<Output = ClientResult<Vec<DailyBalance>>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Relative joins only keep a path prefix when it ends with '/'.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|err| AppError::BaseUrl(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Endpoint(format!("{path}: {err}")))
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }
        Err(error_from_response(res).await)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        tracing::debug!(%url, "GET");
        let res = self.send(self.http.get(url)).await?;
        Ok(res.json::<T>().await?)
    }

    /// Sends `entry` and decodes the stored entry from the reply, if any.
    async fn write_entry(
        &self,
        request: RequestBuilder,
        entry: &CashflowEntry,
    ) -> ClientResult<Option<CashflowEntry>> {
        let res = self.send(request.json(entry)).await?;
        let body = res.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

impl CashflowApi for Client {
    async fn list(&self) -> ClientResult<Vec<CashflowEntry>> {
        self.get_json(self.endpoint("lancamentos")?).await
    }

    async fn list_by_date(&self, date: NaiveDate) -> ClientResult<Vec<CashflowEntry>> {
        let mut url = self.endpoint("lancamento")?;
        url.query_pairs_mut()
            .append_pair("data", &date.format("%Y-%m-%d").to_string());
        self.get_json(url).await
    }

    async fn create(&self, entry: &CashflowEntry) -> ClientResult<CashflowEntry> {
        let url = self.endpoint("criar")?;
        let payload = CashflowEntry {
            id: None,
            ..entry.clone()
        };
        tracing::debug!(%url, "POST");
        let created = self.write_entry(self.http.post(url), &payload).await?;
        Ok(created.unwrap_or(payload))
    }

    async fn update(&self, id: u64, entry: &CashflowEntry) -> ClientResult<CashflowEntry> {
        let url = self.endpoint(&format!("lancamento/{id}"))?;
        let payload = CashflowEntry {
            id: None,
            ..entry.clone()
        };
        tracing::debug!(%url, "PUT");
        let updated = self.write_entry(self.http.put(url), &payload).await?;
        Ok(updated.unwrap_or(CashflowEntry {
            id: Some(id),
            ..payload
        }))
    }

    async fn remove(&self, id: u64) -> ClientResult<()> {
        let url = self.endpoint(&format!("delete/{id}"))?;
        tracing::debug!(%url, "DELETE");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> ClientResult<CashflowEntry> {
        self.get_json(self.endpoint(&format!("lancamento/{id}"))?)
            .await
    }

    async fn balance(&self) -> ClientResult<Vec<DailyBalance>> {
        self.get_json(self.endpoint("saldo")?).await
    }
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let message = res
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| "unknown error".to_string());

    match status.as_u16() {
        404 => ClientError::NotFound,
        400 | 422 => ClientError::Validation(message),
        code => ClientError::Server {
            status: code,
            message,
        },
    }
}
