use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dto::hurricane_alerts::{CreateHurricaneAlertDto, HurricaneAlertResponseDto};
use crate::dto::problem::ProblemDetails;
use crate::dto::products::{CreateProductDto, ProductDto, ProductPageDto};
use crate::dto::stocks::StockPriceDto;

pub type ApiClientResult<T> = Result<T, ApiClientError>;

#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Transport or decoding failure.
    #[error("request to the gateway failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with an error status.
    #[error("{detail}")]
    Api { status: u16, detail: String },
}

impl ApiClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|status| status.as_u16()),
        }
    }
}

/// Typed access to the API through the gateway.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decodes a success body, or turns a problem document into an error.
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiClientResult<T> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> ApiClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ProblemDetails>(&text)
            .map(|problem| problem.detail)
            .ok()
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| fallback_detail(status));

        Err(ApiClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiClientResult<T> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiClientResult<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn list_products(&self, page: usize, page_size: usize) -> ApiClientResult<ProductPageDto> {
        self.get(
            "/api/products",
            &[("page", page.to_string()), ("pageSize", page_size.to_string())],
        )
        .await
    }

    pub async fn create_product(&self, dto: &CreateProductDto) -> ApiClientResult<ProductDto> {
        self.post("/api/products", dto).await
    }

    pub async fn list_hurricane_alerts(
        &self,
        is_active: Option<bool>,
    ) -> ApiClientResult<Vec<HurricaneAlertResponseDto>> {
        let query: Vec<(&str, String)> = is_active
            .map(|value| vec![("isActive", value.to_string())])
            .unwrap_or_default();
        self.get("/api/hurricane-alerts", &query).await
    }

    pub async fn list_active_hurricane_alerts(&self) -> ApiClientResult<Vec<HurricaneAlertResponseDto>> {
        self.get("/api/hurricane-alerts/active", &[]).await
    }

    pub async fn create_hurricane_alert(
        &self,
        dto: &CreateHurricaneAlertDto,
    ) -> ApiClientResult<HurricaneAlertResponseDto> {
        self.post("/api/hurricane-alerts", dto).await
    }

    pub async fn deactivate_hurricane_alert(&self, id: i32) -> ApiClientResult<HurricaneAlertResponseDto> {
        let url = self.url(&format!("/api/hurricane-alerts/{id}/deactivate"));
        let response = self.http.patch(url).send().await?;
        Self::decode(response).await
    }

    pub async fn delete_hurricane_alert(&self, id: i32) -> ApiClientResult<()> {
        let url = self.url(&format!("/api/hurricane-alerts/{id}"));
        let response = self.http.delete(url).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn stock_prices(&self, symbols: &[String]) -> ApiClientResult<Vec<StockPriceDto>> {
        self.get("/api/stocks", &[("symbols", symbols.join(","))]).await
    }
}

fn fallback_detail(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("The API responded with {} {reason}", status.as_u16()),
        None => format!("The API responded with {}", status.as_u16()),
    }
}
