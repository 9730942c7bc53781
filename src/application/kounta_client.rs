use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::application::pagination::Pages;
use crate::config::KountaConfig;
use crate::domain::{ApiRequest, ApiResponse, Order, RequestBody, ResourceId, Transport};
use crate::endpoints;
use crate::errors::{KountaError, KountaResult};
use crate::infrastructure::reqwest_transport::ReqwestTransport;
use crate::models::{Category, Company, Product, Site, Staff, TokenResponse, WebHook};

/// Client for the Kounta REST API.
///
/// Holds no credentials of its own beyond the OAuth client settings in
/// [`KountaConfig`]; every authenticated call takes the bearer token to use.
pub struct KountaClient<T> {
    config: KountaConfig,
    base: Url,
    transport: T,
}

impl KountaClient<ReqwestTransport> {
    /// Client backed by a `reqwest` transport using the configured timeout.
    pub fn connect(config: KountaConfig) -> KountaResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::new(config, transport)
    }
}

impl<T: Transport> KountaClient<T> {
    pub fn new(config: KountaConfig, transport: T) -> KountaResult<Self> {
        let base = endpoints::parse_base(&config.base_url)?;
        Ok(Self {
            config,
            base,
            transport,
        })
    }

    pub fn config(&self) -> &KountaConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── OAuth ────────────────────────────────────────────────────────────────

    /// Exchange the configured store code for an access/refresh token pair.
    pub async fn access_token(&self) -> KountaResult<TokenResponse> {
        let code = self.config.store_code.as_deref().ok_or_else(|| {
            KountaError::Config("a store code is required to request an access token".to_string())
        })?;

        self.request_token(vec![
            ("code", code),
            ("client_secret", self.config.client_secret.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    /// Trade a refresh token for a fresh token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> KountaResult<TokenResponse> {
        self.request_token(vec![
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ])
        .await
    }

    async fn request_token(&self, form: Vec<(&str, &str)>) -> KountaResult<TokenResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request = ApiRequest {
            method: Method::POST,
            url: endpoints::resolve(&self.base, endpoints::TOKEN),
            headers,
            body: RequestBody::Form(
                form.into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        };

        log::debug!("POST {}", request.url.path());
        let response = self.transport.execute(request).await?;
        let response = expect_ok(response, "Failed to get token")?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    // ── Company ──────────────────────────────────────────────────────────────

    pub async fn company(&self, token: &str) -> KountaResult<Company> {
        self.get(token, endpoints::COMPANY_ME, "Failed to get Kounta company")
            .await
    }

    pub async fn sites(&self, token: &str, company: i64) -> KountaResult<Vec<Site>> {
        self.get(token, &endpoints::sites(company), "Failed to get Kounta sites")
            .await
    }

    pub async fn staff(&self, token: &str, company: i64) -> KountaResult<Vec<Staff>> {
        self.get(token, &endpoints::staff(company), "Failed to get Kounta staff")
            .await
    }

    // ── Catalog ──────────────────────────────────────────────────────────────

    pub async fn categories(&self, token: &str, company: i64) -> KountaResult<Vec<Category>> {
        self.get(
            token,
            &endpoints::categories(company),
            "Failed to get Kounta categories",
        )
        .await
    }

    /// Products of one category, one page per request.
    pub fn product_pages(
        &self,
        token: &str,
        company: i64,
        category: i64,
    ) -> Pages<'_, T, Product> {
        let url = endpoints::resolve(&self.base, &endpoints::category_products(company, category));
        Pages::new(self, token, url, "Failed to get Kounta products")
    }

    /// Every product of one category, following all pages.
    pub async fn products(
        &self,
        token: &str,
        company: i64,
        category: i64,
    ) -> KountaResult<Vec<Product>> {
        self.product_pages(token, company, category)
            .collect_all()
            .await
    }

    // ── Webhooks ─────────────────────────────────────────────────────────────

    pub async fn webhooks(&self, token: &str, company: i64) -> KountaResult<Vec<WebHook>> {
        self.get(
            token,
            &endpoints::webhooks(company),
            "Failed to get Kounta web hooks",
        )
        .await
    }

    pub async fn create_webhook(
        &self,
        token: &str,
        company: i64,
        webhook: &WebHook,
    ) -> KountaResult<()> {
        let request = ApiRequest {
            method: Method::POST,
            url: endpoints::resolve(&self.base, &endpoints::webhooks(company)),
            headers: bearer_headers(token)?,
            body: RequestBody::Json(serde_json::to_value(webhook)?),
        };
        log::info!("creating {} webhook for company {}", webhook.topic, company);
        self.send_write(request, "Failed to create web hook").await
    }

    pub async fn delete_webhook(
        &self,
        token: &str,
        company: i64,
        id: &ResourceId,
    ) -> KountaResult<()> {
        let request = ApiRequest {
            method: Method::DELETE,
            url: endpoints::resolve(&self.base, &endpoints::webhook(company, id)),
            headers: bearer_headers(token)?,
            body: RequestBody::Empty,
        };
        log::info!("deleting webhook {} for company {}", id, company);
        self.send_write(request, "Failed to delete web hook").await
    }

    // ── Orders ───────────────────────────────────────────────────────────────

    pub async fn pending_orders(
        &self,
        token: &str,
        company: i64,
        site: i64,
    ) -> KountaResult<Vec<Order>> {
        self.get(
            token,
            &endpoints::pending_orders(company, site),
            "Failed to get Kounta pending orders",
        )
        .await
    }

    /// First page of completed orders for a site, optionally from `start`.
    pub async fn complete_orders(
        &self,
        token: &str,
        company: i64,
        site: i64,
        start: Option<&str>,
    ) -> KountaResult<Vec<Order>> {
        let mut pages = self.complete_order_pages(token, company, site, start);
        Ok(pages.next_page().await?.unwrap_or_default())
    }

    /// Completed orders for a site, one page per request.
    pub fn complete_order_pages(
        &self,
        token: &str,
        company: i64,
        site: i64,
        start: Option<&str>,
    ) -> Pages<'_, T, Order> {
        let mut url = endpoints::resolve(&self.base, &endpoints::complete_orders(company, site));
        if let Some(start) = start.filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("start", start);
        }
        Pages::new(self, token, url, "Failed to get Kounta completed orders")
    }

    pub async fn order(
        &self,
        token: &str,
        company: i64,
        order_id: &ResourceId,
    ) -> KountaResult<Order> {
        self.get(
            token,
            &endpoints::order(company, order_id),
            "Failed to get Kounta sale",
        )
        .await
    }

    // ── Plumbing ─────────────────────────────────────────────────────────────

    async fn get<R: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        context: &str,
    ) -> KountaResult<R> {
        let url = endpoints::resolve(&self.base, path);
        let (value, _) = self.fetch_json(token, url, context).await?;
        Ok(value)
    }

    /// GET `url` and decode a 200 body, returning the next-page header too.
    pub(crate) async fn fetch_json<R: DeserializeOwned>(
        &self,
        token: &str,
        url: Url,
        context: &str,
    ) -> KountaResult<(R, Option<String>)> {
        let request = ApiRequest {
            method: Method::GET,
            url,
            headers: bearer_headers(token)?,
            body: RequestBody::Empty,
        };

        log::debug!("GET {}", request.url.path());
        let response = self.transport.execute(request).await?;
        let response = expect_ok(response, context)?;
        let value = serde_json::from_slice(&response.body)?;
        Ok((value, response.next_page))
    }

    async fn send_write(&self, request: ApiRequest, context: &str) -> KountaResult<()> {
        log::debug!("{} {}", request.method, request.url.path());
        let response = self.transport.execute(request).await?;
        if response.status.is_client_error() || response.status.is_server_error() {
            log::warn!("{}: {}", context, response.status);
            return Err(KountaError::from_status(context, response.status));
        }
        Ok(())
    }
}

fn bearer_headers(token: &str) -> KountaResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| KountaError::InvalidToken)?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

fn expect_ok(response: ApiResponse, context: &str) -> KountaResult<ApiResponse> {
    if response.status == StatusCode::OK {
        return Ok(response);
    }
    log::warn!("{}: {} {}", context, response.status, response.body_text());
    Err(KountaError::from_status(context, response.status))
}
