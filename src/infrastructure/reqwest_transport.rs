use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, Method, StatusCode};

use crate::domain::{ApiRequest, ApiResponse, RequestBody, Transport, NEXT_PAGE_HEADER};
use crate::errors::{KountaError, KountaResult};

pub const MAX_REDIRECTS: usize = 10;

/// `reqwest`-backed transport.
///
/// Redirects are followed here rather than by `reqwest`, which drops the
/// `Authorization` header when a redirect crosses hosts. Every hop is sent
/// with the caller's original headers.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> KountaResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    async fn send_once(&self, request: &ApiRequest) -> KountaResult<reqwest::Response> {
        let builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(value) => builder.json(value),
        };

        Ok(builder.send().await?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> KountaResult<ApiResponse> {
        let mut request = request;
        let mut hops = 0;

        loop {
            let response = self.send_once(&request).await?;
            let status = response.status();

            if status.is_redirection() {
                if let Some(location) = response.headers().get(LOCATION) {
                    if hops == MAX_REDIRECTS {
                        return Err(KountaError::TooManyRedirects(MAX_REDIRECTS));
                    }
                    hops += 1;

                    let location = location
                        .to_str()
                        .map_err(|_| KountaError::from_status("Unreadable redirect location", status))?;
                    let next = request.url.join(location)?;
                    log::debug!("{} redirected to {}", request.url.path(), next);

                    request.url = next;
                    if rewrites_to_get(status) {
                        request.method = Method::GET;
                        request.body = RequestBody::Empty;
                    }
                    continue;
                }
            }

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?.to_vec();

            return Ok(ApiResponse {
                status,
                next_page,
                body,
            });
        }
    }
}

/// 301/302/303 are replayed as a bodiless GET; 307/308 keep method and body.
fn rewrites_to_get(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER
    )
}
