use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{ApiSettings, AppError, ListQuery, PaginatedResponse, PaginationMeta};

use crate::token::{StoredToken, TokenStore};

/// HTTP client for the LMS backend.
///
/// Cheap to clone; clones share the HTTP connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    page_size: i64,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Arc::ptr_eq(&self.tokens, &other.tokens)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            page_size: shared_types::DEFAULT_PAGE_SIZE,
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Client configured from `[api]` settings, keeping its token in local
    /// storage.
    pub fn from_settings(settings: &ApiSettings) -> Self {
        let mut client = Self::new(
            settings.normalized_base_url(),
            Arc::new(StoredToken::default()),
        );
        client.page_size = settings.effective_page_size();
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page with the configured page size.
    pub fn first_page(&self) -> ListQuery {
        ListQuery::new(Some(1), Some(self.page_size))
    }

    pub fn page(&self, page: i64) -> ListQuery {
        ListQuery::new(Some(page), Some(self.page_size))
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn has_token(&self) -> bool {
        self.tokens.load().is_some()
    }

    pub(crate) fn set_token(&self, token: &str) {
        self.tokens.save(token);
    }

    pub(crate) fn clear_token(&self) {
        self.tokens.clear();
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder carrying the session bearer token, if any.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Request builder authenticated with an explicit token instead of the
    /// session token. Used for organization-scoped calls.
    pub(crate) fn request_with_token(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> RequestBuilder {
        match token {
            Some(t) => self.http.request(method, self.url(path)).bearer_auth(t),
            None => self.request(method, path),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// GET a list endpoint and normalize the body into a page.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        list: ListQuery,
        extra: &[(&str, String)],
    ) -> Result<PaginatedResponse<T>, AppError> {
        let mut query = vec![
            ("page", list.page.to_string()),
            ("limit", list.limit.to_string()),
        ];
        query.extend(extra.iter().cloned());
        let body: ListBody<T> = self.get(path, &query).await?;
        Ok(body.into_page(list))
    }

    /// Send a request and decode the JSON response body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let text = self.send_raw(builder).await?;
        let body = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!(error = %e, "unexpected response body");
            AppError::decode(format!("Unexpected response from server: {e}"))
        })
    }

    /// Send a request and return the raw body of a success response.
    pub(crate) async fn send_raw(&self, builder: RequestBuilder) -> Result<String, AppError> {
        let request = builder
            .build()
            .map_err(|e| AppError::bad_request(format!("Invalid request: {e}")))?;
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!(%method, %url, "api request");

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request failed");
            AppError::network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;

        if (200..300).contains(&status) {
            Ok(text)
        } else {
            let err = AppError::from_status(status, &text);
            tracing::warn!(%method, %url, status, kind = %err.kind, "api error response");
            Err(err)
        }
    }
}

/// Percent-encode one path segment.
pub(crate) fn seg(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// List bodies the backend returns: a paginated envelope, a `{ data }`
/// wrapper without metadata, or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Paged {
        data: Vec<T>,
        meta: PaginationMeta,
    },
    Wrapped {
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    pub(crate) fn into_page(self, requested: ListQuery) -> PaginatedResponse<T> {
        match self {
            ListBody::Paged { data, meta } => PaginatedResponse { data, meta },
            ListBody::Wrapped { data } | ListBody::Bare(data) => {
                let total = (requested.page - 1) * requested.limit + data.len() as i64;
                PaginatedResponse::new(data, requested.page, requested.limit, total)
            }
        }
    }
}
