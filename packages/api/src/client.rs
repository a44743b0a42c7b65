//! HTTP transport shared by every service module.
//!
//! All backend calls are `POST`s. List and mutation calls send JSON; the few
//! endpoints that take a single identifier expect form fields instead. Book
//! uploads and profile edits are multipart, with the record as a JSON part.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shelf::config::ApiConfig;

use crate::envelope::{decode_ack, decode_data};
use crate::error::ApiError;

/// Backend client. Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

enum Body<'a, B: Serialize + ?Sized> {
    Json(&'a B),
    Form(&'a B),
    Multipart(Form),
}

/// A multipart part holding `body` as `application/json`.
pub fn json_part<B: Serialize + ?Sized>(body: &B) -> Result<Part, ApiError> {
    let json = serde_json::to_string(body)?;
    Ok(Part::text(json).mime_str("application/json")?)
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout());
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Body<'_, B>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut request = self.http.post(self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request = match body {
            Body::Json(body) => request.json(body),
            Body::Form(body) => request.form(body),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("POST {path} failed: {e}");
            ApiError::Transport(e)
        })?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("POST {path} returned HTTP {status}");
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// JSON request, payload response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(path, Body::Json(body)).await?;
        decode_data(&bytes)
    }

    /// Form request, payload response.
    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(path, Body::Form(form)).await?;
        decode_data(&bytes)
    }

    /// JSON mutation. Returns the server's message, if any.
    pub async fn ack_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<String>, ApiError> {
        let bytes = self.send(path, Body::Json(body)).await?;
        decode_ack(&bytes)
    }

    /// Form mutation. Returns the server's message, if any.
    pub async fn ack_form<B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<Option<String>, ApiError> {
        let bytes = self.send(path, Body::Form(form)).await?;
        decode_ack(&bytes)
    }

    /// Multipart mutation. Returns the server's message, if any.
    pub async fn ack_multipart(&self, path: &str, form: Form) -> Result<Option<String>, ApiError> {
        let bytes = self.send::<()>(path, Body::Multipart(form)).await?;
        decode_ack(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ApiConfig {
            base_url: "https://library.example.org/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.url("/api/user/bookList"),
            "https://library.example.org/api/user/bookList"
        );
    }

    #[test]
    fn test_same_origin_by_default() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(client.url("/api/user/bookList"), "/api/user/bookList");
    }

    #[test]
    fn test_empty_token_is_dropped() {
        let config = ApiConfig {
            token: Some(String::new()),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert!(client.token.is_none());

        let config = ApiConfig {
            token: Some("abc".to_string()),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_json_part_builds() {
        assert!(json_part(&serde_json::json!({ "title": "Dune" })).is_ok());
    }
}
