//! HTTP adapter for the theme store.
//!
//! Talks to the backend's `GET {base}/themes/active/{mode}` endpoint. The
//! response body is normalized through [`swatch::normalize_record`], so
//! every payload shape the backend has historically produced (camelCase or
//! flattened keys, configs as objects or encoded strings, a single record
//! or an array under `data`) comes out as canonical records.

use serde_json::Value;
use swatch::{CustomTheme, Mode, normalize_record};
use tracing::warn;

use crate::error::StoreError;
use crate::store::ThemeStore;

const USER_AGENT: &str = concat!("daub/", env!("CARGO_PKG_VERSION"));

/// Theme store backed by the backend HTTP API.
#[derive(Debug, Clone)]
pub struct HttpThemeStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpThemeStore {
    /// Create a store against `base_url` (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token for authenticated theme scopes.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self, mode: Mode) -> String {
        format!("{}/themes/active/{}", self.base_url, mode)
    }
}

/// Extract records from a response body.
///
/// The payload of interest lives under `data` when that key exists,
/// otherwise the body itself is the payload. An array normalizes
/// item-by-item, skipping bad items with a warning; a single object must
/// normalize or the whole fetch fails.
fn decode_body(body: &Value) -> Result<Vec<CustomTheme>, StoreError> {
    let payload = body.get("data").unwrap_or(body);

    match payload {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match normalize_record(item) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        warn!(error = %err, "Skipping malformed record in theme response");
                    }
                }
            }
            Ok(records)
        }
        single => Ok(vec![normalize_record(single)?]),
    }
}

impl ThemeStore for HttpThemeStore {
    async fn active_themes(&self, mode: Mode) -> Result<Vec<CustomTheme>, StoreError> {
        let mut request = self.client.get(self.endpoint(mode));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| StoreError::Fetch(err.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(mode));
        }
        if !response.status().is_success() {
            return Err(StoreError::Fetch(format!(
                "theme endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| StoreError::Fetch(err.to_string()))?;
        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swatch::DEFAULT_DARK;

    fn record_json(id: i64) -> Value {
        json!({
            "id": id,
            "name": "midnight",
            "darkConfig": serde_json::to_value(DEFAULT_DARK).unwrap(),
            "isActiveDark": true,
        })
    }

    #[tokio::test]
    async fn test_single_record_under_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/themes/active/dark")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": record_json(7) }).to_string())
            .create_async()
            .await;

        let store = HttpThemeStore::new(server.url());
        let records = store.active_themes(Mode::Dark).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].dark_config, Some(DEFAULT_DARK));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_array_skips_malformed_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/themes/active/dark")
            .with_status(200)
            .with_body(
                json!({ "data": [record_json(1), { "name": "no id or configs" }, record_json(2)] })
                    .to_string(),
            )
            .create_async()
            .await;

        let store = HttpThemeStore::new(format!("{}/", server.url()));
        let records = store.active_themes(Mode::Dark).await.unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_flattened_lowercase_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/themes/active/light")
            .with_status(200)
            .with_body(
                json!({
                    "id": 3,
                    "lightconfig": serde_json::to_string(&swatch::DEFAULT_LIGHT).unwrap(),
                    "isactivelight": 1,
                })
                .to_string(),
            )
            .create_async()
            .await;

        let store = HttpThemeStore::new(server.url());
        let records = store.active_themes(Mode::Light).await.unwrap();
        assert_eq!(records[0].light_config, Some(swatch::DEFAULT_LIGHT));
        assert!(records[0].is_active_light);
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/themes/active/dark")
            .with_status(404)
            .create_async()
            .await;

        let store = HttpThemeStore::new(server.url());
        assert_eq!(
            store.active_themes(Mode::Dark).await,
            Err(StoreError::NotFound(Mode::Dark))
        );
    }

    #[tokio::test]
    async fn test_server_error_maps_to_fetch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/themes/active/dark")
            .with_status(500)
            .create_async()
            .await;

        let store = HttpThemeStore::new(server.url());
        let err = store.active_themes(Mode::Dark).await.unwrap_err();
        assert!(matches!(err, StoreError::Fetch(_)));
    }
}
