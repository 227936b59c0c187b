//! Blob service client over the REST API

use std::time::Duration;

use async_trait::async_trait;
use blob_agent_application::{BlobStorePort, StorageError};
use chrono::Utc;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use super::auth::{STORAGE_API_VERSION, SharedKeyCredential, ms_date};
use super::listing::{parse_list_page, parse_service_error};

/// Connection settings for one storage account
#[derive(Clone)]
pub struct AzureBlobSettings {
    pub account_name: String,
    /// Base64 account key
    pub account_key: String,
    /// Container the tools read from
    pub container: String,
    /// Blob service URL override (Azurite, sovereign clouds)
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for AzureBlobSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobSettings")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("container", &self.container)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AzureBlobSettings {
    /// Blob service URL, `https://{account}.blob.core.windows.net` unless overridden
    pub fn base_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.blob.core.windows.net", self.account_name))
    }
}

/// [`BlobStorePort`] backed by Azure Blob Storage
pub struct AzureBlobStore {
    client: reqwest::Client,
    base_url: Url,
    credential: SharedKeyCredential,
}

impl AzureBlobStore {
    pub fn new(settings: &AzureBlobSettings) -> Result<Self, StorageError> {
        let raw_url = settings.base_url();
        let base_url = Url::parse(&raw_url).map_err(|e| {
            StorageError::RequestFailed(format!("invalid blob endpoint '{}': {}", raw_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::RequestFailed(format!(
                "invalid blob endpoint '{}'",
                raw_url
            )));
        }

        let credential = SharedKeyCredential::new(&settings.account_name, &settings.account_key)?;
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            credential,
        })
    }

    pub fn account(&self) -> &str {
        self.credential.account()
    }

    fn url_with_segments<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::RequestFailed("blob endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}/{container}?restype=container&comp=list[&marker=..]`
    pub(crate) fn list_url(&self, container: &str, marker: Option<&str>) -> Result<Url, StorageError> {
        let mut url = self.url_with_segments([container])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("restype", "container");
            query.append_pair("comp", "list");
            if let Some(marker) = marker {
                query.append_pair("marker", marker);
            }
        }
        Ok(url)
    }

    /// `{base}/{container}/{name}`, keeping `/` in blob names as path separators
    pub(crate) fn blob_url(&self, container: &str, name: &str) -> Result<Url, StorageError> {
        self.url_with_segments(std::iter::once(container).chain(name.split('/')))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, StorageError> {
        let date = ms_date(Utc::now());
        let authorization = self.credential.authorization(
            "GET",
            &url,
            &[("x-ms-date", date.as_str()), ("x-ms-version", STORAGE_API_VERSION)],
        );

        debug!(%url, "Blob service request");
        self.client
            .get(url)
            .header("x-ms-date", &date)
            .header("x-ms-version", STORAGE_API_VERSION)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(request_error)
    }
}

fn request_error(e: reqwest::Error) -> StorageError {
    if e.is_timeout() {
        StorageError::RequestFailed("request timed out".to_string())
    } else {
        StorageError::RequestFailed(e.to_string())
    }
}

/// Map a non-success status and its XML body to a [`StorageError`]
pub(crate) fn status_error(
    status: u16,
    body: &str,
    container: &str,
    blob: Option<&str>,
) -> StorageError {
    let service = parse_service_error(body);
    let message = service
        .message
        .as_deref()
        .and_then(|m| m.lines().next())
        .or(service.code.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));

    match (status, service.code.as_deref(), blob) {
        (404, Some("ContainerNotFound"), _) | (404, _, None) => {
            StorageError::ContainerNotFound(container.to_string())
        }
        (404, _, Some(name)) => StorageError::NotFound {
            container: container.to_string(),
            name: name.to_string(),
        },
        (401 | 403, _, _) => StorageError::Authentication(message),
        _ => StorageError::Http { status, message },
    }
}

async fn error_from(response: reqwest::Response, container: &str, blob: Option<&str>) -> StorageError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    status_error(status, &body, container, blob)
}

#[async_trait]
impl BlobStorePort for AzureBlobStore {
    async fn list_objects(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let url = self.list_url(container, marker.as_deref())?;
            let response = self.get(url).await?;
            if !response.status().is_success() {
                return Err(error_from(response, container, None).await);
            }

            let body = response.text().await.map_err(request_error)?;
            let page = parse_list_page(&body)?;
            names.extend(page.names);

            match page.next_marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        info!(container, count = names.len(), "Listed blobs");
        Ok(names)
    }

    async fn read_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let url = self.blob_url(container, name)?;
        let response = self.get(url).await?;
        if !response.status().is_success() {
            return Err(error_from(response, container, Some(name)).await);
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        info!(container, blob = name, size = bytes.len(), "Downloaded blob");
        Ok(bytes.to_vec())
    }
}
