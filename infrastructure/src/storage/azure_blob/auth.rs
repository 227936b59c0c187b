//! Shared Key request signing for the Blob service
//!
//! ```text
//! Authorization: SharedKey <account>:base64(HMAC-SHA256(key, string-to-sign))
//! ```
//!
//! The string-to-sign is the verb, eleven standard header slots (all empty
//! for the bodiless GETs issued here), the sorted `x-ms-*` headers and the
//! canonicalized resource.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use blob_agent_application::StorageError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;

/// REST API version sent as `x-ms-version`
pub const STORAGE_API_VERSION: &str = "2021-08-06";

/// Standard headers between the verb and the `x-ms-*` block
const STANDARD_HEADER_SLOTS: usize = 11;

/// Account name plus the keyed MAC derived from the account key
#[derive(Clone)]
pub struct SharedKeyCredential {
    account: String,
    mac: Hmac<Sha256>,
}

impl std::fmt::Debug for SharedKeyCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedKeyCredential")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl SharedKeyCredential {
    /// Build from the base64 account key shown in the portal
    pub fn new(account: impl Into<String>, base64_key: &str) -> Result<Self, StorageError> {
        let key = STANDARD
            .decode(base64_key.trim())
            .map_err(|e| StorageError::Authentication(format!("account key is not base64: {}", e)))?;
        let mac = Hmac::<Sha256>::new_from_slice(&key)
            .map_err(|e| StorageError::Authentication(e.to_string()))?;
        Ok(Self {
            account: account.into(),
            mac,
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Canonical string for a bodiless request
    pub fn string_to_sign(&self, method: &str, url: &Url, ms_headers: &[(&str, &str)]) -> String {
        let mut out = String::from(method);
        out.push('\n');
        out.push_str(&"\n".repeat(STANDARD_HEADER_SLOTS));

        let mut headers: Vec<(String, &str)> = ms_headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.trim()))
            .collect();
        headers.sort();
        for (name, value) in headers {
            out.push_str(&name);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }

        out.push('/');
        out.push_str(&self.account);
        out.push_str(url.path());

        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in url.query_pairs() {
            params
                .entry(name.to_ascii_lowercase())
                .or_default()
                .push(value.into_owned());
        }
        for (name, mut values) in params {
            values.sort();
            out.push('\n');
            out.push_str(&name);
            out.push(':');
            out.push_str(&values.join(","));
        }

        out
    }

    /// Base64 HMAC-SHA256 of `string_to_sign`
    pub fn sign(&self, string_to_sign: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(string_to_sign.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self, method: &str, url: &Url, ms_headers: &[(&str, &str)]) -> String {
        let signature = self.sign(&self.string_to_sign(method, url, ms_headers));
        format!("SharedKey {}:{}", self.account, signature)
    }
}

/// RFC 1123 timestamp for `x-ms-date`
pub fn ms_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const KEY: &str = "YmxvYi1hZ2VudC10ZXN0LWtleQ==";
    const DATE: &str = "Mon, 19 Oct 2026 10:00:00 GMT";

    fn list_url() -> Url {
        Url::parse("https://acct.blob.core.windows.net/data?restype=container&comp=list").unwrap()
    }

    #[test]
    fn test_ms_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        assert_eq!(ms_date(now), DATE);
    }

    #[test]
    fn test_string_to_sign_sorts_headers_and_query() {
        let credential = SharedKeyCredential::new("acct", KEY).unwrap();
        let sts = credential.string_to_sign(
            "GET",
            &list_url(),
            &[("x-ms-version", STORAGE_API_VERSION), ("x-ms-date", DATE)],
        );

        assert_eq!(
            sts,
            "GET\n\n\n\n\n\n\n\n\n\n\n\n\
             x-ms-date:Mon, 19 Oct 2026 10:00:00 GMT\n\
             x-ms-version:2021-08-06\n\
             /acct/data\ncomp:list\nrestype:container"
        );
    }

    #[test]
    fn test_signature() {
        let credential = SharedKeyCredential::new("acct", KEY).unwrap();
        let auth = credential.authorization(
            "GET",
            &list_url(),
            &[("x-ms-date", DATE), ("x-ms-version", STORAGE_API_VERSION)],
        );
        assert_eq!(
            auth,
            "SharedKey acct:qBkEOPD+VrKd1+0E2hfOLc9QUck3AKrTf8IpFU5Cj/s="
        );
    }

    #[test]
    fn test_blob_path_in_resource() {
        let credential = SharedKeyCredential::new("acct", KEY).unwrap();
        let url = Url::parse("https://acct.blob.core.windows.net/data/csv-data/sales.csv").unwrap();
        let sts = credential.string_to_sign("GET", &url, &[]);
        assert!(sts.ends_with("\n/acct/data/csv-data/sales.csv"));
    }

    #[test]
    fn test_invalid_key() {
        let err = SharedKeyCredential::new("acct", "not base64!").unwrap_err();
        assert!(matches!(err, StorageError::Authentication(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let credential = SharedKeyCredential::new("acct", KEY).unwrap();
        let debug = format!("{:?}", credential);
        assert!(debug.contains("acct"));
        assert!(!debug.contains(KEY));
    }
}
