// Copyright (c) 2025 - Cowboy AI, Inc.

//! Fetching and parsing of the published Google Cloud IP ranges document
//!
//! ```text
//! {
//!   "syncToken": "1718898456789",
//!   "creationTime": "2024-06-20T08:47:36.789",
//!   "prefixes": [
//!     { "ipv4Prefix": "34.1.208.0/20", "service": "Google Cloud", "scope": "africa-south1" },
//!     { "ipv6Prefix": "2600:1900:8000::/44", "service": "Google Cloud", "scope": "us-central1" }
//!   ]
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CrawlerError, CrawlerResult};

/// Top-level IP ranges document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRangesDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,

    /// Publication time of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,

    #[serde(default)]
    pub prefixes: Vec<PrefixEntry>,
}

/// One entry of the `prefixes` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl IpRangesDocument {
    /// Parse a document from raw JSON bytes
    pub fn from_slice(body: &[u8]) -> CrawlerResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Modification time of the document, if present and readable
    ///
    /// An unreadable value is logged and treated as absent.
    pub fn modification_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.creation_time.as_deref()?;
        let parsed = parse_creation_time(raw);
        if parsed.is_none() {
            warn!("Could not parse creationTime: {}", raw);
        }
        parsed
    }
}

/// Parse a `creationTime` value into UTC
///
/// Values carrying an offset are converted to UTC. Values without one are
/// taken to be UTC already. Seconds may be omitted, and a bare date means
/// midnight.
pub fn parse_creation_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Download and decode the IP ranges document
///
/// Any non-2xx status or undecodable body aborts with an error; there is no retry.
pub async fn fetch_ip_ranges(client: &Client, url: &str) -> CrawlerResult<IpRangesDocument> {
    info!("Fetching GCP IP ranges from {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlerError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    debug!("Received {} bytes", body.len());

    let document = IpRangesDocument::from_slice(&body)?;
    info!(
        "Decoded IP ranges document: {} entries, syncToken={}",
        document.prefixes.len(),
        document.sync_token.as_deref().unwrap_or("none")
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_deserialization() {
        let json = r#"{
            "syncToken": "1718898456789",
            "creationTime": "2024-06-20T08:47:36.789",
            "prefixes": [
                {"ipv4Prefix": "34.1.208.0/20", "service": "Google Cloud", "scope": "africa-south1"},
                {"ipv6Prefix": "2600:1900:8000::/44"}
            ]
        }"#;

        let document = IpRangesDocument::from_slice(json.as_bytes()).unwrap();

        assert_eq!(document.sync_token.as_deref(), Some("1718898456789"));
        assert_eq!(document.prefixes.len(), 2);
        assert_eq!(
            document.prefixes[0],
            PrefixEntry {
                ipv4_prefix: Some("34.1.208.0/20".to_string()),
                ipv6_prefix: None,
                service: Some("Google Cloud".to_string()),
                scope: Some("africa-south1".to_string()),
            }
        );
        assert_eq!(document.prefixes[1].service, None);
    }

    #[test]
    fn test_missing_prefixes_is_empty() {
        let document = IpRangesDocument::from_slice(br#"{"creationTime": "x"}"#).unwrap();
        assert!(document.prefixes.is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = IpRangesDocument::from_slice(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, CrawlerError::Decode(_)));
    }

    #[test]
    fn test_parse_naive_creation_time_as_utc() {
        let parsed = parse_creation_time("2024-06-20T08:47:36.789012").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 6, 20, 8, 47, 36).unwrap()
            + chrono::Duration::microseconds(789_012);
        assert_eq!(parsed, expected);

        let whole_seconds = parse_creation_time("2024-06-20T08:47:36").unwrap();
        assert_eq!(whole_seconds, Utc.with_ymd_and_hms(2024, 6, 20, 8, 47, 36).unwrap());
    }

    #[test]
    fn test_parse_offset_creation_time_normalizes_to_utc() {
        let parsed = parse_creation_time("2024-06-20T10:47:36+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 20, 8, 47, 36).unwrap());

        let zulu = parse_creation_time("2024-06-20T08:47:36Z").unwrap();
        assert_eq!(zulu, parsed);
    }

    #[test]
    fn test_parse_creation_time_without_seconds_or_time() {
        let minutes = parse_creation_time("2024-06-20T08:47").unwrap();
        assert_eq!(minutes, Utc.with_ymd_and_hms(2024, 6, 20, 8, 47, 0).unwrap());

        let spaced = parse_creation_time("2024-06-20 08:47").unwrap();
        assert_eq!(spaced, minutes);

        let date_only = parse_creation_time("2024-06-20").unwrap();
        assert_eq!(date_only, Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unparseable_creation_time_is_none() {
        assert_eq!(parse_creation_time("yesterday"), None);
        assert_eq!(parse_creation_time(""), None);
        assert_eq!(parse_creation_time("2024-13-01"), None);

        let document = IpRangesDocument {
            creation_time: Some("20/06/2024".to_string()),
            ..Default::default()
        };
        assert_eq!(document.modification_time(), None);
    }
}
