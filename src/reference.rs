// Copyright (c) 2025 - Cowboy AI, Inc.

//! Provenance attached to every relationship written by the crawler

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{CRAWLER_NAME, DEFAULT_INFO_URL, ORGANIZATION};

/// Where a relationship came from and how fresh it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub reference_org: String,
    /// Crawler name; relationships are merged per name
    pub reference_name: String,
    pub reference_url_data: String,
    pub reference_url_info: String,
    /// When this crawler instance was created
    pub reference_time_fetch: DateTime<Utc>,
    /// Publication time of the source data, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time_modification: Option<DateTime<Utc>>,
}

impl Reference {
    /// Reference for this crawler, fetched now from `data_url`
    pub fn new(data_url: impl Into<String>) -> Self {
        Self::fetched_at(data_url, Utc::now())
    }

    /// Reference with an explicit fetch time
    pub fn fetched_at(data_url: impl Into<String>, fetch_time: DateTime<Utc>) -> Self {
        Self {
            reference_org: ORGANIZATION.to_string(),
            reference_name: CRAWLER_NAME.to_string(),
            reference_url_data: data_url.into(),
            reference_url_info: DEFAULT_INFO_URL.to_string(),
            reference_time_fetch: fetch_time,
            reference_time_modification: None,
        }
    }

    pub fn set_modification_time(&mut self, time: Option<DateTime<Utc>>) {
        self.reference_time_modification = time;
    }

    /// Fetch time in RFC 3339, as handed to the graph store
    pub fn fetch_time_rfc3339(&self) -> String {
        self.reference_time_fetch
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Modification time in RFC 3339, if set
    pub fn modification_time_rfc3339(&self) -> Option<String> {
        self.reference_time_modification
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}
