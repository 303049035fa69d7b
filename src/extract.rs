// Copyright (c) 2025 - Cowboy AI, Inc.

//! Flattening of document entries into per-family prefix records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::regions::country_for_region;
use crate::source::PrefixEntry;

/// Service name used when an entry does not name one
pub const DEFAULT_SERVICE: &str = "Google Cloud";

/// IP address family of a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Numeric family (4 or 6)
    pub fn as_u8(&self) -> u8 {
        match self {
            AddressFamily::V4 => 4,
            AddressFamily::V6 => 6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One prefix with its service and scope attribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefixRecord {
    /// CIDR notation, as published
    pub prefix: String,
    pub service: String,
    /// GCP region, empty when the entry has none
    pub scope: String,
    pub af: AddressFamily,
}

impl PrefixRecord {
    /// Country code of the record's scope, if the scope is a known region
    pub fn country_code(&self) -> Option<&'static str> {
        country_for_region(&self.scope)
    }
}

/// Flatten one entry into zero, one or two records (IPv4 first)
pub fn records_from_entry(entry: &PrefixEntry) -> Vec<PrefixRecord> {
    let service = entry.service.as_deref().unwrap_or(DEFAULT_SERVICE);
    let scope = entry.scope.as_deref().unwrap_or_default();

    [
        (entry.ipv4_prefix.as_ref(), AddressFamily::V4),
        (entry.ipv6_prefix.as_ref(), AddressFamily::V6),
    ]
    .into_iter()
    .filter_map(|(prefix, af)| {
        prefix.map(|prefix| PrefixRecord {
            prefix: prefix.clone(),
            service: service.to_string(),
            scope: scope.to_string(),
            af,
        })
    })
    .collect()
}

/// Flatten all entries, preserving document order
pub fn extract_records(entries: &[PrefixEntry]) -> Vec<PrefixRecord> {
    entries.iter().flat_map(records_from_entry).collect()
}
