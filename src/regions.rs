// Copyright (c) 2025 - Cowboy AI, Inc.

//! GCP region to ISO 3166-1 country code lookup
//!
//! Region names follow `<continent|country>-<location><number>`. The table
//! follows the published list of Compute Engine regions.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Region → country code pairs
pub const REGION_TO_COUNTRY: &[(&str, &str)] = &[
    // Africa
    ("africa-south1", "ZA"),
    // Asia Pacific
    ("asia-east1", "TW"),
    ("asia-east2", "HK"),
    ("asia-northeast1", "JP"),
    ("asia-northeast2", "JP"),
    ("asia-northeast3", "KR"),
    ("asia-south1", "IN"),
    ("asia-south2", "IN"),
    ("asia-southeast1", "SG"),
    ("asia-southeast2", "ID"),
    // Australia
    ("australia-southeast1", "AU"),
    ("australia-southeast2", "AU"),
    // Europe
    ("europe-central2", "PL"),
    ("europe-north1", "FI"),
    ("europe-north2", "SE"),
    ("europe-southwest1", "ES"),
    ("europe-west1", "BE"),
    ("europe-west2", "GB"),
    ("europe-west3", "DE"),
    ("europe-west4", "NL"),
    ("europe-west6", "CH"),
    ("europe-west8", "IT"),
    ("europe-west9", "FR"),
    ("europe-west10", "DE"),
    ("europe-west12", "IT"),
    // Middle East
    ("me-central1", "QA"),
    ("me-central2", "SA"),
    ("me-west1", "IL"),
    // North America
    ("northamerica-northeast1", "CA"),
    ("northamerica-northeast2", "CA"),
    ("northamerica-south1", "MX"),
    ("us-central1", "US"),
    ("us-east1", "US"),
    ("us-east4", "US"),
    ("us-east5", "US"),
    ("us-south1", "US"),
    ("us-west1", "US"),
    ("us-west2", "US"),
    ("us-west3", "US"),
    ("us-west4", "US"),
    // South America
    ("southamerica-east1", "BR"),
    ("southamerica-west1", "CL"),
];

static REGION_INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn region_index() -> &'static HashMap<&'static str, &'static str> {
    REGION_INDEX.get_or_init(|| REGION_TO_COUNTRY.iter().copied().collect())
}

/// Resolve a GCP scope (region) to its country code
///
/// Returns `None` for unknown scopes, including the empty scope.
pub fn country_for_region(scope: &str) -> Option<&'static str> {
    region_index().get(scope).copied()
}
