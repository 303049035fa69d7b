// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests
//!
//! Extraction, region resolution and ingestion properties that must hold for
//! any document shape.

use gcp_ip_ranges::extract::{extract_records, records_from_entry, AddressFamily, DEFAULT_SERVICE};
use gcp_ip_ranges::graph::{NodeKind, RelationshipType};
use gcp_ip_ranges::regions::{country_for_region, REGION_TO_COUNTRY};
use gcp_ip_ranges::source::{IpRangesDocument, PrefixEntry};
use gcp_ip_ranges::{Crawler, CrawlerConfig, MemoryGraph};
use proptest::prelude::*;

fn scope_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        proptest::sample::select(REGION_TO_COUNTRY).prop_map(|(region, _)| Some(region.to_string())),
        "[a-z]{2,12}-[a-z]{4,9}[0-9]{1,2}".prop_map(Some),
    ]
}

fn service_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Google Cloud".to_string())),
        "[A-Z][a-z]{3,10}".prop_map(Some),
    ]
}

prop_compose! {
    fn entry_strategy()(
        v4 in proptest::option::of((0u8..=223, 0u8..=255, 8u8..=24).prop_map(|(a, b, len)| format!("{a}.{b}.0.0/{len}"))),
        v6 in proptest::option::of((0u16..=0xffff, 32u8..=64).prop_map(|(h, len)| format!("2600:{h:x}::/{len}"))),
        service in service_strategy(),
        scope in scope_strategy(),
    ) -> PrefixEntry {
        PrefixEntry { ipv4_prefix: v4, ipv6_prefix: v6, service, scope }
    }
}

proptest! {
    /// Each entry yields one record per present prefix, IPv4 before IPv6
    #[test]
    fn prop_records_match_present_prefixes(entry in entry_strategy()) {
        let records = records_from_entry(&entry);

        let expected: Vec<AddressFamily> = [
            entry.ipv4_prefix.as_ref().map(|_| AddressFamily::V4),
            entry.ipv6_prefix.as_ref().map(|_| AddressFamily::V6),
        ]
        .into_iter()
        .flatten()
        .collect();
        let families: Vec<AddressFamily> = records.iter().map(|r| r.af).collect();
        prop_assert_eq!(families, expected);

        for record in &records {
            prop_assert_eq!(
                record.service.as_str(),
                entry.service.as_deref().unwrap_or(DEFAULT_SERVICE)
            );
            prop_assert_eq!(record.scope.as_str(), entry.scope.as_deref().unwrap_or(""));
        }
    }

    /// Lookup agrees with the table for every known region
    #[test]
    fn prop_known_regions_resolve(index in 0..REGION_TO_COUNTRY.len()) {
        let (region, country) = REGION_TO_COUNTRY[index];
        prop_assert_eq!(country_for_region(region), Some(country));
    }

    /// Link counts are bounded by records and follow scope resolution
    #[test]
    fn prop_ingest_link_counts(entries in proptest::collection::vec(entry_strategy(), 0..20)) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let document = IpRangesDocument { prefixes: entries, ..Default::default() };
        let records = extract_records(&document.prefixes);

        let mut crawler = Crawler::new(&CrawlerConfig::default(), MemoryGraph::new()).unwrap();
        let summary = runtime.block_on(crawler.ingest(&document)).unwrap();

        prop_assert_eq!(summary.records, records.len());
        prop_assert!(summary.categorized_links <= records.len());
        // The in-memory graph registers every value, so every service resolves
        prop_assert_eq!(summary.categorized_links, records.len());

        let attributed = records.iter().filter(|r| r.country_code().is_some()).count();
        prop_assert_eq!(summary.country_links, attributed);

        let graph = crawler.graph();
        for (prefix, country) in graph.edge_keys(RelationshipType::Country) {
            let matching = records
                .iter()
                .filter(|r| r.prefix == prefix)
                .any(|r| r.country_code() == Some(country.as_str()));
            prop_assert!(matching, "COUNTRY edge {} -> {} without a resolving scope", prefix, country);
        }
        prop_assert!(graph.node_count(NodeKind::Country) <= REGION_TO_COUNTRY.len());
    }
}
