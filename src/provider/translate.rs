//! Conversions between external-dns endpoints and registrar records.
//!
//! Everything here is pure: an endpoint with N targets becomes N records
//! sharing host, type and TTL, and each registrar record reads back as its
//! own single-target endpoint.
use crate::domeneshop::types::{DnsRecord, NewDnsRecord, is_apex};
use crate::endpoint::Endpoint;

/// TTLs below this are replaced by [`DEFAULT_TTL`].
pub const MIN_TTL: u32 = 60;

/// The registrar's own default TTL.
pub const DEFAULT_TTL: u32 = 3600;

pub fn normalize_ttl(ttl: u32) -> u32 {
    if ttl < MIN_TTL { DEFAULT_TTL } else { ttl }
}

/// Name relative to `zone_name`; "" when the name is the zone itself.
pub fn host_in_zone(fqdn: &str, zone_name: &str) -> String {
    let fqdn = fqdn.trim_end_matches('.');
    let zone_name = zone_name.trim_end_matches('.');
    match fqdn.strip_suffix(zone_name).and_then(|h| h.strip_suffix('.')) {
        Some(host) => host.to_string(),
        // Nothing stripped: the name is the apex.
        None => String::new(),
    }
}

/// Registrar record for one target of `endpoint` inside `zone_name`.
pub fn endpoint_to_record(zone_name: &str, endpoint: &Endpoint, target: &str) -> NewDnsRecord {
    NewDnsRecord {
        host: host_in_zone(&endpoint.dns_name, zone_name),
        data: target.to_string(),
        ttl: normalize_ttl(endpoint.record_ttl),
        rrtype: endpoint.record_type.clone(),
        priority: None,
    }
}

/// One record per target, in target order.
pub fn fan_out(zone_name: &str, endpoint: &Endpoint) -> Vec<NewDnsRecord> {
    endpoint
        .targets
        .iter()
        .map(|target| endpoint_to_record(zone_name, endpoint, target))
        .collect()
}

pub fn record_fqdn(host: &str, zone_name: &str) -> String {
    if is_apex(host) {
        zone_name.to_string()
    } else {
        format!("{host}.{zone_name}")
    }
}

pub fn record_to_endpoint(zone_name: &str, record: &DnsRecord) -> Endpoint {
    Endpoint::new(
        record_fqdn(&record.host, zone_name),
        record.rrtype.clone(),
        record.ttl,
        vec![record.data.clone()],
    )
}

/// Every record becomes its own endpoint; same-name records are not grouped.
pub fn records_to_endpoints<'a>(
    zone_name: &str,
    records: impl IntoIterator<Item = &'a DnsRecord>,
) -> Vec<Endpoint> {
    records
        .into_iter()
        .map(|record| record_to_endpoint(zone_name, record))
        .collect()
}
