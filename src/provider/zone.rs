//! Longest-registered-suffix zone lookup.
use tracing::debug;

use crate::domeneshop::types::Domain;
use crate::error::Result;
use crate::registrar::Registrar;

/// Candidate zone names for `fqdn`, longest first: the name itself, then each
/// suffix left after stripping one more leading label. Single-label names
/// (bare TLDs) are never candidates.
pub fn candidate_zones(fqdn: &str) -> Vec<&str> {
    let mut name = fqdn.trim_end_matches('.');
    let mut out = Vec::new();
    while let Some((_, rest)) = name.split_once('.') {
        if name.split('.').any(str::is_empty) {
            break;
        }
        out.push(name);
        name = rest;
    }
    out
}

/// Find the managed zone owning `fqdn`.
///
/// `Ok(None)` means no suffix of the name is a zone. A lookup that fails for
/// any reason other than "not found" aborts resolution, so an upstream outage
/// is never mistaken for a missing zone.
pub async fn resolve_zone<R>(registrar: &R, fqdn: &str) -> Result<Option<Domain>>
where
    R: Registrar + ?Sized,
{
    for candidate in candidate_zones(fqdn) {
        match registrar.find_zone_by_name(candidate).await {
            Ok(zone) => {
                debug!(fqdn, zone = %zone.name, "resolved zone");
                return Ok(Some(zone));
            }
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
