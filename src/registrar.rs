//! The registrar operations the reconciliation engine depends on.
use async_trait::async_trait;

use crate::domeneshop::types::{DnsRecord, Domain, NewDnsRecord};
use crate::error::{Error, Result};

/// Zone and record primitives offered by a registrar.
///
/// Every call reads fresh data; implementations keep no state between calls
/// other than credentials and a connection pool.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// All zones with DNS management enabled. `NotFound` when there are none.
    async fn list_zones(&self) -> Result<Vec<Domain>>;

    /// Records of one zone. `NotFound` when the zone has no records.
    async fn list_records(&self, zone_id: u64) -> Result<Vec<DnsRecord>>;

    async fn create_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()>;

    /// Replace the record identified by `old`'s (host, data, type) with `new`.
    async fn update_record(
        &self,
        zone: &Domain,
        old: &NewDnsRecord,
        new: &NewDnsRecord,
    ) -> Result<()>;

    /// Delete the record identified by (host, data, type).
    async fn delete_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()>;

    async fn find_zone_by_name(&self, name: &str) -> Result<Domain> {
        self.list_zones()
            .await?
            .into_iter()
            .find(|zone| zone.name == name)
            .ok_or_else(|| Error::not_found(format!("failed to find matching domain name: {name}")))
    }

    /// First record of the zone matching host, data and type.
    async fn find_record(
        &self,
        zone: &Domain,
        host: &str,
        data: &str,
        rrtype: &str,
    ) -> Result<DnsRecord> {
        self.list_records(zone.id)
            .await?
            .into_iter()
            .find(|record| record.matches(host, data, rrtype))
            .ok_or_else(|| {
                Error::not_found(format!(
                    "failed to find {rrtype} record with host '{host}' and data '{data}' in {}",
                    zone.name
                ))
            })
    }
}
