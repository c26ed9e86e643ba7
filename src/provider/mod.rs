//! Reconciliation between external-dns endpoints and registrar records.
pub mod translate;
pub mod zone;

#[cfg(test)]
pub(crate) mod testing;

use tracing::{debug, info, warn};

use crate::domeneshop::types::{Domain, RecordType};
use crate::endpoint::{Changes, DomainFilter, Endpoint};
use crate::error::Result;
use crate::registrar::Registrar;

use translate::{fan_out, records_to_endpoints};
use zone::resolve_zone;

/// Counts of what one `apply_changes` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Entries skipped because they were no-ops or had no managed zone.
    pub skipped: usize,
}

/// external-dns provider backed by a [`Registrar`].
#[derive(Debug)]
pub struct DomeneshopProvider<R> {
    registrar: R,
    domain_filter: DomainFilter,
}

impl<R: Registrar> DomeneshopProvider<R> {
    pub fn new(registrar: R, domain_filter: DomainFilter) -> Self {
        Self {
            registrar,
            domain_filter,
        }
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    pub fn domain_filter(&self) -> &DomainFilter {
        &self.domain_filter
    }

    /// Every supported record of every managed zone, one endpoint per record.
    ///
    /// A zone without records contributes nothing; any other registrar
    /// failure is returned to the caller.
    pub async fn records(&self) -> Result<Vec<Endpoint>> {
        let zones = match self.registrar.list_zones().await {
            Ok(zones) => zones,
            Err(e) if e.is_not_found() => {
                warn!("no DNS-enabled domains at the registrar");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut endpoints = Vec::new();
        for zone in zones
            .iter()
            .filter(|zone| self.domain_filter.matches(&zone.name))
        {
            let records = match self.registrar.list_records(zone.id).await {
                Ok(records) => records,
                Err(e) if e.is_not_found() => {
                    debug!(zone = %zone.name, "zone has no records");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let supported = records
                .iter()
                .filter(|record| RecordType::is_supported(&record.rrtype));
            endpoints.extend(records_to_endpoints(&zone.name, supported));
        }

        debug!(count = endpoints.len(), "listed endpoints");
        Ok(endpoints)
    }

    /// Endpoints are accepted as proposed.
    pub fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
        endpoints
    }

    /// Apply creates, then updates, then deletes, one registrar call per
    /// target.
    ///
    /// The first failing mutation aborts the batch and its error is returned.
    /// Mutations already applied in the same batch are not rolled back.
    pub async fn apply_changes(&self, changes: &Changes) -> Result<ApplySummary> {
        info!(
            create = changes.create.len(),
            update_old = changes.update_old.len(),
            update_new = changes.update_new.len(),
            delete = changes.delete.len(),
            "requesting apply changes"
        );

        let mut summary = ApplySummary::default();

        for endpoint in &changes.create {
            let Some(zone) = self.owning_zone(endpoint).await? else {
                summary.skipped += 1;
                continue;
            };
            for record in fan_out(&zone.name, endpoint) {
                self.registrar.create_record(&zone, &record).await?;
                summary.created += 1;
            }
        }

        for (old, new) in changes.update_old.iter().zip(&changes.update_new) {
            if old.is_same(new) {
                debug!(name = %new.dns_name, "no actual change, skipping update");
                summary.skipped += 1;
                continue;
            }
            let Some(zone) = self.owning_zone(new).await? else {
                summary.skipped += 1;
                continue;
            };

            let old_records = fan_out(&zone.name, old);
            let new_records = fan_out(&zone.name, new);
            let paired = old_records.len().min(new_records.len());

            for (old_record, new_record) in old_records.iter().zip(&new_records) {
                if old_record == new_record {
                    continue;
                }
                self.registrar
                    .update_record(&zone, old_record, new_record)
                    .await?;
                summary.updated += 1;
            }
            for record in &new_records[paired..] {
                self.registrar.create_record(&zone, record).await?;
                summary.created += 1;
            }
            for record in &old_records[paired..] {
                self.registrar.delete_record(&zone, record).await?;
                summary.deleted += 1;
            }
        }

        for endpoint in &changes.delete {
            let Some(zone) = self.owning_zone(endpoint).await? else {
                summary.skipped += 1;
                continue;
            };
            for record in fan_out(&zone.name, endpoint) {
                self.registrar.delete_record(&zone, &record).await?;
                summary.deleted += 1;
            }
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            skipped = summary.skipped,
            "applied changes"
        );
        Ok(summary)
    }

    async fn owning_zone(&self, endpoint: &Endpoint) -> Result<Option<Domain>> {
        let zone = resolve_zone(&self.registrar, &endpoint.dns_name).await?;
        if zone.is_none() {
            warn!(
                name = %endpoint.dns_name,
                "could not find appropriate domain, skipping record"
            );
        }
        Ok(zone)
    }
}
