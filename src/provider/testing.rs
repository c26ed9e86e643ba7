//! In-memory registrar used by the engine and resolver tests.
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::domeneshop::types::{DnsRecord, Domain, DomainServices, NewDnsRecord, RecordType};
use crate::error::{Error, Result};
use crate::registrar::Registrar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones,
    ListRecords(u64),
    Create(u64, NewDnsRecord),
    Update(u64, NewDnsRecord, NewDnsRecord),
    Delete(u64, NewDnsRecord),
}

#[derive(Debug, Default)]
pub struct FakeRegistrar {
    zones: Vec<Domain>,
    records: Mutex<BTreeMap<u64, Vec<DnsRecord>>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
    fail_zones: AtomicBool,
}

impl FakeRegistrar {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Default::default()
        }
    }

    fn push_zone(mut self, id: u64, name: &str, dns: bool) -> Self {
        self.zones.push(Domain {
            id,
            name: name.to_string(),
            services: DomainServices {
                dns,
                ..Default::default()
            },
            expiry_date: None,
            registered_date: None,
            registrant: None,
            renew: true,
            status: Some("active".into()),
            nameservers: Vec::new(),
        });
        self
    }

    pub fn with_zone(self, id: u64, name: &str) -> Self {
        self.push_zone(id, name, true)
    }

    pub fn with_disabled_zone(self, id: u64, name: &str) -> Self {
        self.push_zone(id, name, false)
    }

    pub fn with_record(self, zone_id: u64, host: &str, data: &str, rrtype: &str) -> Self {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .entry(zone_id)
            .or_default()
            .push(DnsRecord {
                id,
                host: host.to_string(),
                data: data.to_string(),
                ttl: 3600,
                rrtype: rrtype.to_string(),
                priority: None,
            });
        self
    }

    /// Make every zone listing fail like an unreachable API.
    pub fn fail_zone_listing(&self) {
        self.fail_zones.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the create, update and delete calls, in order.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ListZones | Call::ListRecords(_)))
            .collect()
    }

    pub fn records_of(&self, zone_id: u64) -> Vec<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_record(&self, zone_id: u64, host: &str, data: &str, rrtype: &str) -> bool {
        self.records_of(zone_id)
            .iter()
            .any(|r| r.matches(host, data, rrtype))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn simple_type(rrtype: &str) -> Result<()> {
    match rrtype.parse::<RecordType>()? {
        RecordType::Mx => Err(Error::unsupported("MX")),
        _ => Ok(()),
    }
}

#[async_trait]
impl Registrar for FakeRegistrar {
    async fn list_zones(&self) -> Result<Vec<Domain>> {
        self.record(Call::ListZones);
        if self.fail_zones.load(Ordering::SeqCst) {
            return Err(Error::Upstream {
                status: 503,
                body: "unavailable".into(),
            });
        }
        let zones: Vec<Domain> = self.zones.iter().filter(|z| z.services.dns).cloned().collect();
        if zones.is_empty() {
            return Err(Error::not_found("no domains with DNS service"));
        }
        Ok(zones)
    }

    async fn list_records(&self, zone_id: u64) -> Result<Vec<DnsRecord>> {
        self.record(Call::ListRecords(zone_id));
        let records = self.records_of(zone_id);
        if records.is_empty() {
            return Err(Error::not_found(format!("no records for domain {zone_id}")));
        }
        Ok(records)
    }

    async fn create_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()> {
        simple_type(&record.rrtype)?;
        self.record(Call::Create(zone.id, record.clone()));
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .entry(zone.id)
            .or_default()
            .push(DnsRecord {
                id,
                host: record.host.clone(),
                data: record.data.clone(),
                ttl: record.ttl,
                rrtype: record.rrtype.clone(),
                priority: None,
            });
        Ok(())
    }

    async fn update_record(
        &self,
        zone: &Domain,
        old: &NewDnsRecord,
        new: &NewDnsRecord,
    ) -> Result<()> {
        simple_type(&old.rrtype)?;
        simple_type(&new.rrtype)?;
        let existing = self
            .find_record(zone, &old.host, &old.data, &old.rrtype)
            .await?;
        self.record(Call::Update(zone.id, old.clone(), new.clone()));
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records
            .entry(zone.id)
            .or_default()
            .iter_mut()
            .find(|r| r.id == existing.id)
        {
            r.host = new.host.clone();
            r.data = new.data.clone();
            r.ttl = new.ttl;
            r.rrtype = new.rrtype.clone();
        }
        Ok(())
    }

    async fn delete_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()> {
        simple_type(&record.rrtype)?;
        let existing = self
            .find_record(zone, &record.host, &record.data, &record.rrtype)
            .await?;
        self.record(Call::Delete(zone.id, record.clone()));
        self.records
            .lock()
            .unwrap()
            .entry(zone.id)
            .or_default()
            .retain(|r| r.id != existing.id);
        Ok(())
    }
}
