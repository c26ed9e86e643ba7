//! external-dns webhook wire model: endpoints, change-sets and the domain
//! filter, with validation applied when a payload is decoded.
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::validation::{validate_dns_name, validate_record_type};

/// Media type external-dns negotiates for webhook requests and responses.
pub const MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    pub name: String,
    pub value: String,
}

/// A DNS name with one record type, one TTL and any number of targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub dns_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,
    pub record_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,
    #[serde(rename = "recordTTL", default)]
    pub record_ttl: u32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

impl Endpoint {
    pub fn new(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        record_ttl: u32,
        targets: Vec<String>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            targets,
            record_type: record_type.into(),
            set_identifier: String::new(),
            record_ttl,
            labels: BTreeMap::new(),
            provider_specific: Vec::new(),
        }
    }

    /// Name, type, TTL and target set all equal: applying `other` over `self`
    /// would change nothing.
    pub fn is_same(&self, other: &Endpoint) -> bool {
        self.dns_name == other.dns_name
            && self.record_type == other.record_type
            && self.record_ttl == other.record_ttl
            && same_targets(&self.targets, &other.targets)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dns_name(&self.dns_name)
            .and_then(|_| validate_record_type(&self.record_type))
            .map_err(|e| Error::malformed(format!("endpoint '{}': {e}", self.dns_name)))
    }
}

/// Targets compared as a multiset, ignoring ASCII case.
fn same_targets(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let normalize = |targets: &[String]| {
        let mut out: Vec<String> = targets.iter().map(|t| t.to_ascii_lowercase()).collect();
        out.sort();
        out
    };
    normalize(a) == normalize(b)
}

/// A batch of desired changes. `update_old[i]` is replaced by `update_new[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(rename = "Create", default, deserialize_with = "null_as_default")]
    pub create: Vec<Endpoint>,
    #[serde(rename = "UpdateOld", default, deserialize_with = "null_as_default")]
    pub update_old: Vec<Endpoint>,
    #[serde(rename = "UpdateNew", default, deserialize_with = "null_as_default")]
    pub update_new: Vec<Endpoint>,
    #[serde(rename = "Delete", default, deserialize_with = "null_as_default")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.update_old.is_empty()
            && self.update_new.is_empty()
            && self.delete.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.update_old.len() != self.update_new.len() {
            return Err(Error::malformed(format!(
                "UpdateOld has {} entries but UpdateNew has {}",
                self.update_old.len(),
                self.update_new.len()
            )));
        }
        self.create
            .iter()
            .chain(&self.update_old)
            .chain(&self.update_new)
            .chain(&self.delete)
            .try_for_each(Endpoint::validate)
    }
}

/// Domains this webhook is responsible for, reported during negotiation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl DomainFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        let clean = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|d| d.trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect()
        };
        Self {
            include: clean(include),
            exclude: clean(exclude),
        }
    }

    /// An empty include list matches everything; exclusions always win.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        let covers = |domain: &String| {
            name == *domain
                || name
                    .strip_suffix(domain.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        };
        (self.include.is_empty() || self.include.iter().any(covers))
            && !self.exclude.iter().any(covers)
    }
}

/// Decode a change-set body and validate it.
pub fn decode_changes(body: &[u8]) -> Result<Changes> {
    let changes: Changes = decode(body)?;
    changes.validate()?;
    Ok(changes)
}

/// Decode a list of endpoints and validate each.
pub fn decode_endpoints(body: &[u8]) -> Result<Vec<Endpoint>> {
    let endpoints: Vec<Endpoint> = decode(body)?;
    endpoints.iter().try_for_each(Endpoint::validate)?;
    Ok(endpoints)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::malformed(e.to_string()))
}

// Go encodes nil slices and maps as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
