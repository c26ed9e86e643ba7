use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domeneshop::types::*;
use crate::error::{Error, Result};
use crate::registrar::Registrar;

pub const DEFAULT_API_URL: &str = "https://api.domeneshop.no/v0";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("domeneshop-webhook/v", env!("CARGO_PKG_VERSION"));

/// Client for the Domeneshop REST API (https://api.domeneshop.no/docs/).
#[derive(Clone)]
pub struct DomeneshopClient {
    http: Client,
    base_url: String, // e.g. "https://api.domeneshop.no/v0"
    token: String,
    secret: String,
    mx_as_txt: bool,
}

impl fmt::Debug for DomeneshopClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomeneshopClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("mx_as_txt", &self.mx_as_txt)
            .finish()
    }
}

impl DomeneshopClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            secret: secret.into(),
            mx_as_txt: false,
        })
    }

    /// Submit MX creates with wire type TXT, as older registrar integrations
    /// did. Without this every MX operation is rejected.
    pub fn with_mx_as_txt(mut self, enabled: bool) -> Self {
        self.mx_as_txt = enabled;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send an authenticated request and turn non-2xx answers into
    /// `Error::Upstream` carrying the status and body verbatim.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&NewDnsRecord>,
    ) -> Result<reqwest::Response> {
        debug!(%method, path, "domeneshop request");
        let mut req = self
            .http
            .request(method, self.url(path))
            .basic_auth(&self.token, Some(&self.secret));
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.request(Method::GET, path, None).await?;
        Ok(res.json::<T>().await?)
    }

    /// Wire body for a create, or `UnsupportedType` before any network call.
    fn create_body(&self, record: &NewDnsRecord) -> Result<NewDnsRecord> {
        match record.rrtype.parse::<RecordType>()? {
            RecordType::Mx if self.mx_as_txt => Ok(NewDnsRecord {
                rrtype: RecordType::Txt.to_string(),
                ..record.to_wire()
            }),
            RecordType::Mx => Err(Error::unsupported("MX")),
            _ => Ok(NewDnsRecord {
                priority: None,
                ..record.to_wire()
            }),
        }
    }
}

/// Only the simple types can be looked up and replaced.
fn require_simple_type(rrtype: &str) -> Result<RecordType> {
    match rrtype.parse::<RecordType>()? {
        RecordType::Mx => Err(Error::unsupported("MX")),
        t => Ok(t),
    }
}

#[async_trait]
impl Registrar for DomeneshopClient {
    async fn list_zones(&self) -> Result<Vec<Domain>> {
        let domains: Vec<Domain> = self.get_json("domains").await?;
        let zones: Vec<Domain> = domains.into_iter().filter(|d| d.services.dns).collect();
        if zones.is_empty() {
            return Err(Error::not_found("no domains with DNS service"));
        }
        Ok(zones)
    }

    async fn list_records(&self, zone_id: u64) -> Result<Vec<DnsRecord>> {
        let records: Vec<DnsRecord> = self.get_json(&format!("domains/{zone_id}/dns")).await?;
        if records.is_empty() {
            return Err(Error::not_found(format!("no records for domain {zone_id}")));
        }
        Ok(records)
    }

    async fn create_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()> {
        let body = self.create_body(record)?;
        self.request(
            Method::POST,
            &format!("domains/{}/dns", zone.id),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn update_record(
        &self,
        zone: &Domain,
        old: &NewDnsRecord,
        new: &NewDnsRecord,
    ) -> Result<()> {
        require_simple_type(&old.rrtype)?;
        require_simple_type(&new.rrtype)?;

        let existing = self
            .find_record(zone, &old.host, &old.data, &old.rrtype)
            .await?;
        let body = NewDnsRecord {
            priority: None,
            ..new.to_wire()
        };
        self.request(
            Method::PUT,
            &format!("domains/{}/dns/{}", zone.id, existing.id),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn delete_record(&self, zone: &Domain, record: &NewDnsRecord) -> Result<()> {
        require_simple_type(&record.rrtype)?;

        let existing = self
            .find_record(zone, &record.host, &record.data, &record.rrtype)
            .await?;
        self.request(
            Method::DELETE,
            &format!("domains/{}/dns/{}", zone.id, existing.id),
            None,
        )
        .await?;
        Ok(())
    }
}
