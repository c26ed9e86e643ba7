use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Host value the registrar uses for records at the zone apex.
pub const APEX_HOST: &str = "@";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    #[serde(rename = "domain")]
    pub name: String, // "example.com"
    #[serde(default)]
    pub services: DomainServices,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub registered_date: Option<String>,
    #[serde(default)]
    pub registrant: Option<String>,
    #[serde(default)]
    pub renew: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub nameservers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainServices {
    /// Domains without the DNS service cannot carry records.
    #[serde(default)]
    pub dns: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub registrar: bool,
    #[serde(default)]
    pub webhotel: Option<String>,
}

/// A record as stored at the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: u64,
    #[serde(default)]
    pub host: String, // "www", "@" for apex
    pub data: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(rename = "type")]
    pub rrtype: String, // "A", "NS", ...
    #[serde(default, deserialize_with = "de_priority")]
    pub priority: Option<String>,
}

impl DnsRecord {
    /// Match on (host, data, type), treating "" and "@" as the same apex host.
    pub fn matches(&self, host: &str, data: &str, rrtype: &str) -> bool {
        same_host(&self.host, host) && self.data == data && self.rrtype == rrtype
    }
}

/// Minimal record body used for create and replace calls. The registrar
/// assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDnsRecord {
    pub host: String, // relative to the zone, "" for apex
    pub data: String,
    pub ttl: u32,
    #[serde(rename = "type")]
    pub rrtype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl NewDnsRecord {
    /// Copy of this record as it goes on the wire: apex host spelled "@".
    pub fn to_wire(&self) -> NewDnsRecord {
        let host = if is_apex(&self.host) {
            APEX_HOST.to_string()
        } else {
            self.host.clone()
        };
        NewDnsRecord {
            host,
            ..self.clone()
        }
    }
}

pub fn is_apex(host: &str) -> bool {
    host.is_empty() || host == APEX_HOST
}

fn same_host(a: &str, b: &str) -> bool {
    a == b || (is_apex(a) && is_apex(b))
}

/// Record types this adapter manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
}

impl RecordType {
    pub const ALL: [RecordType; 5] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Txt,
        RecordType::Mx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Mx => "MX",
        }
    }

    pub fn is_supported(rrtype: &str) -> bool {
        rrtype.parse::<RecordType>().is_ok()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::unsupported(s))
    }
}

// The API has been seen returning MX priority both as a number and a string.
fn de_priority<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Num(n) => n.to_string(),
        Raw::Str(s) => s,
    }))
}
