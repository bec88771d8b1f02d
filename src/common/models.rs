use std::str::FromStr;

use crate::namecheap::HostRecord;

use super::{InvalidDomainSnafu, ValidationFailure};

/// TTL the provider applies to records submitted without one.
pub const DEFAULT_TTL: u32 = 1800;
pub const MIN_TTL: u32 = 60;
pub const MAX_TTL: u32 = 60000;

/// Host record types accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Caa,
    Cname,
    Frame,
    Mx,
    Mxe,
    Ns,
    Txt,
    Url,
    Url301,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Alias => "ALIAS",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Frame => "FRAME",
            RecordType::Mx => "MX",
            RecordType::Mxe => "MXE",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Url => "URL",
            RecordType::Url301 => "URL301",
        }
    }

    /// MX and MXE records are the only ones carrying a preference.
    pub fn is_mail(&self) -> bool {
        matches!(self, RecordType::Mx | RecordType::Mxe)
    }
}

impl FromStr for RecordType {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "ALIAS" => RecordType::Alias,
            "CAA" => RecordType::Caa,
            "CNAME" => RecordType::Cname,
            "FRAME" => RecordType::Frame,
            "MX" => RecordType::Mx,
            "MXE" => RecordType::Mxe,
            "NS" => RecordType::Ns,
            "TXT" => RecordType::Txt,
            "URL" => RecordType::Url,
            "URL301" => RecordType::Url301,
            _ => return Err(ValidationFailure::UnknownRecordType),
        })
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The legal field set of a record, per record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(String),
    Aaaa(String),
    Alias(String),
    Caa(String),
    Cname(String),
    Frame(String),
    Mx { address: String, preference: u16 },
    Mxe { address: String, preference: u16 },
    Ns(String),
    Txt(String),
    Url(String),
    Url301(String),
}

impl RecordData {
    /// Builds the variant for `kind`. `mx_pref` is only read for MX and MXE,
    /// where it is required.
    pub fn new(
        kind: RecordType,
        address: String,
        mx_pref: Option<&str>,
    ) -> Result<Self, ValidationFailure> {
        let preference = || -> Result<u16, ValidationFailure> {
            mx_pref
                .and_then(|pref| pref.trim().parse::<u16>().ok())
                .ok_or(ValidationFailure::MissingMxPref)
        };

        Ok(match kind {
            RecordType::A => RecordData::A(address),
            RecordType::Aaaa => RecordData::Aaaa(address),
            RecordType::Alias => RecordData::Alias(address),
            RecordType::Caa => RecordData::Caa(address),
            RecordType::Cname => RecordData::Cname(address),
            RecordType::Frame => RecordData::Frame(address),
            RecordType::Mx => RecordData::Mx {
                address,
                preference: preference()?,
            },
            RecordType::Mxe => RecordData::Mxe {
                address,
                preference: preference()?,
            },
            RecordType::Ns => RecordData::Ns(address),
            RecordType::Txt => RecordData::Txt(address),
            RecordType::Url => RecordData::Url(address),
            RecordType::Url301 => RecordData::Url301(address),
        })
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::Aaaa,
            RecordData::Alias(_) => RecordType::Alias,
            RecordData::Caa(_) => RecordType::Caa,
            RecordData::Cname(_) => RecordType::Cname,
            RecordData::Frame(_) => RecordType::Frame,
            RecordData::Mx { .. } => RecordType::Mx,
            RecordData::Mxe { .. } => RecordType::Mxe,
            RecordData::Ns(_) => RecordType::Ns,
            RecordData::Txt(_) => RecordType::Txt,
            RecordData::Url(_) => RecordType::Url,
            RecordData::Url301(_) => RecordType::Url301,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            RecordData::A(address)
            | RecordData::Aaaa(address)
            | RecordData::Alias(address)
            | RecordData::Caa(address)
            | RecordData::Cname(address)
            | RecordData::Frame(address)
            | RecordData::Ns(address)
            | RecordData::Txt(address)
            | RecordData::Url(address)
            | RecordData::Url301(address) => address,
            RecordData::Mx { address, .. } | RecordData::Mxe { address, .. } => address,
        }
    }

    pub fn mx_pref(&self) -> Option<u16> {
        match self {
            RecordData::Mx { preference, .. } | RecordData::Mxe { preference, .. } => {
                Some(*preference)
            }
            _ => None,
        }
    }
}

/// A validated host record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub host_name: String,
    pub ttl: Option<u32>,
    pub data: RecordData,
}

impl From<Record> for HostRecord {
    fn from(value: Record) -> Self {
        Self {
            host_name: value.host_name,
            record_type: value.data.record_type().to_string(),
            address: value.data.address().to_string(),
            mx_pref: value.data.mx_pref().map(|pref| pref.to_string()),
            ttl: value.ttl.map(|ttl| ttl.to_string()),
        }
    }
}

/// A domain split into its second and top level parts, the way the provider
/// addresses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub sld: String,
    pub tld: String,
}

impl FromStr for Domain {
    type Err = super::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('.').split_once('.') {
            Some((sld, tld)) if !sld.is_empty() && !tld.is_empty() => Ok(Self {
                sld: sld.to_string(),
                tld: tld.to_string(),
            }),
            _ => InvalidDomainSnafu { domain: s }.fail(),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.sld, self.tld)
    }
}

/// The provider side of a sync. The only write is a replacement of the
/// entire record set.
pub trait Provider {
    fn list_records(&self, domain: &Domain) -> super::Result<Vec<HostRecord>>;
    fn replace_records(&self, domain: &Domain, records: &[HostRecord]) -> super::Result<()>;
}
