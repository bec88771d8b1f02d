use crate::common::RecordType;

#[derive(Default, serde::Deserialize)]
pub(super) struct ApiErrors {
    #[serde(rename = "Error", default)]
    pub errors: Vec<ApiError>,
}

#[derive(serde::Deserialize)]
pub(super) struct ApiError {
    #[serde(rename = "@Number", default)]
    pub number: Option<String>,
    #[serde(rename = "$text", default)]
    pub message: String,
}

/// The `<ApiResponse>` envelope every command answers with.
#[derive(serde::Deserialize)]
pub(super) struct ApiResponse<T> {
    #[serde(rename = "@Status")]
    pub status: String,
    #[serde(rename = "Errors", default)]
    pub errors: ApiErrors,
    #[serde(rename = "CommandResponse")]
    pub command_response: Option<T>,
}

#[derive(serde::Deserialize)]
pub(super) struct GetHostsResponse {
    #[serde(rename = "DomainDNSGetHostsResult", default)]
    pub result: Option<GetHostsResult>,
}

#[derive(serde::Deserialize)]
pub(super) struct GetHostsResult {
    #[serde(rename = "@Domain", default)]
    pub domain: String,
    #[serde(rename = "host", default)]
    pub hosts: Vec<HostRecord>,
}

#[derive(serde::Deserialize)]
pub(super) struct SetHostsResponse {
    #[serde(rename = "DomainDNSSetHostsResult", default)]
    pub result: Option<SetHostsResult>,
}

#[derive(serde::Deserialize)]
pub(super) struct SetHostsResult {
    #[serde(rename = "@Domain", default)]
    pub domain: String,
    #[serde(rename = "@IsSuccess", default)]
    pub is_success: String,
}

/// One host record in the provider's shape. Values are kept as the
/// provider's strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct HostRecord {
    #[serde(rename = "@Name")]
    pub host_name: String,
    #[serde(rename = "@Type")]
    pub record_type: String,
    #[serde(rename = "@Address", default)]
    pub address: String,
    #[serde(rename = "@MXPref", default)]
    pub mx_pref: Option<String>,
    #[serde(rename = "@TTL", default)]
    pub ttl: Option<String>,
}

impl HostRecord {
    /// Numbered `setHosts` parameters for this record. Positions start at 1.
    fn push_params(&self, position: usize, params: &mut Vec<(String, String)>) {
        params.push((format!("HostName{position}"), self.host_name.clone()));
        params.push((format!("RecordType{position}"), self.record_type.clone()));
        params.push((format!("Address{position}"), self.address.clone()));
        if let Some(mx_pref) = &self.mx_pref {
            params.push((format!("MXPref{position}"), mx_pref.clone()));
        }
        if let Some(ttl) = &self.ttl {
            params.push((format!("TTL{position}"), ttl.clone()));
        }
    }
}

impl std::fmt::Display for HostRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.record_type, self.host_name, self.address)?;
        if let Some(mx_pref) = &self.mx_pref {
            write!(f, " MXPref={mx_pref}")?;
        }
        if let Some(ttl) = &self.ttl {
            write!(f, " TTL={ttl}")?;
        }
        Ok(())
    }
}

/// Everything a `setHosts` call submits besides credentials and the domain.
///
/// Mail records are only honoured when `EmailType` names their kind, so it is
/// derived from the set.
pub fn set_hosts_params(records: &[HostRecord]) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(records.len() * 5 + 1);

    let mut mail_kinds = records
        .iter()
        .filter_map(|record| record.record_type.parse::<RecordType>().ok())
        .filter(RecordType::is_mail);
    let email_type = mail_kinds.next();
    if let Some(kind) = email_type {
        if let Some(other) = mail_kinds.find(|other| *other != kind) {
            tracing::warn!(
                email_type = kind.as_str(),
                ignored = other.as_str(),
                "Record set mixes MX and MXE records, only one kind is honoured"
            );
        }
        params.push(("EmailType".to_string(), kind.to_string()));
    }

    for (index, record) in records.iter().enumerate() {
        record.push_params(index + 1, &mut params);
    }

    params
}
