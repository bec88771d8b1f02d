use std::time::Duration;

use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::common::{
    key_file_or_string, Domain, Provider, ProviderSnafu, ResponseSnafu, Result, TransportSnafu,
};

use super::models::{
    set_hosts_params, ApiError, ApiResponse, GetHostsResponse, HostRecord, SetHostsResponse,
    SetHostsResult,
};

pub const API_URL: &str = "https://api.namecheap.com/xml.response";
pub const SANDBOX_API_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

pub const PROVIDER_NAME: &str = "Namecheap";

const GET_HOSTS: &str = "namecheap.domains.dns.getHosts";
const SET_HOSTS: &str = "namecheap.domains.dns.setHosts";

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

fn process_errors(command: &str, status: &str, errors: Vec<ApiError>) -> Result<()> {
    if status != "OK" || !errors.is_empty() {
        let mut err_msg: String = String::new();
        for err in errors {
            match err.number {
                Some(number) => err_msg.push_str(&format!("{number} {}; ", err.message.trim())),
                None => err_msg.push_str(&format!("{}; ", err.message.trim())),
            }
        }
        if err_msg.is_empty() {
            err_msg = format!("status {status}");
        }
        return ProviderSnafu {
            command,
            message: err_msg.trim_end_matches("; "),
        }
        .fail();
    }
    Ok(())
}

/// `setHosts` can answer `Status="OK"` and still report the replacement as
/// failed.
fn process_set_hosts_result(result: &SetHostsResult) -> Result<()> {
    if !result.is_success.eq_ignore_ascii_case("true") {
        return ProviderSnafu {
            command: SET_HOSTS,
            message: format!("Replacing records of {} was not successful", result.domain),
        }
        .fail();
    }
    Ok(())
}

pub struct Namecheap {
    api_user: String,
    user_name: String,
    api_key: String,
    client_ip: String,
    api_url: url::Url,
    retries: usize,
}

impl Namecheap {
    /// POSTs the form, retrying transport failures. HTTP error statuses are
    /// returned straight away.
    fn post(&self, command: &str, form: &[(&str, &str)]) -> Result<String> {
        let url = self.api_url.as_str();
        let mut attempt = 0;
        loop {
            tracing::debug!(
                url = url,
                method = "POST",
                provider = PROVIDER_NAME,
                command = command,
                attempt = attempt,
                "Sending request"
            );
            match ureq::post(url).send_form(form) {
                Ok(resp) => {
                    return resp.into_string().boxed_local().context(ResponseSnafu {
                        message: format!("Failed to read {command} response"),
                    })
                }
                Err(err @ ureq::Error::Transport(_)) if attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(
                        provider = PROVIDER_NAME,
                        command = command,
                        attempt = attempt,
                        error = %err,
                        "Request failed, retrying"
                    );
                    std::thread::sleep(RETRY_BACKOFF * attempt as u32);
                }
                Err(err) => {
                    return Err(err).context(TransportSnafu {
                        url,
                        method: "POST",
                    })
                }
            }
        }
    }

    fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        domain: &Domain,
        params: &[(String, String)],
    ) -> Result<Option<T>> {
        let mut form: Vec<(&str, &str)> = vec![
            ("ApiUser", self.api_user.as_str()),
            ("UserName", self.user_name.as_str()),
            ("ApiKey", self.api_key.as_str()),
            ("ClientIP", self.client_ip.as_str()),
            ("Command", command),
            ("SLD", domain.sld.as_str()),
            ("TLD", domain.tld.as_str()),
        ];
        form.extend(params.iter().map(|(key, value)| (key.as_str(), value.as_str())));

        let body = self.post(command, &form)?;
        let resp: ApiResponse<T> = quick_xml::de::from_str(&body)
            .boxed_local()
            .context(ResponseSnafu {
                message: format!("Failed to deserialize {command} response"),
            })?;

        process_errors(command, &resp.status, resp.errors.errors)?;

        Ok(resp.command_response)
    }
}

impl Provider for Namecheap {
    fn list_records(&self, domain: &Domain) -> Result<Vec<HostRecord>> {
        let result = self
            .call::<GetHostsResponse>(GET_HOSTS, domain, &[])?
            .and_then(|resp| resp.result)
            .context(ProviderSnafu {
                command: GET_HOSTS,
                message: "Response has no host listing",
            })?;

        tracing::info!(
            provider = PROVIDER_NAME,
            domain = %result.domain,
            records = result.hosts.len(),
            "Read completed",
        );

        Ok(result.hosts)
    }

    fn replace_records(&self, domain: &Domain, records: &[HostRecord]) -> Result<()> {
        tracing::info!(
            provider = PROVIDER_NAME,
            domain = %domain,
            records = records.len(),
            "Replacing records",
        );

        let result = self
            .call::<SetHostsResponse>(SET_HOSTS, domain, &set_hosts_params(records))?
            .and_then(|resp| resp.result)
            .context(ProviderSnafu {
                command: SET_HOSTS,
                message: "Response has no result",
            })?;

        process_set_hosts_result(&result)?;

        tracing::info!(
            provider = PROVIDER_NAME,
            domain = %result.domain,
            records = records.len(),
            "Write completed",
        );

        Ok(())
    }
}

impl TryFrom<crate::Config> for Namecheap {
    type Error = crate::common::Error;

    fn try_from(value: crate::Config) -> Result<Self> {
        let api_key = key_file_or_string(value.api_key, "ApiKey")?;
        let api_url = match (value.api_url, value.sandbox) {
            (Some(url), _) => url,
            (None, sandbox) => {
                let url = if sandbox { SANDBOX_API_URL } else { API_URL };
                url::Url::parse(url).map_err(|err| {
                    crate::common::ConfigSnafu {
                        message: format!("Invalid API URL {url}: {err}"),
                        prefix: "ApiUrl",
                    }
                    .build()
                })?
            }
        };

        Ok(Self {
            api_user: value.api_user,
            user_name: value.user_name,
            api_key,
            client_ip: value.client_ip,
            api_url,
            retries: value.retries,
        })
    }
}
