use std::io::Write;

use snafu::ResultExt;

use crate::common::{diff_records, Domain, FileSnafu, Provider, Result};
use crate::namecheap::set_hosts_params;
use crate::translate::{to_file_format, to_provider_format};
use crate::yamlfile::{render_records, RecordFile};

pub struct DNSSync {
    provider: Box<dyn Provider>,
}

impl DNSSync {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Fetches the domain's records and writes them to `file`. On a dry run
    /// the document goes to `out` and the file is left alone.
    pub fn export(
        &self,
        domain: &Domain,
        file: &RecordFile,
        dry_run: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let hosts = self.provider.list_records(domain)?;

        let mut records = to_file_format(hosts);
        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        if dry_run {
            let rendered = render_records(&records)?;
            out.write_all(rendered.as_bytes()).context(FileSnafu {
                message: "Failed to write dry run output",
            })?;
            tracing::info!(
                domain = %domain,
                records = records.len(),
                "Dry run completed",
            );
            return Ok(());
        }

        file.write_records(&records, out)
    }

    /// Replaces the domain's records with the contents of `file`.
    ///
    /// The whole file is validated before the provider is contacted. Changes
    /// against the current records are reported, and the replacement is
    /// skipped when there are none. A dry run writes the changes and the
    /// request parameters to `out` instead of replacing anything.
    pub fn import(
        &self,
        domain: &Domain,
        file: &RecordFile,
        dry_run: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let desired = to_provider_format(file.read_records()?)?;

        let current = self.provider.list_records(domain)?;
        let diff = diff_records(&to_file_format(current), &to_file_format(desired.clone()));

        for record in &diff.delete {
            tracing::info!(domain = %domain, record = %record, "Removing record");
        }
        for record in &diff.create {
            tracing::info!(domain = %domain, record = %record, "Adding record");
        }

        if dry_run {
            let mut report = String::new();
            for record in &diff.delete {
                report.push_str(&format!("Removing {record}\n"));
            }
            for record in &diff.create {
                report.push_str(&format!("Adding {record}\n"));
            }
            for (key, value) in set_hosts_params(&desired) {
                report.push_str(&format!("{key}={value}\n"));
            }
            out.write_all(report.as_bytes()).context(FileSnafu {
                message: "Failed to write dry run output",
            })?;

            tracing::info!(
                domain = %domain,
                create = diff.create.len(),
                delete = diff.delete.len(),
                records = desired.len(),
                "Dry run completed",
            );
            return Ok(());
        }

        // Short circuit on no changes
        if diff.is_empty() {
            tracing::info!(domain = %domain, "No changes detected");
            return Ok(());
        }

        tracing::info!(
            domain = %domain,
            create = diff.create.len(),
            delete = diff.delete.len(),
            "Applying changes",
        );
        self.provider.replace_records(domain, &desired)
    }
}
