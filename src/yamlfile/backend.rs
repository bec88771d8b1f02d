use std::io::{Read, Write};
use std::path::PathBuf;

use snafu::ResultExt;

use crate::common::{FileFormatSnafu, FileSnafu, Result};

use super::models::FileRecord;

const BACKEND_NAME: &str = "YAMLFile";

/// Parses a record file. Anything but a sequence of record mappings is
/// rejected as a whole.
pub fn parse_records(content: &str) -> Result<Vec<FileRecord>> {
    serde_yaml::from_str(content).context(FileFormatSnafu {
        message: "Records must be a sequence of HostName/RecordType/Address/MXPref/TTL mappings",
    })
}

pub fn render_records(records: &[FileRecord]) -> Result<String> {
    serde_yaml::to_string(records).context(FileFormatSnafu {
        message: "Failed to render records",
    })
}

/// The local side of a sync. Without a path, records are read from stdin and
/// written to the caller's output stream.
pub struct RecordFile {
    path: Option<PathBuf>,
}

impl RecordFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "stdio".to_string(),
        }
    }

    pub fn read_records(&self) -> Result<Vec<FileRecord>> {
        let content = match &self.path {
            Some(path) => std::fs::read_to_string(path).context(FileSnafu {
                message: format!("Failed to read records from {}", path.display()),
            })?,
            None => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context(FileSnafu {
                        message: "Failed to read records from stdin",
                    })?;
                content
            }
        };

        let records = parse_records(&content)?;

        tracing::info!(
            backend = BACKEND_NAME,
            file = self.describe(),
            records = records.len(),
            "Read completed",
        );
        Ok(records)
    }

    /// Renders the whole document before touching the destination, so a
    /// failed render leaves an existing file as it was.
    pub fn write_records(&self, records: &[FileRecord], out: &mut dyn Write) -> Result<()> {
        let rendered = render_records(records)?;

        match &self.path {
            Some(path) => std::fs::write(path, rendered).context(FileSnafu {
                message: format!("Failed to write records to {}", path.display()),
            })?,
            None => out.write_all(rendered.as_bytes()).context(FileSnafu {
                message: "Failed to write records to output",
            })?,
        }

        tracing::info!(
            backend = BACKEND_NAME,
            file = self.describe(),
            records = records.len(),
            "Write completed",
        );
        Ok(())
    }
}
