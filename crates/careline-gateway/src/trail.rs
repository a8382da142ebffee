// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text audit trail of webhook exchanges.
//!
//! One line per call: `{timestamp}: {sender} - {inbound} - {outbound}`.
//! Line breaks inside the texts are escaped so every exchange stays on a
//! single line.

use std::path::{Path, PathBuf};

use careline_core::CarelineError;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

/// Append-only trail file.
#[derive(Debug, Clone)]
pub struct AuditTrail {
    path: PathBuf,
}

fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Renders one trail line, including the trailing newline.
pub fn format_line(at: DateTime<Utc>, sender: &str, inbound: &str, outbound: &str) -> String {
    format!(
        "{}: {} - {} - {}\n",
        at.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        escape_line_breaks(sender),
        escape_line_breaks(inbound),
        escape_line_breaks(outbound)
    )
}

impl AuditTrail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one exchange. The line is written with a single `write_all`
    /// on an append-mode handle, so concurrent writers never interleave
    /// partial lines.
    pub async fn record(
        &self,
        sender: &str,
        inbound: &str,
        outbound: &str,
    ) -> Result<(), CarelineError> {
        let line = format_line(Utc::now(), sender, inbound, outbound);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| CarelineError::Storage {
                source: Box::new(e),
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| CarelineError::Storage {
                source: Box::new(e),
            })?;
        file.flush().await.map_err(|e| CarelineError::Storage {
            source: Box::new(e),
        })
    }
}
