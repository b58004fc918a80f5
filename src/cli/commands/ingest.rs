//! Ingest command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::RosterError;
use crate::ingest::IngestPipeline;
use crate::record::Record;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// A roster file: either a bare list or `{"students": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Wrapped { students: Vec<Record> },
    Bare(Vec<Record>),
}

/// Read records from a JSON roster file.
pub fn read_records(path: &Path) -> crate::error::Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    let roster: RosterFile = serde_json::from_str(&content).map_err(|e| {
        RosterError::InvalidInput(format!(
            "{} is not a list of students: {}",
            path.display(),
            e
        ))
    })?;

    Ok(match roster {
        RosterFile::Wrapped { students } => students,
        RosterFile::Bare(students) => students,
    })
}

/// Run the ingest command.
pub async fn run_ingest(file: &str, settings: Settings) -> Result<()> {
    let path = Settings::expand_path(file);
    let records = read_records(&path)?;
    Output::info(&format!("Read {} students from {}", records.len(), path.display()));

    if let Err(e) = preflight::check(Operation::Ingest, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let pipeline = IngestPipeline::from_settings(&settings).await?;

    let spinner = Output::spinner("Embedding and indexing...");
    let result = pipeline.ingest(&records).await;
    spinner.finish_and_clear();

    match result {
        Ok(count) => {
            Output::success(&format!("Indexed {} students", count));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Ingestion failed: {}", e));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn roster(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_bare_and_wrapped() {
        let bare = roster(r#"[{"name":"Nguyen Van A"},{"name":"Le Van B"}]"#);
        assert_eq!(read_records(bare.path()).unwrap().len(), 2);

        let wrapped = roster(r#"{"students":[{"id":"sv01","skill":"Python"}]}"#);
        let records = read_records(wrapped.path()).unwrap();
        assert_eq!(records[0].id.as_deref(), Some("sv01"));
        assert_eq!(records[0].skill.as_deref(), Some("Python"));
    }

    #[test]
    fn test_read_rejects_non_list() {
        let file = roster(r#"{"students":"none"}"#);
        assert!(matches!(
            read_records(file.path()),
            Err(RosterError::InvalidInput(_))
        ));
    }
}
