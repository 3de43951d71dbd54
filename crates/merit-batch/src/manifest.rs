use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::job::{BatchJobRecord, JobStatus};

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchManifest {
    pub created_at: DateTime<Utc>,
    pub num_jobs: usize,
    pub success: usize,
    pub failure: usize,
    pub jobs: Vec<BatchJobRecord>,
}

impl BatchManifest {
    pub fn from_records(jobs: Vec<BatchJobRecord>) -> Self {
        let success = jobs.iter().filter(|record| record.status.is_ok()).count();
        Self {
            created_at: Utc::now(),
            num_jobs: jobs.len(),
            success,
            failure: jobs.len() - success,
            jobs,
        }
    }

    /// Number of jobs that finished with `status`
    pub fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|record| record.status == status).count()
    }
}

pub fn write_batch_manifest(path: &Path, manifest: &BatchManifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory '{}'", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(manifest).context("serializing batch manifest to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("writing batch manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_batch_manifest(path: &Path) -> Result<BatchManifest> {
    let file = fs::File::open(path)
        .with_context(|| format!("opening batch manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing batch manifest '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(job_id: &str, status: JobStatus) -> BatchJobRecord {
        BatchJobRecord {
            job_id: job_id.into(),
            payload: format!("{job_id}.json"),
            status,
            error: None,
            output: None,
            total_load: None,
            total_cost: None,
        }
    }

    #[test]
    fn manifest_counts_statuses() {
        let manifest = BatchManifest::from_records(vec![
            record("a", JobStatus::Ok),
            record("b", JobStatus::Infeasible),
            record("c", JobStatus::Ok),
        ]);
        assert_eq!(manifest.num_jobs, 3);
        assert_eq!(manifest.success, 2);
        assert_eq!(manifest.failure, 1);
        assert_eq!(manifest.count(JobStatus::Infeasible), 1);
    }

    #[test]
    fn manifest_writes_and_reads_back() {
        let manifest = BatchManifest::from_records(vec![record("payload1", JobStatus::Ok)]);
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("batch_manifest.json");
        write_batch_manifest(&path, &manifest).unwrap();

        let parsed = load_batch_manifest(&path).unwrap();
        assert_eq!(parsed.num_jobs, 1);
        assert_eq!(parsed.jobs[0].job_id, "payload1");
        assert_eq!(parsed.jobs[0].status, JobStatus::Ok);
    }
}
