use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use merit_core::ErrorKind;

/// Outcome of one batch job, as recorded in the manifest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Ok,
    Infeasible,
    Invalid,
    Timeout,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Ok => "ok",
            JobStatus::Infeasible => "infeasible",
            JobStatus::Invalid => "invalid",
            JobStatus::Timeout => "timeout",
            JobStatus::Error => "error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, JobStatus::Ok)
    }
}

impl From<ErrorKind> for JobStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => JobStatus::Invalid,
            ErrorKind::Infeasible => JobStatus::Infeasible,
            ErrorKind::Timeout => JobStatus::Timeout,
            ErrorKind::Other => JobStatus::Error,
        }
    }
}

/// One request file to plan
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub job_id: String,
    pub payload: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJobRecord {
    pub job_id: String,
    pub payload: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub output: Option<String>,
    pub total_load: Option<f64>,
    pub total_cost: Option<f64>,
}

/// Build one job per payload file.
///
/// Job ids come from the file stem; repeated stems get a `-2`, `-3`, ...
/// suffix so every job writes to its own directory.
pub fn jobs_from_paths(paths: &[PathBuf]) -> Vec<BatchJob> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    paths
        .iter()
        .map(|path| {
            let stem = job_stem(path);
            let count = seen.entry(stem.clone()).or_insert(0);
            *count += 1;
            let job_id = if *count == 1 {
                stem
            } else {
                format!("{stem}-{count}")
            };
            BatchJob {
                job_id,
                payload: path.clone(),
            }
        })
        .collect()
}

fn job_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "job".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_from_paths_uses_file_stems() {
        let paths = vec![
            PathBuf::from("in/payload1.json"),
            PathBuf::from("in/payload2.json"),
        ];
        let jobs = jobs_from_paths(&paths);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_id, "payload1");
        assert_eq!(jobs[1].job_id, "payload2");
        assert_eq!(jobs[1].payload, PathBuf::from("in/payload2.json"));
    }

    #[test]
    fn repeated_stems_get_suffixes() {
        let paths = vec![
            PathBuf::from("a/plan.json"),
            PathBuf::from("b/plan.json"),
            PathBuf::from("c/plan.json"),
        ];
        let ids: Vec<String> = jobs_from_paths(&paths).into_iter().map(|j| j.job_id).collect();
        assert_eq!(ids, vec!["plan", "plan-2", "plan-3"]);
    }

    #[test]
    fn status_follows_error_kind() {
        assert_eq!(JobStatus::from(ErrorKind::Validation), JobStatus::Invalid);
        assert_eq!(JobStatus::from(ErrorKind::Timeout), JobStatus::Timeout);
        assert_eq!(
            serde_json::to_string(&JobStatus::Infeasible).unwrap(),
            "\"infeasible\""
        );
    }
}
