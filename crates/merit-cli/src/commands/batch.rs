use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use merit_algo::DispatchConfig;
use merit_batch::{jobs_from_paths, run_batch, BatchRunnerConfig};

pub fn handle(
    payloads: &[PathBuf],
    out: &Path,
    dispatch: DispatchConfig,
    threads: usize,
) -> Result<()> {
    let config = BatchRunnerConfig {
        jobs: jobs_from_paths(payloads),
        output_root: out.to_path_buf(),
        dispatch,
        threads,
    };
    let summary = run_batch(&config)?;

    for job in &summary.jobs {
        match &job.error {
            Some(error) => println!("{}\t{}\t{}", job.job_id, job.status.as_str(), error),
            None => println!("{}\t{}", job.job_id, job.status.as_str()),
        }
    }
    println!(
        "Batch: {} ok, {} failed; manifest {}",
        summary.success,
        summary.failure,
        summary.manifest_path.display()
    );

    if summary.failure > 0 {
        bail!(
            "{} of {} batch jobs failed",
            summary.failure,
            summary.jobs.len()
        );
    }
    Ok(())
}
