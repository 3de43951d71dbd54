use crate::job::{BatchJob, BatchJobRecord, JobStatus};
use crate::manifest::{write_batch_manifest, BatchManifest};
use anyhow::{Context, Result};
use merit_algo::{plan_production, DispatchConfig, ProductionPlan};
use merit_core::{LoadRequest, MeritError};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the per-job production plan
pub const PLAN_FILE: &str = "plan.json";
/// File name of the batch manifest under the output root
pub const MANIFEST_FILE: &str = "batch_manifest.json";

pub struct BatchRunnerConfig {
    pub jobs: Vec<BatchJob>,
    pub output_root: PathBuf,
    pub dispatch: DispatchConfig,
    /// Worker threads; 0 uses one per CPU
    pub threads: usize,
}

/// Summary returned after the run so clients can log success/failure counts and manifest location.
pub struct BatchSummary {
    pub success: usize,
    pub failure: usize,
    pub manifest_path: PathBuf,
    pub jobs: Vec<BatchJobRecord>,
}

pub fn run_batch(config: &BatchRunnerConfig) -> Result<BatchSummary> {
    fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "creating batch output root '{}'",
            config.output_root.display()
        )
    })?;

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building Rayon thread pool for batch runs")?;
    info!(
        jobs = config.jobs.len(),
        threads = thread_count,
        "starting batch"
    );

    // Each job owns its request and fleet; nothing is shared across workers.
    let job_records: Vec<BatchJobRecord> = pool.install(|| {
        config
            .jobs
            .par_iter()
            .map(|job| run_job(job, config))
            .collect()
    });

    let manifest = BatchManifest::from_records(job_records);
    let manifest_path = config.output_root.join(MANIFEST_FILE);
    write_batch_manifest(&manifest_path, &manifest)?;
    info!(
        success = manifest.success,
        failure = manifest.failure,
        manifest = %manifest_path.display(),
        "batch finished"
    );

    Ok(BatchSummary {
        success: manifest.success,
        failure: manifest.failure,
        manifest_path,
        jobs: manifest.jobs,
    })
}

/// Plan one payload and write `<output_root>/<job_id>/plan.json`.
fn run_job(job: &BatchJob, config: &BatchRunnerConfig) -> BatchJobRecord {
    let output_file = config.output_root.join(&job.job_id).join(PLAN_FILE);

    let runner = || -> Result<ProductionPlan> {
        let request = LoadRequest::from_path(&job.payload)
            .with_context(|| format!("reading payload '{}'", job.payload.display()))?;
        let plan = plan_production(&request, &config.dispatch)?;
        write_plan(&output_file, &plan)?;
        Ok(plan)
    };

    match runner() {
        Ok(plan) => BatchJobRecord {
            job_id: job.job_id.clone(),
            payload: job.payload.display().to_string(),
            status: JobStatus::Ok,
            error: None,
            output: Some(output_file.display().to_string()),
            total_load: Some(plan.total_load.value()),
            total_cost: Some(plan.total_cost.value()),
        },
        Err(err) => {
            let status = classify(&err);
            warn!(job = %job.job_id, status = status.as_str(), "batch job failed: {err:#}");
            BatchJobRecord {
                job_id: job.job_id.clone(),
                payload: job.payload.display().to_string(),
                status,
                error: Some(format!("{err:#}")),
                output: None,
                total_load: None,
                total_cost: None,
            }
        }
    }
}

fn write_plan(path: &Path, plan: &ProductionPlan) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating job directory '{}'", parent.display()))?;
    }
    let json = plan.to_json().context("serializing production plan to JSON")?;
    fs::write(path, json).with_context(|| format!("writing plan '{}'", path.display()))?;
    Ok(())
}

/// Map a job failure onto its manifest status.
pub fn classify(err: &anyhow::Error) -> JobStatus {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MeritError>())
        .map(|merit| JobStatus::from(merit.kind()))
        .unwrap_or(JobStatus::Error)
}
