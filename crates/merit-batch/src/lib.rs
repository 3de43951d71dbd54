pub mod job;
pub mod manifest;
pub mod runner;

pub use job::{jobs_from_paths, BatchJob, BatchJobRecord, JobStatus};
pub use manifest::{load_batch_manifest, write_batch_manifest, BatchManifest};
pub use runner::{classify, run_batch, BatchRunnerConfig, BatchSummary, MANIFEST_FILE, PLAN_FILE};
