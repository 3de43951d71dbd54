use std::fs;
use std::path::PathBuf;

use merit_batch::{
    jobs_from_paths, load_batch_manifest, run_batch, BatchRunnerConfig, JobStatus, PLAN_FILE,
};
use merit_algo::DispatchConfig;
use tempfile::tempdir;

fn reference_payload(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test_data/payloads")
        .join(name)
}

#[test]
fn batch_plans_each_payload_and_writes_manifest() {
    let scratch = tempdir().unwrap();
    let infeasible = scratch.path().join("huge.json");
    let payload1 = fs::read_to_string(reference_payload("payload1.json")).unwrap();
    fs::write(&infeasible, payload1.replace("\"load\": 480", "\"load\": 10000")).unwrap();
    let invalid = scratch.path().join("negative.json");
    fs::write(&invalid, payload1.replace("\"load\": 480", "\"load\": -1")).unwrap();
    let garbage = scratch.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();

    let paths = vec![
        reference_payload("payload1.json"),
        reference_payload("payload2.json"),
        reference_payload("payload3.json"),
        infeasible,
        invalid,
        garbage,
        scratch.path().join("missing.json"),
    ];
    let out = scratch.path().join("out");
    let config = BatchRunnerConfig {
        jobs: jobs_from_paths(&paths),
        output_root: out.clone(),
        dispatch: DispatchConfig::default(),
        threads: 2,
    };

    let summary = run_batch(&config).unwrap();
    assert_eq!(summary.success, 3);
    assert_eq!(summary.failure, 4);

    let statuses: Vec<JobStatus> = summary.jobs.iter().map(|job| job.status).collect();
    assert_eq!(
        statuses,
        vec![
            JobStatus::Ok,
            JobStatus::Ok,
            JobStatus::Ok,
            JobStatus::Infeasible,
            JobStatus::Invalid,
            JobStatus::Invalid,
            JobStatus::Error,
        ]
    );

    let plan_path = out.join("payload2").join(PLAN_FILE);
    let plan: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
    let records = plan.as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["name"], "gasfiredbig1");
    assert!((records[0]["load"].as_f64().unwrap() - 380.0).abs() < 1e-6);
    assert!(!out.join("huge").join(PLAN_FILE).exists());

    let manifest = load_batch_manifest(&summary.manifest_path).unwrap();
    assert_eq!(manifest.num_jobs, 7);
    assert_eq!(manifest.count(JobStatus::Invalid), 2);
    assert!(manifest.jobs[3].error.as_deref().unwrap().contains("unable to allocate"));
}

#[test]
fn zero_threads_uses_all_cpus() {
    let scratch = tempdir().unwrap();
    let config = BatchRunnerConfig {
        jobs: jobs_from_paths(&[reference_payload("payload3.json")]),
        output_root: scratch.path().to_path_buf(),
        dispatch: DispatchConfig::default(),
        threads: 0,
    };
    let summary = run_batch(&config).unwrap();
    assert_eq!(summary.success, 1);
    assert!(scratch.path().join("payload3").join(PLAN_FILE).exists());
}
