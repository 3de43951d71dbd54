use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use merit_algo::{plan_production, DispatchConfig, ProductionPlan};
use merit_cli::OutputFormat;
use merit_core::LoadRequest;
use tabwriter::TabWriter;
use tracing::info;

pub fn handle(
    payload: &Path,
    config: &DispatchConfig,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<()> {
    let request = LoadRequest::from_path(payload)
        .with_context(|| format!("reading payload '{}'", payload.display()))?;
    let plan = plan_production(&request, config)
        .with_context(|| format!("planning production for '{}'", payload.display()))?;
    info!(
        solve_time_ms = plan.solve_time_ms,
        "dispatched {}",
        payload.display()
    );

    let rendered = match format {
        OutputFormat::Json => {
            let mut json = plan.to_json().context("serializing production plan")?;
            json.push('\n');
            json
        }
        OutputFormat::Table => render_table(&plan)?,
    };

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("writing plan '{}'", path.display()))?;
            info!("wrote plan to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_table(plan: &ProductionPlan) -> Result<String> {
    let mut writer = TabWriter::new(Vec::new());
    writeln!(writer, "PLANT\tLOAD (MW)")?;
    for output in &plan.outputs {
        writeln!(writer, "{}\t{:.1}", output.name, output.load.value())?;
    }
    writeln!(writer, "TOTAL\t{:.1}", plan.total_load.value())?;
    writeln!(writer, "COST (EUR/h)\t{:.2}", plan.total_cost.value())?;
    let bytes = writer.into_inner().context("flushing plan table")?;
    String::from_utf8(bytes).context("plan table is not valid UTF-8")
}
