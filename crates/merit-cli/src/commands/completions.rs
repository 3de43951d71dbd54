use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use clap_complete::{generate, Shell};

use merit_cli::cli::build_cli_command;

pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("creating completion file '{}'", path.display()))?;
        generate(shell, &mut cmd, "merit", &mut file);
        println!("Wrote {shell:?} completion to {}", path.display());
    } else {
        let stdout = &mut io::stdout();
        generate(shell, &mut cmd, "merit", stdout);
    }
    Ok(())
}
