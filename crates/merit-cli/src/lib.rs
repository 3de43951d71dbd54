pub mod cli;
pub mod config;

pub use cli::{build_cli_command, Cli, Commands, OutputFormat};
pub use config::{load_merit_config, merit_config_path, DispatchOverrides, MeritConfig};

use merit_core::{ErrorKind, MeritError};

/// Process exit status for a failed command.
///
/// | Code | Meaning |
/// |------|---------|
/// | 2 | invalid payload |
/// | 3 | no feasible plan |
/// | 4 | search limit reached |
/// | 1 | anything else |
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<MeritError>())
        .map(MeritError::kind);
    match kind {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::Infeasible) => 3,
        Some(ErrorKind::Timeout) => 4,
        Some(ErrorKind::Other) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn exit_codes_follow_error_kind() {
        let infeasible: anyhow::Result<()> = Err(MeritError::Infeasible("x".into()).into());
        let err = infeasible.context("planning payload").unwrap_err();
        assert_eq!(exit_code(&err), 3);

        assert_eq!(exit_code(&MeritError::validation("load", "negative").into()), 2);
        assert_eq!(exit_code(&MeritError::Parse("bad json".into()).into()), 2);
        assert_eq!(exit_code(&MeritError::Timeout("slow".into()).into()), 4);
        assert_eq!(exit_code(&anyhow!("disk full")), 1);
    }
}
