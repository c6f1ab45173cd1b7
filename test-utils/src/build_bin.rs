use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::LazyLock;
use assert_fs::TempDir;
use cargo_metadata::{Artifact, CrateType, Message};
use thiserror::Error;
use crate::mock::CONFIG_FILE_PATH;

pub static DAEMON_BIN_PATH: LazyLock<PathBuf> = LazyLock::new(||
    build_bin("plainnotesd")
        .unwrap_or_else(|e| panic!("failed to build plainnotesd: {e}"))
);

/// Builds a workspace binary, returns the path cargo reports for it
pub fn build_bin(name: &str) -> Result<PathBuf, BuildBinError> {
    let output = Command::new(env::var("CARGO")?)
        .arg("build")
        .arg(format!("--bin={name}"))
        .arg("--message-format=json-render-diagnostics")
        .current_dir(workspace_dir()?)
        .output()?;
    if !output.status.success() {
        return Err(
            BuildBinError::ChildUnsuccessful(
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        )
    }

    for message in Message::parse_stream(output.stdout.as_slice()) {
        if let Message::CompilerArtifact(artifact) = message?
            && let Some(path) = bin_executable(name, &artifact)
        {
            return Ok(path)
        }
    }
    Err(BuildBinError::NoBinFound(name.to_owned()))
}

fn workspace_dir() -> Result<PathBuf, BuildBinError> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    manifest_dir.parent()
        .map(Path::to_owned)
        .ok_or(BuildBinError::NoWorkspaceDir)
}

fn bin_executable(name: &str, artifact: &Artifact) -> Option<PathBuf> {
    let is_wanted = artifact.target.name == name
        && artifact.target.crate_types.contains(&CrateType::Bin);
    artifact.executable.as_ref()
        .filter(|_| is_wanted)
        .map(PathBuf::from)
}

#[derive(Debug, Error)]
pub enum BuildBinError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Var(#[from] env::VarError),

    #[error("CARGO_MANIFEST_DIR has no parent directory")]
    NoWorkspaceDir,

    #[error("cargo build failed with {0}:\n{1}")]
    ChildUnsuccessful(ExitStatus, String),

    #[error("cargo built no executable named {0}")]
    NoBinFound(String),
}

/// A command for `bin_path` reading the config laid out in `dir`
pub fn new_configured_command(bin_path: &Path, dir: &TempDir) -> Command {
    let mut command = Command::new(bin_path);
    command
        .arg("--config-file")
        .arg(dir.join(CONFIG_FILE_PATH))
        .env("RUST_LOG", "info");
    command
}
