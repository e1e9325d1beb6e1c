use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

use crate::config::Context;
use crate::{Error, Result};

/// Run a fragment's install script with the context's shell.
///
/// The script lives in a temporary file for the duration of the call and is
/// removed on every exit path. Besides the inherited environment it sees
/// `HOST_OS`, `HOST_ARCH`, `VIMDIR` and `VIMBUNDLEDIR`.
#[instrument(skip(ctx, script), fields(shell = %ctx.shell, len = script.len()))]
pub fn run_script(ctx: &Context, script: &str) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(".script-")
        .suffix(".sh")
        .tempfile()?;
    file.write_all(script.as_bytes())?;
    file.flush()?;

    debug!(path = %file.path().display(), "running install script");
    let status = Command::new(&ctx.shell)
        .arg(file.path())
        .env("HOST_OS", std::env::consts::OS)
        .env("HOST_ARCH", std::env::consts::ARCH)
        .env("VIMDIR", ctx.layout.base_path())
        .env("VIMBUNDLEDIR", ctx.layout.bundle_dir())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::ToolSpawn {
            tool: ctx.shell.clone(),
            source: e,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::ExternalTool {
            tool: ctx.shell.clone(),
            args: vec![file.path().display().to_string()],
            status,
        })
    }
}
