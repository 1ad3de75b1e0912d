//! Binary location and subprocess dispatch
//!
//! The wrapper assumes a platform package was already installed; it only
//! resolves the bundled binary for the running host and executes it.
//! Build and watch capture output so the emitted stylesheet can be
//! returned; the pass-through entry inherits stdio and forwards the exit
//! code unchanged.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::command::{build_args, init_args, BuildOptions};
use crate::error::{Error, Result};
use crate::platform;

/// Environment override for the wrapped binary's path
pub const BIN_ENV: &str = "TAILWIND_BIN";

pub const TAILWIND_CONFIG_FILE: &str = "tailwind.config.js";
pub const POSTCSS_CONFIG_FILE: &str = "postcss.config.js";

/// Resolve the path of the wrapped binary for the current host
///
/// Resolution order: `TAILWIND_BIN` override, the bundled binary next to
/// the wrapper's own executable, then a PATH lookup. An override pointing
/// at a missing file is an error rather than a fallthrough. Failure is
/// fatal and non-retryable, no alternate binary can be substituted.
pub fn find_binary() -> Result<PathBuf> {
    if let Ok(path) = env::var(BIN_ENV) {
        let path = PathBuf::from(path);
        if path.is_file() {
            debug!(path = %path.display(), "using binary from {}", BIN_ENV);
            return Ok(path);
        }
        return Err(Error::BinaryNotFound {
            name: path.display().to_string(),
        });
    }

    let name = format!("tailwindcss-{}", platform::host_token()?);

    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let bundled = dir.join("tailwind").join("bin").join(&name);
            if bundled.is_file() {
                return Ok(bundled);
            }
        }
    }

    which::which(&name).map_err(|_| Error::BinaryNotFound { name })
}

/// Run the binary with the given arguments, capturing output
///
/// Zero exit returns captured stdout verbatim; non-zero preserves the
/// exit status and captured stderr so upstream diagnostics surface as-is.
fn run(bin: &Path, args: &[String], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new(bin);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    debug!(bin = %bin.display(), ?args, "invoking tailwindcss");
    let output = cmd.output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(Error::CommandFailed {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One-shot build; returns the emitted stylesheet text
pub fn build(opts: &BuildOptions) -> Result<String> {
    let bin = find_binary()?;
    run(&bin, &build_args(opts, false), None)
}

/// Watch mode; blocks until the subprocess exits
pub fn watch(opts: &BuildOptions) -> Result<String> {
    let bin = find_binary()?;
    run(&bin, &build_args(opts, true), None)
}

/// Initialize config files in the current working directory
pub fn init(full: bool, postcss: bool) -> Result<()> {
    let cwd = env::current_dir()?;
    init_in(&cwd, full, postcss)
}

/// Initialize config files in `dir`
///
/// Checks for the files `init` is about to create before any subprocess
/// runs; a pre-existing file fails with [`Error::ConfigFileExists`] naming
/// it. A failure of the subprocess itself is wrapped as [`Error::Init`]
/// with the original failure as its cause.
pub fn init_in(dir: &Path, full: bool, postcss: bool) -> Result<()> {
    let mut targets = vec![TAILWIND_CONFIG_FILE];
    if postcss {
        targets.push(POSTCSS_CONFIG_FILE);
    }
    for name in targets {
        let path = dir.join(name);
        if path.exists() {
            return Err(Error::ConfigFileExists { path });
        }
    }

    let bin = find_binary()?;
    run(&bin, &init_args(full, postcss), Some(dir))
        .map(|_| ())
        .map_err(|e| Error::Init {
            source: Box::new(e),
        })
}

/// Pass-through: forward raw arguments and return the subprocess exit code
///
/// Stdio is inherited so help text and unwrapped subcommands behave exactly
/// like invoking the binary directly.
pub fn call(args: &[String]) -> Result<i32> {
    let bin = find_binary()?;
    debug!(bin = %bin.display(), ?args, "forwarding to tailwindcss");
    let status = Command::new(&bin).args(args).status()?;
    Ok(status.code().unwrap_or(-1))
}
