//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cache::AssetCache;
use crate::command::{BuildOptions, Postcss};
use crate::error::Result;
use crate::release::ReleaseClient;
use crate::{dist, runner};

/// Tailwind CSS standalone binary wrapper
///
/// Wraps the platform-specific tailwindcss executable and packages upstream
/// releases into per-platform wheels.
#[derive(Parser, Debug)]
#[command(name = "tailwindcss")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile CSS once and print the result
    Build(BuildCommand),

    /// Recompile CSS on input changes
    Watch(WatchCommand),

    /// Create Tailwind (and optionally PostCSS) config files
    Init(InitCommand),

    /// Package an upstream release into per-platform wheels
    Dist(DistCommand),

    /// Anything else is forwarded to the wrapped binary unchanged
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Options shared by build and watch
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Input CSS file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSS file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content paths to scan for classes
    #[arg(long)]
    pub content: Option<String>,

    /// Load a custom PostCSS configuration (bare flag uses the default file)
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "FILE")]
    pub postcss: Option<String>,

    /// Minify the output
    #[arg(short, long)]
    pub minify: bool,

    /// Tailwind config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable autoprefixer
    #[arg(long = "no-autoprefixer")]
    pub no_autoprefixer: bool,
}

impl CompileArgs {
    fn to_options(&self, poll: bool) -> BuildOptions {
        BuildOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            content: self.content.clone(),
            postcss: self.postcss.as_ref().map(|value| {
                if value.is_empty() {
                    Postcss::Flag
                } else {
                    Postcss::Config(PathBuf::from(value))
                }
            }),
            minify: self.minify,
            config: self.config.clone(),
            autoprefixer: !self.no_autoprefixer,
            poll,
        }
    }
}

#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub compile: CompileArgs,
}

#[derive(Args, Debug)]
pub struct WatchCommand {
    #[command(flatten)]
    pub compile: CompileArgs,

    /// Poll for file changes instead of using filesystem events
    #[arg(long)]
    pub poll: bool,
}

#[derive(Args, Debug)]
pub struct InitCommand {
    /// Write the full default configuration
    #[arg(long)]
    pub full: bool,

    /// Also create postcss.config.js
    #[arg(long)]
    pub postcss: bool,
}

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct DistCommand {
    /// Upstream version to package, without the leading 'v'
    pub version: String,

    /// Opaque pre-release suffix appended to the package version verbatim
    pub pre_release: Option<String>,

    /// Directory holding the asset cache and wheel output
    #[arg(long, default_value = "build", env = "TAILWIND_BUILD_DIR")]
    pub build_dir: PathBuf,
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        match self.command {
            Commands::Build(cmd) => {
                let css = runner::build(&cmd.compile.to_options(false))?;
                print!("{}", css);
                Ok(0)
            }
            Commands::Watch(cmd) => {
                let css = runner::watch(&cmd.compile.to_options(cmd.poll))?;
                print!("{}", css);
                Ok(0)
            }
            Commands::Init(cmd) => {
                runner::init(cmd.full, cmd.postcss)?;
                Ok(0)
            }
            Commands::Dist(cmd) => {
                let tag = format!("v{}", cmd.version);
                let pre_release = cmd.pre_release.as_deref().unwrap_or("");

                let client = ReleaseClient::new()?;
                let cache = AssetCache::new(cmd.build_dir.join("cache"));
                let wheel_dir = cmd.build_dir.join("wheel");

                let output_dir = dist::run(&client, &cache, &wheel_dir, &tag, pre_release)?;
                println!("Wheels written to {}", output_dir.display());
                Ok(0)
            }
            Commands::External(args) => runner::call(&args),
        }
    }
}
