//! Tailwind CSS standalone-binary distribution pipeline and wrapper.
//!
//! Packaging side: [`release::ReleaseClient`] fetches a tagged upstream
//! release, [`cache::AssetCache`] stores its assets locally, and [`dist`]
//! turns each asset into a per-platform wheel. Runtime side: [`command`]
//! builds argument vectors and [`runner`] locates and invokes the bundled
//! binary.

pub mod cache;
pub mod cli;
pub mod command;
pub mod dist;
pub mod error;
pub mod platform;
pub mod release;
pub mod runner;

pub use command::{BuildOptions, Postcss};
pub use error::{Error, Result};
pub use runner::{build, call, init, watch};
