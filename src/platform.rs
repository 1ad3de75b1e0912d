//! Platform token classification
//!
//! Upstream names each release asset `tailwindcss-<token>`, where the token
//! identifies OS and architecture (e.g. `linux-x64`, `windows-x64.exe`).
//! This module maps tokens to the wheel platform classification tags used
//! when packaging, and detects the token for the running host.

use crate::error::{Error, Result};

/// Asset platform token → wheel platform classification tag
///
/// Every token upstream publishes must have an entry here; an unmapped
/// token aborts the packaging run rather than being skipped.
pub const PLATFORM_TAGS: &[(&str, &str)] = &[
    ("windows-x64.exe", "win_amd64"),
    ("macos-x64", "macosx_10_9_x86_64"),
    ("macos-arm64", "macosx_11_0_arm64"),
    (
        "linux-x64",
        "manylinux_2_5_x86_64.manylinux1_x86_64.manylinux_2_12_x86_64.manylinux2010_x86_64",
    ),
    (
        "linux-arm64",
        "manylinux_2_17_aarch64.manylinux2014_aarch64.manylinux_2_24_aarch64",
    ),
];

/// Resolve a platform token to its classification tag
pub fn classify(token: &str) -> Result<&'static str> {
    PLATFORM_TAGS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, tag)| *tag)
        .ok_or_else(|| Error::UnmappedPlatform {
            token: token.to_string(),
        })
}

/// Extract the platform token from an asset filename
///
/// The first hyphen-delimited segment is the binary's own name; everything
/// after it is the token, kept verbatim (including a trailing `.exe`).
pub fn asset_token(asset_name: &str) -> Result<&str> {
    asset_name
        .split_once('-')
        .map(|(_, token)| token)
        .ok_or_else(|| Error::UnmappedPlatform {
            token: asset_name.to_string(),
        })
}

/// Platform token for the running host
pub fn host_token() -> Result<&'static str> {
    use std::env::consts::{ARCH, OS};

    match (OS, ARCH) {
        ("linux", "x86_64") => Ok("linux-x64"),
        ("linux", "aarch64") => Ok("linux-arm64"),
        ("macos", "x86_64") => Ok("macos-x64"),
        ("macos", "aarch64") => Ok("macos-arm64"),
        ("windows", "x86_64") => Ok("windows-x64.exe"),
        _ => Err(Error::UnmappedPlatform {
            token: format!("{}-{}", OS, ARCH),
        }),
    }
}
