//! Per-platform packaging of release assets into installable wheels
//!
//! For each asset of a fetched release: resolve its platform token to a
//! wheel classification tag, render the package directory from embedded
//! templates, copy the binary in with executable bits, and archive the
//! result as `tailwind-<version>-py3-none-<platform>.whl`. Template
//! parameters travel as an in-memory [`PackageContext`], nothing is written
//! to the working directory.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use console::style;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::cache::{set_executable, AssetCache};
use crate::error::Result;
use crate::platform;
use crate::release::ReleaseClient;

const METADATA_TEMPLATE: &str = include_str!("../templates/METADATA.in");
const WHEEL_TEMPLATE: &str = include_str!("../templates/WHEEL.in");

/// Directory inside each package holding the bundled binary
const PACKAGE_BIN_DIR: &str = "tailwind/bin";

/// Substitution parameters for package templates
#[derive(Debug, Clone)]
pub struct PackageContext {
    pub project_slug: String,
    pub tag: String,
    pub platform: String,
    pub version: String,
    pub bin_basename: String,
    pub bin: String,
}

impl PackageContext {
    fn render(&self, template: &str) -> String {
        let pairs = [
            ("project_slug", self.project_slug.as_str()),
            ("tag", self.tag.as_str()),
            ("platform", self.platform.as_str()),
            ("version", self.version.as_str()),
            ("bin_basename", self.bin_basename.as_str()),
            ("bin", self.bin.as_str()),
        ];

        let mut out = template.to_string();
        for (key, value) in pairs {
            out = out.replace(&format!("{{{{ {} }}}}", key), value);
        }
        out
    }
}

/// Derive the package version from a release tag and pre-release suffix
///
/// The tag's leading `v` is stripped and the suffix appended verbatim.
pub fn package_version(tag: &str, pre_release: &str) -> String {
    format!("{}{}", tag.strip_prefix('v').unwrap_or(tag), pre_release)
}

/// Fetch a tagged release and produce one wheel per platform asset
///
/// Any failure (HTTP, an unmapped platform token, IO) aborts the whole
/// run before further packages are produced. Returns the per-version
/// output directory.
pub fn run(
    client: &ReleaseClient,
    cache: &AssetCache,
    wheel_dir: &Path,
    tag: &str,
    pre_release: &str,
) -> Result<PathBuf> {
    let release = client.fetch_release(tag)?;
    let version = package_version(tag, pre_release);
    let output_dir = wheel_dir.join(&version);

    for asset in &release.assets {
        println!("{} {}", style("Processing").green().bold(), asset.name);

        let bin = client.download(tag, asset, cache)?;
        let pkg_dir = package_asset(&bin, tag, &version, &output_dir)?;

        println!(
            "{} {}",
            style("Packaged").green().bold(),
            pkg_dir.display()
        );
    }

    Ok(output_dir)
}

/// Render one platform package around a cached binary
///
/// A pre-existing package directory for the same slug is replaced.
pub fn package_asset(
    bin: &Path,
    tag: &str,
    version: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let bin = bin.canonicalize()?;
    let bin_basename = bin
        .file_name()
        .expect("cached asset has a file name")
        .to_string_lossy()
        .into_owned();

    let token = platform::asset_token(&bin_basename)?;
    let platform_tag = platform::classify(token)?;
    let project_slug = format!("tailwind-{}", platform_tag);

    let ctx = PackageContext {
        project_slug: project_slug.clone(),
        tag: tag.to_string(),
        platform: platform_tag.to_string(),
        version: version.to_string(),
        bin_basename: bin_basename.clone(),
        bin: bin.display().to_string(),
    };

    let pkg_dir = output_dir.join(&project_slug);
    if pkg_dir.exists() {
        fs::remove_dir_all(&pkg_dir)?;
    }
    fs::create_dir_all(&pkg_dir)?;

    fs::write(pkg_dir.join("METADATA"), ctx.render(METADATA_TEMPLATE))?;
    fs::write(pkg_dir.join("WHEEL"), ctx.render(WHEEL_TEMPLATE))?;

    let bin_dir = pkg_dir.join(PACKAGE_BIN_DIR);
    fs::create_dir_all(&bin_dir)?;
    let packaged_bin = bin_dir.join(&bin_basename);
    fs::copy(&bin, &packaged_bin)?;
    set_executable(&packaged_bin)?;

    let wheel_path = output_dir.join(format!(
        "tailwind-{}-py3-none-{}.whl",
        version, platform_tag
    ));
    create_wheel_archive(&pkg_dir, &wheel_path)?;

    Ok(pkg_dir)
}

/// Zip a package directory into a wheel
///
/// Entry paths are relative to the package directory. The bundled binary's
/// stored unix mode is forced to 0755 regardless of the source platform's
/// default permissions.
fn create_wheel_archive(pkg_dir: &Path, wheel_path: &Path) -> Result<()> {
    let file = fs::File::create(wheel_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(pkg_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        let relative = path
            .strip_prefix(pkg_dir)
            .expect("walked path is under the package directory");

        if relative.as_os_str().is_empty() {
            continue;
        }

        let name = relative.to_string_lossy().replace('\\', "/");

        if path.is_dir() {
            zip.add_directory(&name, options)?;
        } else {
            let entry_options = if name.starts_with(PACKAGE_BIN_DIR) {
                options.unix_permissions(0o755)
            } else {
                options
            };
            zip.start_file(&name, entry_options)?;

            let mut src = fs::File::open(path)?;
            let mut buffer = Vec::new();
            src.read_to_end(&mut buffer)?;
            zip.write_all(&buffer)?;
        }
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_package_version_strips_leading_v() {
        assert_eq!(package_version("v3.4.1", ""), "3.4.1");
        assert_eq!(package_version("v3.4.1", "rc1"), "3.4.1rc1");
        assert_eq!(package_version("v3.4.1", ".post1"), "3.4.1.post1");
        // Already-bare tags pass through unchanged.
        assert_eq!(package_version("3.4.1", ""), "3.4.1");
    }

    #[test]
    fn test_context_render_substitutes_all_keys() {
        let ctx = PackageContext {
            project_slug: "tailwind-win_amd64".to_string(),
            tag: "v3.4.1".to_string(),
            platform: "win_amd64".to_string(),
            version: "3.4.1".to_string(),
            bin_basename: "tailwindcss-windows-x64.exe".to_string(),
            bin: "/cache/tailwindcss-windows-x64.exe".to_string(),
        };

        let rendered = ctx.render(
            "Name: {{ project_slug }}\nVersion: {{ version }}\nTag: py3-none-{{ platform }}\n",
        );
        assert_eq!(
            rendered,
            "Name: tailwind-win_amd64\nVersion: 3.4.1\nTag: py3-none-win_amd64\n"
        );
        assert!(!rendered.contains("{{"));
    }

    fn write_fake_asset(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"#!/bin/sh\nexit 0\n").unwrap();
        path
    }

    #[test]
    fn test_package_asset_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = write_fake_asset(tmp.path(), "tailwindcss-linux-x64");
        let output_dir = tmp.path().join("wheel").join("3.4.1");
        fs::create_dir_all(&output_dir).unwrap();

        let pkg_dir = package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap();

        let platform = "manylinux_2_5_x86_64.manylinux1_x86_64.manylinux_2_12_x86_64.manylinux2010_x86_64";
        assert_eq!(pkg_dir, output_dir.join(format!("tailwind-{}", platform)));
        assert!(pkg_dir
            .join("tailwind/bin/tailwindcss-linux-x64")
            .is_file());

        let metadata = fs::read_to_string(pkg_dir.join("METADATA")).unwrap();
        assert!(metadata.contains(&format!("Name: tailwind-{}", platform)));
        assert!(metadata.contains("Version: 3.4.1"));

        let wheel = fs::read_to_string(pkg_dir.join("WHEEL")).unwrap();
        assert!(wheel.contains(&format!("Tag: py3-none-{}", platform)));
    }

    #[cfg(unix)]
    #[test]
    fn test_packaged_binary_is_executable_on_disk() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let bin = write_fake_asset(tmp.path(), "tailwindcss-linux-x64");
        // Source file deliberately non-executable.
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o644)).unwrap();

        let output_dir = tmp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        let pkg_dir = package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap();

        let packaged = pkg_dir.join("tailwind/bin/tailwindcss-linux-x64");
        let mode = fs::metadata(&packaged).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_wheel_archive_forces_binary_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = write_fake_asset(tmp.path(), "tailwindcss-macos-arm64");
        let output_dir = tmp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();

        package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap();

        let wheel_path = output_dir.join("tailwind-3.4.1-py3-none-macosx_11_0_arm64.whl");
        assert!(wheel_path.is_file());

        let mut archive = zip::ZipArchive::new(fs::File::open(&wheel_path).unwrap()).unwrap();
        let entry = archive
            .by_name("tailwind/bin/tailwindcss-macos-arm64")
            .unwrap();
        let mode = entry.unix_mode().expect("binary entry has a unix mode");
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_package_asset_overwrites_previous_build() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = write_fake_asset(tmp.path(), "tailwindcss-macos-x64");
        let output_dir = tmp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();

        let pkg_dir = package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap();
        fs::write(pkg_dir.join("leftover.txt"), "stale").unwrap();

        let pkg_dir = package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap();
        assert!(!pkg_dir.join("leftover.txt").exists());
        assert!(pkg_dir.join("METADATA").is_file());
    }

    #[test]
    fn test_unmapped_asset_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = write_fake_asset(tmp.path(), "tailwindcss-freebsd-x64");
        let output_dir = tmp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();

        let err = package_asset(&bin, "v3.4.1", "3.4.1", &output_dir).unwrap_err();
        assert!(matches!(err, Error::UnmappedPlatform { ref token } if token == "freebsd-x64"));
        // Nothing was rendered for the unmapped asset.
        assert!(fs::read_dir(&output_dir).unwrap().next().is_none());
    }
}
