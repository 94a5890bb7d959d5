//! Spec-file naming: classification, target resolution and switching
//!
//! A source file `D/B.E` has companion test files `D/B<suffix>.E`, one per
//! configured suffix.

use crate::config::MockConfig;
use eyre::{Result, WrapErr};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether `path` names a test file under the configured suffixes
pub fn is_spec_file(path: &Path, config: &MockConfig) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    config
        .spec_suffix
        .iter()
        .any(|suffix| stem.ends_with(suffix.as_str()))
}

/// Companion test file for `source`
///
/// Non-default suffixes win when such a file already exists; otherwise the
/// default suffix is used, whether or not that file exists yet.
pub fn resolve_target(source: &Path, config: &MockConfig) -> PathBuf {
    for suffix in config
        .spec_suffix
        .iter()
        .filter(|suffix| **suffix != config.default_extension)
    {
        let candidate = companion_path(source, suffix);
        if candidate.exists() {
            log::debug!("Found existing spec file {}", candidate.display());
            return candidate;
        }
    }

    companion_path(source, &config.default_extension)
}

/// Create `path` empty if it does not exist, leaving existing content alone
pub fn touch(path: &Path) -> io::Result<()> {
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

fn companion_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    source.with_file_name(format!("{stem}{suffix}{extension}"))
}

/// Base name shared by a source file and all of its spec files
fn family_stem<'a>(path: &'a Path, config: &MockConfig) -> Option<&'a str> {
    let stem = path.file_stem()?.to_str()?;
    let base = config
        .spec_suffix
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix.as_str()))
        .unwrap_or(stem);
    Some(base)
}

/// Every file under `root` in the same family as `current` (the source file
/// and its spec files), sorted
pub fn find_family_files(
    root: &Path,
    current: &Path,
    config: &MockConfig,
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let base = family_stem(current, config)
        .ok_or_else(|| eyre::eyre!("Cannot derive a base name from {}", current.display()))?;
    let extension = current
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut names = vec![format!("{base}{extension}")];
    for suffix in &config.spec_suffix {
        names.push(format!("{base}{suffix}{extension}"));
    }

    let excluded = build_exclude_set(exclude)?;

    let mut matches: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !excluded.is_match(entry.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| names.iter().any(|candidate| candidate == name))
        })
        .map(|entry| entry.into_path())
        .collect();

    matches.sort();
    matches.dedup();
    Ok(matches)
}

/// The file after `current` in `family`, wrapping around; `None` when there is
/// nothing to switch to
pub fn next_in_family(family: &[PathBuf], current: &Path) -> Option<PathBuf> {
    if family.len() < 2 {
        return None;
    }

    let current = canonical(current);
    let position = family.iter().position(|path| canonical(path) == current);
    let next = position.map_or(0, |index| (index + 1) % family.len());
    family.get(next).cloned()
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).wrap_err_with(|| format!("Invalid exclude pattern {pattern}"))?;
        builder.add(glob);
    }
    builder.build().wrap_err("Failed to build exclude set")
}
