// src/site/reconcile.rs
//
// Delete-then-write reconciliation. The output directory must mirror the
// current descriptor set exactly: pages for removed or deactivated
// listings disappear, and hand-authored files that this pipeline never
// wrote are left alone. The managed namespace is tracked in a manifest
// rather than guessed from directory names.

use crate::errors::BuildError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

const MANIFEST_FILE: &str = ".build-manifest.json";
const STAGING_DIR: &str = ".staging";

/// A fully rendered page, ready to hit disk.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Relative to the output directory, e.g. `some-slug/index.html`.
    pub path: String,
    pub contents: String,
}

/// Replace the previous build's artifacts with the current page set.
///
/// Order matters for crash safety: everything is staged first, so a
/// failure before the swap leaves the previous good site fully intact.
/// Only once staging is complete does the old managed namespace get
/// deleted and the new files moved into place.
pub fn reconcile(out_dir: &Path, pages: &[RenderedPage]) -> Result<usize, BuildError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| BuildError::OutputIo(format!("create {}: {e}", out_dir.display())))?;

    let staging = out_dir.join(STAGING_DIR);
    if staging.exists() {
        fs::remove_dir_all(&staging)
            .map_err(|e| BuildError::OutputIo(format!("clear staging: {e}")))?;
    }

    // 1. Stage the complete new site.
    for page in pages {
        let target = staging.join(safe_relative(&page.path)?);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BuildError::OutputIo(format!("create {}: {e}", parent.display())))?;
        }
        fs::write(&target, &page.contents)
            .map_err(|e| BuildError::OutputIo(format!("stage {}: {e}", page.path)))?;
    }

    // 2. Delete exactly what the previous build wrote.
    let previous = read_manifest(out_dir);
    let mut dirs_to_prune: BTreeSet<PathBuf> = BTreeSet::new();
    for old_path in &previous {
        let Ok(rel) = safe_relative(old_path) else {
            continue;
        };
        let absolute = out_dir.join(&rel);
        if absolute.is_file() {
            fs::remove_file(&absolute)
                .map_err(|e| BuildError::OutputIo(format!("remove {}: {e}", old_path)))?;
        }
        let mut parent = rel.parent();
        while let Some(dir) = parent {
            if !dir.as_os_str().is_empty() {
                dirs_to_prune.insert(dir.to_path_buf());
            }
            parent = dir.parent();
        }
    }
    // Deepest first, so emptied listing directories collapse cleanly.
    for dir in dirs_to_prune.iter().rev() {
        let _ = fs::remove_dir(out_dir.join(dir));
    }

    // 3. Move the staged site into place.
    for page in pages {
        let rel = safe_relative(&page.path)?;
        let target = out_dir.join(&rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BuildError::OutputIo(format!("create {}: {e}", parent.display())))?;
        }
        fs::rename(staging.join(&rel), &target)
            .map_err(|e| BuildError::OutputIo(format!("place {}: {e}", page.path)))?;
    }
    let _ = fs::remove_dir_all(&staging);

    // 4. Record the new managed namespace for the next run.
    write_manifest(out_dir, pages)?;

    Ok(pages.len())
}

/// Reject absolute paths and parent traversal before touching the
/// filesystem; the manifest is data, not something to trust blindly.
fn safe_relative(path: &str) -> Result<PathBuf, BuildError> {
    let rel = PathBuf::from(path);
    let clean = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if path.is_empty() || !clean {
        return Err(BuildError::OutputIo(format!("unsafe output path: {path}")));
    }
    Ok(rel)
}

fn read_manifest(out_dir: &Path) -> Vec<String> {
    let path = out_dir.join(MANIFEST_FILE);
    match fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("⚠️ Build manifest unreadable ({e}), treating output as unmanaged");
                Vec::new()
            }
        },
        Err(_) => Vec::new(),
    }
}

fn write_manifest(out_dir: &Path, pages: &[RenderedPage]) -> Result<(), BuildError> {
    let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
    let json = serde_json::to_string_pretty(&paths)
        .map_err(|e| BuildError::OutputIo(e.to_string()))?;
    fs::write(out_dir.join(MANIFEST_FILE), json)
        .map_err(|e| BuildError::OutputIo(format!("write manifest: {e}")))
}
