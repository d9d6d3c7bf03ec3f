//! Hook symlinks under `<git-dir>/hooks`.
//!
//! Links are relative so the checkout can move without breaking them.
//! Replacing a link goes through a temporary link and a rename, so the
//! hook path never disappears in between.

use crate::error::GitChangeError;
use crate::utils::{debug_log, warn_log};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a hook path currently holds, compared to the link we want there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    Linked,
    Missing,
    /// A symlink with some other target.
    Stale(PathBuf),
    /// A regular file or directory that we refuse to replace.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    Unchanged,
    Created,
    Replaced,
}

/// Relative link target for `hook`, e.g. `../../etc/githooks/commit-msg`.
pub fn link_target(target_dir: &str, hook: &str) -> PathBuf {
    Path::new(target_dir).join(hook)
}

pub fn hook_state(hook_path: &Path, target: &Path) -> io::Result<HookState> {
    let meta = match fs::symlink_metadata(hook_path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HookState::Missing),
        Err(e) => return Err(e),
    };

    if !meta.file_type().is_symlink() {
        return Ok(HookState::Blocked);
    }

    let current = fs::read_link(hook_path)?;
    if current == target {
        Ok(HookState::Linked)
    } else {
        Ok(HookState::Stale(current))
    }
}

/// Points `<hooks_dir>/<hook>` at `<target_dir>/<hook>`.
///
/// Existing symlinks are replaced, including dangling ones. Anything that is
/// not a symlink is left in place and reported as `HookConflict`.
pub fn install_hook(
    hooks_dir: &Path,
    hook: &str,
    target_dir: &str,
) -> Result<HookAction, GitChangeError> {
    let hook_path = hooks_dir.join(hook);
    let target = link_target(target_dir, hook);

    let state = hook_state(&hook_path, &target)?;
    debug_log(&format!("hook {}: {:?}", hook_path.display(), state));

    let action = match state {
        HookState::Linked => return Ok(HookAction::Unchanged),
        HookState::Blocked => return Err(GitChangeError::HookConflict(hook_path)),
        HookState::Missing => HookAction::Created,
        HookState::Stale(_) => HookAction::Replaced,
    };

    fs::create_dir_all(hooks_dir)?;

    if !hooks_dir.join(&target).exists() {
        warn_log(&format!(
            "{} does not exist yet; linking {} anyway",
            hooks_dir.join(&target).display(),
            hook
        ));
    }

    let tmp_path = hooks_dir.join(format!(".{}.tmp-{}", hook, std::process::id()));
    // Leftover from an interrupted run
    if fs::symlink_metadata(&tmp_path).is_ok() {
        fs::remove_file(&tmp_path)?;
    }

    symlink(&target, &tmp_path)?;
    if let Err(e) = fs::rename(&tmp_path, &hook_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug_log(&format!(
        "linked {} -> {}",
        hook_path.display(),
        target.display()
    ));
    Ok(action)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
