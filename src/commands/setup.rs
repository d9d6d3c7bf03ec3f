use crate::error::GitChangeError;
use crate::git::hooks::{HookAction, HookState, hook_state, install_hook, link_target};
use crate::git::repository::{ConfigScope, Repository};
use crate::utils::debug_log;

pub const EXPECTED_REPO_NAME: &str = "git-change";

/// Hooks to link, relative to `<git-dir>/hooks`.
pub const HOOKS: &[&str] = &["commit-msg"];
pub const HOOK_TARGET_DIR: &str = "../../etc/githooks";

/// Applied in order with `git config [--global] <key> <value>`.
pub const CONFIG_ENTRIES: &[(&str, &str, ConfigScope)] = &[
    ("branch.master.rebase", "true", ConfigScope::Local),
    ("branch.autosetuprebase", "remote", ConfigScope::Global),
    // Shell aliases run from the top of the working tree
    ("alias.pre-commit", "!etc/githooks/pre-commit", ConfigScope::Local),
    (
        "git-change.gerrit-ssh-host",
        "review.opensource.nextdoor.com",
        ConfigScope::Local,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Apply,
    DryRun,
    Check,
}

/// Validates the checkout, then links hooks and writes config according to `mode`.
///
/// Returns whether the repository ends up (or, for `Check`, already is) fully
/// configured. `Apply` and `DryRun` return `true` or an error.
pub fn run(repo: &Repository, mode: Mode, script: &str) -> Result<bool, GitChangeError> {
    verify_repository(repo, script)?;

    match mode {
        Mode::Apply => {
            apply(repo)?;
            Ok(true)
        }
        Mode::DryRun => {
            for line in plan(repo)? {
                println!("run_command >>> {}", line);
            }
            Ok(true)
        }
        Mode::Check => {
            let drift = check(repo)?;
            for line in &drift {
                println!("{}", line);
            }
            Ok(drift.is_empty())
        }
    }
}

/// Fails unless the top-level directory is named `git-change`.
pub fn verify_repository(repo: &Repository, script: &str) -> Result<(), GitChangeError> {
    let found = repo.name().unwrap_or_default();
    if found == EXPECTED_REPO_NAME {
        return Ok(());
    }
    debug_log(&format!(
        "refusing to configure {}: expected {}",
        repo.workdir().display(),
        EXPECTED_REPO_NAME
    ));
    Err(GitChangeError::WrongRepository {
        script: script.to_string(),
        found: found.to_string(),
    })
}

pub fn apply(repo: &Repository) -> Result<(), GitChangeError> {
    let hooks_dir = repo.hooks_dir();
    for hook in HOOKS {
        let action = install_hook(&hooks_dir, hook, HOOK_TARGET_DIR)?;
        if action != HookAction::Unchanged {
            debug_log(&format!("{:?} hook {}", action, hook));
        }
    }

    for (key, value, scope) in CONFIG_ENTRIES {
        repo.config_set(key, value, *scope)?;
    }
    Ok(())
}

/// The commands `apply` would perform, as shell-style lines.
///
/// Hooks that are already linked are skipped. A hook path blocked by a
/// regular file fails with `HookConflict`, as `apply` would.
pub fn plan(repo: &Repository) -> Result<Vec<String>, GitChangeError> {
    let hooks_dir = repo.hooks_dir();
    let mut lines = Vec::new();

    for hook in HOOKS {
        let hook_path = hooks_dir.join(hook);
        let target = link_target(HOOK_TARGET_DIR, hook);
        match hook_state(&hook_path, &target)? {
            HookState::Linked => continue,
            HookState::Blocked => return Err(GitChangeError::HookConflict(hook_path)),
            HookState::Missing | HookState::Stale(_) => {}
        }
        lines.push(format!(
            "ln -sf {} {}",
            shell_quote(&target.to_string_lossy()),
            shell_quote(&hook_path.to_string_lossy())
        ));
    }

    let prefix = repo
        .global_args_for_exec()
        .iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ");
    for (key, value, scope) in CONFIG_ENTRIES {
        let flag = scope
            .set_flag()
            .map(|f| format!("{} ", f))
            .unwrap_or_default();
        lines.push(format!(
            "git {} config {}{} {}",
            prefix,
            flag,
            shell_quote(key),
            shell_quote(value)
        ));
    }
    Ok(lines)
}

/// Lists every hook and config entry that differs from the desired state.
pub fn check(repo: &Repository) -> Result<Vec<String>, GitChangeError> {
    let hooks_dir = repo.hooks_dir();
    let mut drift = Vec::new();

    for hook in HOOKS {
        let hook_path = hooks_dir.join(hook);
        let target = link_target(HOOK_TARGET_DIR, hook);
        match hook_state(&hook_path, &target)? {
            HookState::Linked => {}
            HookState::Missing => drift.push(format!("hook {}: missing", hook)),
            HookState::Stale(current) => drift.push(format!(
                "hook {}: points to {} instead of {}",
                hook,
                current.display(),
                target.display()
            )),
            HookState::Blocked => drift.push(format!(
                "hook {}: {} is not a symlink",
                hook,
                hook_path.display()
            )),
        }
    }

    for (key, value, scope) in CONFIG_ENTRIES {
        match repo.config_get(key, *scope)? {
            Some(current) if current == *value => {}
            Some(current) => drift.push(format!(
                "config {}: is {:?}, want {:?}",
                key, current, value
            )),
            None => drift.push(format!("config {}: unset, want {:?}", key, value)),
        }
    }
    Ok(drift)
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
