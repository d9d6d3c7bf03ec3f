use crate::config::Config;
use crate::error::GitChangeError;
use crate::utils::debug_log;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Which config file a key is written to and read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// The repository's own `.git/config`.
    Local,
    /// The user's global config (`~/.gitconfig` or `GIT_CONFIG_GLOBAL`).
    Global,
}

impl ConfigScope {
    /// Flag passed to `git config` when writing. Local writes need none.
    pub fn set_flag(self) -> Option<&'static str> {
        match self {
            ConfigScope::Local => None,
            ConfigScope::Global => Some("--global"),
        }
    }

    fn get_flag(self) -> &'static str {
        match self {
            ConfigScope::Local => "--local",
            ConfigScope::Global => "--global",
        }
    }
}

/// A working copy located through the git CLI.
#[derive(Debug, Clone)]
pub struct Repository {
    workdir: PathBuf,
    git_dir: PathBuf,
}

impl Repository {
    /// Top-level directory of the working tree.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The shared git metadata directory, always absolute. In a linked
    /// worktree this is the main checkout's `.git`, not `.git/worktrees/<name>`.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Where git looks for hooks, shared by every worktree.
    /// `core.hooksPath` is not consulted.
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir.join("hooks")
    }

    /// Basename of the top-level directory, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.workdir.file_name().and_then(|n| n.to_str())
    }

    pub fn global_args_for_exec(&self) -> Vec<String> {
        vec![
            "-C".to_string(),
            self.workdir.to_string_lossy().to_string(),
        ]
    }

    /// Runs `git config [--global] <key> <value>` against this repository.
    pub fn config_set(
        &self,
        key: &str,
        value: &str,
        scope: ConfigScope,
    ) -> Result<(), GitChangeError> {
        let mut args = self.global_args_for_exec();
        args.push("config".to_string());
        if let Some(flag) = scope.set_flag() {
            args.push(flag.to_string());
        }
        args.push(key.to_string());
        args.push(value.to_string());
        exec_git(&args)?;
        Ok(())
    }

    /// Reads a config value from one scope, returning None when the key is unset there.
    pub fn config_get(
        &self,
        key: &str,
        scope: ConfigScope,
    ) -> Result<Option<String>, GitChangeError> {
        let mut args = self.global_args_for_exec();
        args.push("config".to_string());
        args.push(scope.get_flag().to_string());
        args.push("--get".to_string());
        args.push(key.to_string());

        match exec_git(&args) {
            Ok(output) => {
                let stdout = String::from_utf8(output.stdout)?;
                Ok(Some(stdout.trim_end_matches(['\r', '\n']).to_string()))
            }
            // git config --get exits 1 when the key is missing
            Err(GitChangeError::GitCliError { code: Some(1), .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

pub fn find_repository() -> Result<Repository, GitChangeError> {
    let cwd = std::env::current_dir()?;
    find_repository_in_path(&cwd)
}

/// Resolves the top-level and shared git directories of the repository containing `path`.
pub fn find_repository_in_path(path: &Path) -> Result<Repository, GitChangeError> {
    let args = vec![
        "-C".to_string(),
        path.to_string_lossy().to_string(),
        "rev-parse".to_string(),
        "--show-toplevel".to_string(),
        "--git-common-dir".to_string(),
    ];
    let output = exec_git(&args)?;
    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    let (Some(toplevel), Some(git_dir)) = (lines.next(), lines.next()) else {
        return Err(GitChangeError::Generic(format!(
            "Unexpected git rev-parse output: {:?}",
            stdout
        )));
    };

    // --git-common-dir may be relative to the directory git was run in
    let git_dir = Path::new(git_dir);
    let git_dir = if git_dir.is_absolute() {
        git_dir.to_path_buf()
    } else {
        path.join(git_dir)
    };

    let repo = Repository {
        workdir: PathBuf::from(toplevel),
        git_dir,
    };
    debug_log(&format!(
        "found repository at {} (git dir {})",
        repo.workdir.display(),
        repo.git_dir.display()
    ));
    Ok(repo)
}

/// Runs git with the given arguments, capturing its output.
/// A non-zero exit becomes `GitCliError` carrying git's status and stderr.
pub fn exec_git(args: &[String]) -> Result<Output, GitChangeError> {
    debug_log(&format!("git {}", args.join(" ")));

    let output = Command::new(Config::get().git_cmd())
        .args(args)
        .output()
        .map_err(GitChangeError::IoError)?;

    if !output.status.success() {
        let code = output.status.code();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitChangeError::GitCliError {
            code,
            stderr,
            args: args.to_vec(),
        });
    }

    Ok(output)
}
