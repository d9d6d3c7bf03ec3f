use std::env;
use std::path::Path;
use std::sync::OnceLock;

/// Centralized configuration for the application
pub struct Config {
    git_path: String,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    /// Initialize the global configuration exactly once.
    /// Safe to call multiple times; subsequent calls are no-ops.
    pub fn init() {
        let _ = Self::get();
    }

    /// Access the global configuration, resolving it on first use.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| Config {
            git_path: resolve_git_path(),
        })
    }

    /// Returns the command to invoke git.
    pub fn git_cmd(&self) -> &str {
        &self.git_path
    }
}

fn resolve_git_path() -> String {
    resolve_git_path_with(env::var("GIT_CHANGE_GIT").ok())
}

fn resolve_git_path_with(override_path: Option<String>) -> String {
    // 1) Environment override
    if let Some(val) = override_path {
        if !val.trim().is_empty() {
            return val;
        }
    }

    // 2) Probe common locations
    let candidates: &[&str] = &[
        "/opt/homebrew/bin/git",
        "/usr/local/bin/git",
        "/usr/bin/git",
        "/bin/git",
        r"C:\Program Files\Git\bin\git.exe",
        r"C:\Program Files (x86)\Git\bin\git.exe",
    ];

    if let Some(found) = candidates.iter().map(Path::new).find(|p| p.is_file()) {
        return found.to_string_lossy().to_string();
    }

    // 3) Fallback: rely on system PATH
    "git".to_string()
}
