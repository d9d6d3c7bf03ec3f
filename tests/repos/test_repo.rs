use assert_cmd::Command;
use git2::{Config, ConfigLevel, Repository};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch checkout laid out like git-change: `etc/githooks/*` scripts and
/// a fresh `.git` directory. Commands run against a private `HOME`, so global
/// config writes land in a temp file instead of the real `~/.gitconfig`.
pub struct TestRepo {
    // Held so the directory outlives the test
    _tmp: TempDir,
    ceiling: PathBuf,
    home: PathBuf,
    path: PathBuf,
}

impl TestRepo {
    pub fn new(name: &str) -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let ceiling = tmp.path().to_path_buf();
        let path = ceiling.join(name);
        let home = ceiling.join("home");
        fs::create_dir_all(&home).expect("failed to create home dir");

        let scripts = path.join("etc").join("githooks");
        fs::create_dir_all(&scripts).expect("failed to create etc/githooks");
        fs::write(scripts.join("commit-msg"), "#!/bin/sh\nexit 0\n")
            .expect("failed to write commit-msg script");
        fs::write(scripts.join("pre-commit"), "#!/bin/sh\nexit 0\n")
            .expect("failed to write pre-commit script");

        Repository::init(&path).expect("failed to initialize git2 repository");

        Self {
            _tmp: tmp,
            ceiling,
            home,
            path,
        }
    }

    /// A directory next to the repo that is not under version control.
    pub fn sibling_dir(&self, name: &str) -> PathBuf {
        let dir = self.ceiling.join(name);
        fs::create_dir_all(&dir).expect("failed to create sibling dir");
        dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hook_path(&self, hook: &str) -> PathBuf {
        self.path.join(".git").join("hooks").join(hook)
    }

    /// Builds a command for the setup binary, run from `dir`.
    pub fn setup_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_git-change-setup"));
        cmd.current_dir(dir)
            .env("GIT_CEILING_DIRECTORIES", &self.ceiling)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("GIT_CONFIG_GLOBAL", self.global_config_path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE");
        cmd
    }

    pub fn setup(&self) -> Command {
        self.setup_in(&self.path)
    }

    /// Reads a value from the repository's own config file only.
    pub fn local_config(&self, key: &str) -> Option<String> {
        let repo = Repository::open(&self.path).expect("failed to open repository");
        let config = repo
            .config()
            .and_then(|c| c.open_level(ConfigLevel::Local))
            .expect("failed to open local config");
        config.get_string(key).ok()
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.home.join(".gitconfig")
    }

    /// Reads a value from the private global config, if it was ever written.
    pub fn global_config(&self, key: &str) -> Option<String> {
        let path = self.global_config_path();
        if !path.exists() {
            return None;
        }
        let config = Config::open(&path).expect("failed to open global config");
        config.get_string(key).ok()
    }

    pub fn set_global_config(&self, key: &str, value: &str) {
        let mut config =
            Config::open(&self.global_config_path()).expect("failed to open global config");
        config
            .set_str(key, value)
            .expect("failed to write global config");
    }

    pub fn global_config_file(&self) -> String {
        fs::read_to_string(self.global_config_path()).unwrap_or_default()
    }

    pub fn config_file(&self) -> String {
        fs::read_to_string(self.path.join(".git").join("config"))
            .expect("failed to read .git/config")
    }

    pub fn hook_link(&self, hook: &str) -> Option<PathBuf> {
        fs::read_link(self.hook_path(hook)).ok()
    }
}
