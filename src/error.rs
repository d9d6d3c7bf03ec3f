use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GitChangeError {
    WrongRepository {
        script: String,
        found: String,
    },
    GitCliError {
        code: Option<i32>,
        stderr: String,
        args: Vec<String>,
    },
    HookConflict(PathBuf),
    IoError(std::io::Error),
    FromUtf8Error(std::string::FromUtf8Error),
    Generic(String),
}

impl GitChangeError {
    /// Process exit status for this error. Git failures keep git's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitChangeError::GitCliError { code: Some(code), .. } => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for GitChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitChangeError::WrongRepository { script, .. } => write!(
                f,
                "Error: {} must be run from inside the {} repo",
                script,
                crate::commands::setup::EXPECTED_REPO_NAME
            ),
            GitChangeError::GitCliError { code, stderr, args } => match code {
                Some(c) => write!(
                    f,
                    "git {} exited with status {}: {}",
                    args.join(" "),
                    c,
                    stderr.trim_end()
                ),
                None => write!(
                    f,
                    "git {} terminated by signal: {}",
                    args.join(" "),
                    stderr.trim_end()
                ),
            },
            GitChangeError::HookConflict(path) => write!(
                f,
                "Error: {} exists and is not a symlink; move it aside and re-run",
                path.display()
            ),
            GitChangeError::IoError(e) => write!(f, "IO error: {}", e),
            GitChangeError::FromUtf8Error(e) => write!(f, "From UTF-8 error: {}", e),
            GitChangeError::Generic(e) => write!(f, "Generic error: {}", e),
        }
    }
}

impl std::error::Error for GitChangeError {}

impl From<std::io::Error> for GitChangeError {
    fn from(err: std::io::Error) -> Self {
        GitChangeError::IoError(err)
    }
}

impl From<std::string::FromUtf8Error> for GitChangeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        GitChangeError::FromUtf8Error(err)
    }
}
