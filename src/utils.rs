/// Debug logging utility function
///
/// Prints debug messages with a colored prefix. Messages are shown in builds
/// with debug assertions, or when `GIT_CHANGE_DEBUG` is set.
///
/// # Arguments
///
/// * `msg` - The debug message to print
pub fn debug_log(msg: &str) {
    if debug_enabled() {
        eprintln!("\x1b[1;33m[git-change-setup]\x1b[0m {}", msg);
    }
}

/// Prints a warning regardless of the debug setting.
pub fn warn_log(msg: &str) {
    eprintln!("\x1b[1;33m[git-change-setup]\x1b[0m warning: {}", msg);
}

fn debug_enabled() -> bool {
    cfg!(debug_assertions) || std::env::var_os("GIT_CHANGE_DEBUG").is_some()
}

/// File name the program was invoked as, for user-facing messages.
pub fn invoked_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg| arg.into_string().ok())
        .and_then(|path| {
            std::path::Path::new(&path)
                .file_name()
                .and_then(|name| name.to_str())
                .map(|s| s.to_string())
        })
        .unwrap_or("git-change-setup".to_string())
}
