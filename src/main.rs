use clap::Parser;
use git_change_setup::commands::setup::{self, Mode};
use git_change_setup::config::Config;
use git_change_setup::error::GitChangeError;
use git_change_setup::git::find_repository;
use git_change_setup::utils::{debug_log, invoked_name};
use std::io::Write;

#[derive(Parser)]
#[command(name = "git-change-setup")]
#[command(about = "Link git hooks and set git config for a git-change checkout", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Print the commands that would run without changing anything
    #[arg(short = 'n', long, conflicts_with = "check")]
    dry_run: bool,

    /// Report hooks and config values that are not set up yet
    #[arg(long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();
    Config::init();

    let mode = if cli.dry_run {
        Mode::DryRun
    } else if cli.check {
        Mode::Check
    } else {
        Mode::Apply
    };
    debug_log(&format!("running in {:?} mode", mode));

    let result = find_repository().and_then(|repo| setup::run(&repo, mode, &invoked_name()));
    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => exit_with(e),
    }
}

fn exit_with(err: GitChangeError) -> ! {
    match &err {
        // Pass git's own diagnostics through untouched
        GitChangeError::GitCliError { stderr, .. } => {
            let _ = std::io::stderr().write_all(stderr.as_bytes());
        }
        _ => eprintln!("{}", err),
    }
    std::process::exit(err.exit_code());
}
