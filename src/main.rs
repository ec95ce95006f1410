use colored::*;
use confd_template::cli;
use std::process;

fn main() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    if let Err(e) = cli::run() {
        eprintln!("{}: {}", "Error".bright_red(), e);
        process::exit(1);
    }
}
