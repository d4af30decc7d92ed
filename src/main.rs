//! Locker CLI - Record store backed by plain text files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = locker::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
