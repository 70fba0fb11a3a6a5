//! polygons - validated rectangles and squares from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = polygons::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
