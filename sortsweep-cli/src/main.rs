//! The `sortsweep` binary.

fn main() {
    if let Err(e) = sortsweep_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
