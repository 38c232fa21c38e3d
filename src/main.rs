//! dine-scout CLI entry point
//!
//! Restaurant discovery from the command line

use dine_scout::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
