//! signapk - build and sign an unpacked APK directory.
//!
//! This binary packages a decoded APK directory with apktool and signs it
//! with jarsigner, exiting non-zero on any validation or tool failure.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; tool output is forwarded at info level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match signapk::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
