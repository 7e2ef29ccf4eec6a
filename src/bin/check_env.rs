//! Utility to check that the scraper's environment variables are set.
//!
//! Loads `.env` from the current directory and prints each variable masked.

use dotenvy::dotenv;
use smogon_contrib::config::{mask_secret, ENV_SESSION, ENV_USER_ID};
use std::env;

/// Main entry point for the environment check.
///
/// Exits with status 1 when any variable is missing.
fn main() -> anyhow::Result<()> {
    dotenv().ok();

    println!("Environment Variable Check\n");
    println!("Current directory: {}", env::current_dir()?.display());
    println!("\nEnvironment Variables:");
    println!("{}", "─".repeat(50));

    let mut has_issues = false;
    for key in [ENV_SESSION, ENV_USER_ID] {
        match env::var(key) {
            Ok(value) if !value.is_empty() => {
                println!(
                    "{}: {} ({} chars)",
                    key,
                    mask_secret(&value),
                    value.chars().count()
                );
            }
            _ => {
                println!("{}: NOT SET", key);
                has_issues = true;
            }
        }
    }

    println!("{}", "─".repeat(50));

    if has_issues {
        println!("\nIssues found!\n");
        println!("Make sure you have a .env file in the project root with:");
        println!("   {}=your_session_cookie_here", ENV_SESSION);
        println!("   {}=641532", ENV_USER_ID);
        std::process::exit(1);
    }

    println!("\nAll environment variables are set!");
    println!("You can now run: smogon-contrib");
    Ok(())
}
