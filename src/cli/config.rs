//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "defaults.radius")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", masked(key, &value));
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, masked(key, value));
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("radius = {}", config.defaults.radius);
    println!("category = \"{}\"", config.defaults.category);
    println!("format = \"{}\"", config.defaults.format);
    println!("card_width = {}", config.defaults.card_width);
    println!("card_height = {}", config.defaults.card_height);
    println!("max_results = {}", config.defaults.max_results);
    println!();

    println!("[provider]");
    println!("places_url = \"{}\"", config.provider.places_url);
    println!("legacy_url = \"{}\"", config.provider.legacy_url);
    println!("geocode_url = \"{}\"", config.provider.geocode_url);
    println!("timeout_secs = {}", config.provider.timeout_secs);
    println!("use_modern_api = {}", config.provider.use_modern_api);
    println!();

    println!("[api_keys]");
    println!("google = {}", describe_key(&config.api_keys.google, config.api_key().is_some()));
}

/// Hide credential values on output
fn masked<'a>(key: &str, value: &'a str) -> &'a str {
    if key == "api_keys.google" && !value.is_empty() {
        "***"
    } else {
        value
    }
}

/// Masked credential line: never prints the key itself
fn describe_key(file_value: &str, effective: bool) -> &'static str {
    match (file_value.trim().is_empty(), effective) {
        (false, _) => "\"***\" # configured",
        (true, true) => "\"\" # set via environment",
        (true, false) => "\"\" # not configured",
    }
}
