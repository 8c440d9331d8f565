// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use clap::{builder::ValueParser, Parser};
use std::{collections::HashSet, sync::LazyLock};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "foodlink",
    about = "A coordination server connecting surplus-food donors, NGOs and delivery riders,
    tracking each donation from listing through pickup, delivery or expiry over a REST API.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// foodlink log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for foodlink"
    )]
    pub foodlink_log_level: String,

    /// foodlink HTTP port (default: 15730)
    #[clap(
        long,
        default_value = "15730",
        env,
        help = "Set the HTTP port for foodlink"
    )]
    pub foodlink_http_port: i32,

    /// The IP address that the server binds to, in IPv4 format (e.g., 192.168.1.1).
    #[clap(
        long,
        env,
        default_value = "0.0.0.0",
        help = "The IP address that the server binds to, in IPv4 format (e.g., 192.168.1.1).",
        value_parser = ValueParser::new(|s: &str| {
            // Ensure the input is a valid IPv4 address
            if s.parse::<std::net::Ipv4Addr>().is_err() {
                return Err("The bind IP address must be a valid IPv4 address.".to_string());
            }

            // If the address is valid, return it
            Ok(s.to_string())
        })
    )]
    pub foodlink_bind_ip: Option<String>,

    /// FoodLink public URL (default: "http://localhost:15730")
    #[clap(
        long,
        default_value = "http://localhost:15730",
        env,
        help = "Set the public URL for foodlink"
    )]
    pub foodlink_public_url: String,

    /// CORS allowed origins (default: "*")
    #[clap(
        long,
        default_value = "*",
        env,
        help = "Set the allowed CORS origins (comma-separated list, e.g., \"https://example.com, https://another.com\")",
        value_parser = ValueParser::new(|s: &str| -> Result<HashSet<String>, String> {
            let set: HashSet<String> = s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            Ok(set)
        })
    )]
    pub foodlink_cors_origins: HashSet<String>,

    /// CORS max age in seconds (default: 86400)
    #[clap(
        long,
        default_value = "86400",
        env,
        help = "Set the CORS max age in seconds"
    )]
    pub foodlink_cors_max_age: i32,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub foodlink_ansi_logs: bool,

    /// Enable log file output (default: false)
    /// If false, logs will be printed to stdout
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub foodlink_log_to_file: bool,

    /// Maximum number of rotated server log files to keep (default: 7)
    #[clap(
        long,
        default_value = "7",
        env,
        help = "Set the maximum number of rotated server log files to keep"
    )]
    pub foodlink_max_server_log_files: usize,

    /// Root directory for all durable state (databases, logs)
    #[clap(
        long,
        default_value = "./foodlink_data",
        env,
        help = "Set the root data directory for foodlink"
    )]
    pub foodlink_root_dir: String,

    /// Cache size in bytes for the donation database (default: 128MB)
    #[clap(
        long,
        env,
        help = "Set the cache size in bytes for the donation database"
    )]
    pub foodlink_donation_cache_size: Option<u64>,

    /// Cache size in bytes for the metadata database (default: 128MB)
    #[clap(
        long,
        env,
        help = "Set the cache size in bytes for the metadata database"
    )]
    pub foodlink_metadata_cache_size: Option<u64>,

    /// Interval in seconds between expiry sweeps over available donations (default: 300)
    #[clap(
        long,
        default_value = "300",
        env,
        help = "Set the interval in seconds between expiry sweeps over available donations",
        value_parser = clap::value_parser!(u64).range(10..)
    )]
    pub foodlink_expiry_sweep_interval_seconds: u64,

    /// Enable HTTP response compression (default: false)
    #[clap(long, default_value = "false", env, help = "Enable HTTP compression")]
    pub foodlink_http_compression_enabled: bool,
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            foodlink_log_level: "info".to_string(),
            foodlink_http_port: 15730,
            foodlink_bind_ip: None,
            foodlink_public_url: "http://localhost:15730".to_string(),
            foodlink_cors_origins: ["*".to_string()].into_iter().collect(),
            foodlink_cors_max_age: 86400,
            foodlink_ansi_logs: false,
            foodlink_log_to_file: false,
            foodlink_max_server_log_files: 5,
            foodlink_root_dir: std::env::temp_dir()
                .join("foodlink_test_data")
                .to_string_lossy()
                .into_owned(),
            foodlink_donation_cache_size: None,
            foodlink_metadata_cache_size: None,
            foodlink_expiry_sweep_interval_seconds: 300,
            foodlink_http_compression_enabled: false,
        }
    }
}
