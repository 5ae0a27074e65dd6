//! Server configuration and CLI argument parsing
//!
//! All settings come from command-line arguments with environment-variable
//! fallbacks (FLOODGATE_ prefix). Precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Default values (lowest priority)
//!
//! # Example Usage
//!
//! ```bash
//! # Using CLI arguments
//! floodgate --port 9090 --burst 50 --refill-ms 200
//!
//! # Using environment variables
//! export FLOODGATE_PORT=8080
//! export FLOODGATE_BURST=50
//! floodgate
//!
//! # Mixed (CLI overrides env)
//! export FLOODGATE_PORT=8080
//! floodgate --port 9090  # Uses port 9090
//! ```

use anyhow::{Result, anyhow};
use clap::Parser;
use floodgate::{Policy, Rate};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the server
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listener configuration
    pub listen: ListenConfig,
    /// Admission policy configuration
    pub limit: LimitConfig,
    /// Bucket registry configuration
    pub registry: RegistryConfig,
    /// Channel buffer size for actor communication
    pub buffer_size: usize,
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Admission policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LimitConfig {
    /// Maximum burst size per client
    pub burst: u32,
    /// Time to regenerate one token, in milliseconds
    pub refill_ms: u64,
}

/// Bucket registry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Expected number of distinct clients
    pub capacity: usize,
    /// Interval between eviction sweeps (seconds)
    pub sweep_interval: u64,
    /// Idle time after which a client's bucket is dropped (seconds)
    pub idle_timeout: u64,
}

/// Command-line arguments for the server
///
/// All arguments can also be set via environment variables with the
/// FLOODGATE_ prefix. CLI arguments take precedence over environment
/// variables.
#[derive(Parser, Debug)]
#[command(
    name = "floodgate",
    about = "Per-IP admission control for HTTP services",
    long_about = "An HTTP server that throttles clients with per-IP token buckets.\n\nEnvironment variables with FLOODGATE_ prefix are supported. CLI arguments take precedence over environment variables."
)]
pub struct Args {
    // Listener
    #[arg(
        long,
        value_name = "HOST",
        help = "Host to bind",
        default_value = "127.0.0.1",
        env = "FLOODGATE_HOST"
    )]
    pub host: String,
    #[arg(
        long,
        value_name = "PORT",
        help = "Port to listen on",
        default_value_t = 8080,
        env = "FLOODGATE_PORT"
    )]
    pub port: u16,

    // Admission policy
    #[arg(
        long,
        value_name = "N",
        help = "Maximum burst size per client",
        default_value_t = 20,
        env = "FLOODGATE_BURST"
    )]
    pub burst: u32,
    #[arg(
        long,
        value_name = "MILLIS",
        help = "Time to regenerate one token (milliseconds)",
        default_value_t = 1000,
        env = "FLOODGATE_REFILL_MS"
    )]
    pub refill_ms: u64,

    // Registry
    #[arg(
        long,
        value_name = "SIZE",
        help = "Expected number of distinct clients",
        default_value_t = 10_000,
        env = "FLOODGATE_REGISTRY_CAPACITY"
    )]
    pub registry_capacity: usize,
    #[arg(
        long,
        value_name = "SECS",
        help = "Interval between eviction sweeps (seconds)",
        default_value_t = 60,
        env = "FLOODGATE_SWEEP_INTERVAL"
    )]
    pub sweep_interval: u64,
    #[arg(
        long,
        value_name = "SECS",
        help = "Idle time before a client's bucket is dropped (seconds)",
        default_value_t = 300,
        env = "FLOODGATE_IDLE_TIMEOUT"
    )]
    pub idle_timeout: u64,

    // General options
    #[arg(
        long,
        value_name = "SIZE",
        help = "Channel buffer size",
        default_value_t = 10_000,
        env = "FLOODGATE_BUFFER_SIZE"
    )]
    pub buffer_size: usize,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level: error, warn, info, debug, trace",
        default_value = "info",
        env = "FLOODGATE_LOG_LEVEL"
    )]
    pub log_level: String,

    // Utility options
    #[arg(
        long,
        help = "List all environment variables and exit",
        action = clap::ArgAction::SetTrue
    )]
    pub list_env_vars: bool,
}

impl Config {
    /// Build configuration from environment variables and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the admission policy or eviction settings are
    /// invalid.
    pub fn from_env_and_args() -> Result<Self> {
        // Clap resolves the precedence: CLI > env > defaults
        let args = Args::parse();

        // Handle --list-env-vars
        if args.list_env_vars {
            Self::print_env_vars();
            std::process::exit(0);
        }

        let config = Config {
            listen: ListenConfig {
                host: args.host,
                port: args.port,
            },
            limit: LimitConfig {
                burst: args.burst,
                refill_ms: args.refill_ms,
            },
            registry: RegistryConfig {
                capacity: args.registry_capacity,
                sweep_interval: args.sweep_interval,
                idle_timeout: args.idle_timeout,
            },
            buffer_size: args.buffer_size,
            log_level: args.log_level,
        };

        config.validate()?;

        Ok(config)
    }

    /// The admission policy described by this configuration.
    pub fn policy(&self) -> Result<Policy> {
        let rate = Rate::new(Duration::from_millis(self.limit.refill_ms));
        Ok(Policy::new(rate, self.limit.burst)?)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.limit.burst == 0 {
            return Err(anyhow!(
                "--burst must be at least 1: a client must be able to make at least one request"
            ));
        }
        if self.limit.refill_ms == 0 {
            return Err(anyhow!(
                "--refill-ms must be at least 1: tokens cannot regenerate instantly"
            ));
        }
        if self.registry.sweep_interval == 0 {
            return Err(anyhow!("--sweep-interval must be at least 1 second"));
        }
        if self.registry.idle_timeout == 0 {
            return Err(anyhow!("--idle-timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// Print all available environment variables and their descriptions
    fn print_env_vars() {
        println!("Floodgate Environment Variables");
        println!("===============================");
        println!();
        println!("All environment variables use the FLOODGATE_ prefix.");
        println!("CLI arguments take precedence over environment variables.");
        println!();

        println!("Listener:");
        println!("  FLOODGATE_HOST=<host>                 Host to bind [default: 127.0.0.1]");
        println!("  FLOODGATE_PORT=<port>                 Port to listen on [default: 8080]");
        println!();

        println!("Admission policy:");
        println!("  FLOODGATE_BURST=<n>                   Maximum burst size per client [default: 20]");
        println!(
            "  FLOODGATE_REFILL_MS=<millis>          Time to regenerate one token [default: 1000]"
        );
        println!();

        println!("Registry:");
        println!(
            "  FLOODGATE_REGISTRY_CAPACITY=<size>    Expected number of distinct clients [default: 10000]"
        );
        println!(
            "  FLOODGATE_SWEEP_INTERVAL=<secs>       Interval between eviction sweeps [default: 60]"
        );
        println!(
            "  FLOODGATE_IDLE_TIMEOUT=<secs>         Idle time before a bucket is dropped [default: 300]"
        );
        println!();

        println!("General:");
        println!("  FLOODGATE_BUFFER_SIZE=<size>          Channel buffer size [default: 10000]");
        println!(
            "  FLOODGATE_LOG_LEVEL=<level>           Log level: error, warn, info, debug, trace [default: info]"
        );
        println!();

        println!("Examples:");
        println!("  # Allow bursts of 50, steady rate of 5 requests per second");
        println!("  export FLOODGATE_BURST=50");
        println!("  export FLOODGATE_REFILL_MS=200");
        println!();
        println!("  # Run server (CLI args override env vars)");
        println!("  floodgate --port 9090");
    }
}
