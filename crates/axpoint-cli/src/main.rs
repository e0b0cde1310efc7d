//! CLI for resolving screen points and the local device address.
//!
//! # Usage
//!
//! ```bash
//! # Validate and normalize a coordinate string
//! axpoint parse " 12.50, -3 "
//!
//! # Resolve a reserved keyword on a 1000x500 screen
//! axpoint resolve center --width 1000 --height 500
//!
//! # Explicit coordinates pass through unchanged
//! axpoint resolve 40,60 --width 1000 --height 500
//!
//! # List the reserved keywords with their points
//! axpoint keywords --width 390 --height 844
//!
//! # Local IPv4 address, preferring Wi-Fi
//! axpoint ip --interface en0
//!
//! # JSON output
//! axpoint -f json resolve right-bottom -W 1000 -H 500
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use axpoint_core::config::AxpointConfig;
use axpoint_core::network::{InterfaceSource, LocalAddressResolver, SystemInterfaces};
use axpoint_core::point::{ParseError, ScreenPoint, ScreenSize};
use axpoint_core::reserved::{
    Platform, ReservedGeometry, ReservedPosition, Target, MAX_MARGIN_RATIO,
};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Resolve screen coordinates and reserved position keywords.
#[derive(Parser)]
#[command(name = "axpoint")]
#[command(about = "Resolve screen points and the local device address")]
#[command(version)]
struct Cli {
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
struct ScreenArgs {
    /// Screen width in points (falls back to the config file)
    #[arg(short = 'W', long, env = "AXPOINT_WIDTH")]
    width: Option<f64>,
    /// Screen height in points (falls back to the config file)
    #[arg(short = 'H', long, env = "AXPOINT_HEIGHT")]
    height: Option<f64>,
    /// Fraction of the shorter side used as the edge margin
    #[arg(long)]
    margin_ratio: Option<f64>,
    /// Platform label (e.g. ios, android)
    #[arg(short, long, env = "AXPOINT_PLATFORM")]
    platform: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an `x,y` coordinate string and print it normalized
    Parse {
        /// Coordinates in `x,y` format
        #[arg(allow_hyphen_values = true)]
        coordinates: String,
    },

    /// Resolve a reserved keyword or `x,y` pair to an absolute point
    Resolve {
        /// Reserved keyword (e.g. center, left-top) or `x,y` coordinates
        #[arg(allow_hyphen_values = true)]
        target: String,
        #[command(flatten)]
        screen: ScreenArgs,
    },

    /// List reserved keywords, with their points when a screen size is known
    Keywords {
        #[command(flatten)]
        screen: ScreenArgs,
    },

    /// Print the device's local network address
    Ip {
        /// Prefer this interface when it qualifies (e.g. en0)
        #[arg(short, long, env = "AXPOINT_INTERFACE")]
        interface: Option<String>,
    },

    /// List network interfaces with their addresses
    Interfaces,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[derive(Debug)]
enum CliError {
    Failed(String),
    InvalidInput(String),
    Config(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Failed(_) => ExitCode::from(1),
            CliError::InvalidInput(_) => ExitCode::from(2),
            CliError::Config(_) => ExitCode::from(3),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Failed(msg) => write!(f, "{}", msg),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl ScreenArgs {
    /// Screen size from flags, then config. Both dimensions must come from
    /// the same place. A size taken from config is range-checked here since
    /// `validate` only sees the flags.
    fn screen_size(&self, config: &AxpointConfig) -> Result<Option<ScreenSize>, CliError> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Ok(Some(ScreenSize::new(w, h))),
            _ => config
                .screen
                .map(|size| {
                    size.checked()
                        .map_err(|e| CliError::Config(format!("~/.axpoint/config.json: {}", e)))
                })
                .transpose(),
        }
    }

    fn geometry(&self, config: &AxpointConfig) -> Result<ReservedGeometry, CliError> {
        let mut geometry = config.geometry();
        match self.margin_ratio {
            Some(ratio) => geometry = geometry.with_margin_ratio(ratio),
            None if !ReservedGeometry::is_valid_margin_ratio(geometry.margin_ratio) => {
                return Err(CliError::Config(format!(
                    "~/.axpoint/config.json: margin_ratio {} must be between 0 and {}",
                    geometry.margin_ratio, MAX_MARGIN_RATIO
                )));
            }
            None => {}
        }
        if let Some(platform) = &self.platform {
            geometry = geometry.with_platform(Platform::from(platform.as_str()));
        }
        Ok(geometry)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.width.is_some() != self.height.is_some() {
            return Err(CliError::InvalidInput(
                "--width and --height must be given together".to_string(),
            ));
        }
        if let (Some(w), Some(h)) = (self.width, self.height) {
            if !ScreenSize::new(w, h).is_valid() {
                return Err(CliError::InvalidInput(
                    "--width and --height must be positive numbers".to_string(),
                ));
            }
        }
        if let Some(ratio) = self.margin_ratio {
            if !ReservedGeometry::is_valid_margin_ratio(ratio) {
                return Err(CliError::InvalidInput(format!(
                    "--margin-ratio must be between 0 and {}",
                    MAX_MARGIN_RATIO
                )));
            }
        }
        Ok(())
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AxpointConfig::load();
    debug!(?config, "Loaded configuration");

    match cli.command {
        Command::Parse { ref coordinates } => {
            let point: ScreenPoint = coordinates
                .parse()
                .map_err(|e: ParseError| CliError::InvalidInput(e.to_string()))?;
            print_point(cli.format, &point, None);
            Ok(())
        }
        Command::Resolve { ref target, ref screen } => {
            screen.validate()?;
            let parsed: Target = target
                .parse()
                .map_err(|_| CliError::InvalidInput(format!(
                    "'{}' is neither a reserved keyword nor 'x,y' coordinates",
                    target
                )))?;

            let point = match parsed {
                Target::Coordinates(point) => point,
                Target::Reserved(_) => {
                    let size = screen.screen_size(&config)?.ok_or_else(|| {
                        CliError::Config(
                            "screen size unknown: pass --width and --height or set \"screen\" in ~/.axpoint/config.json"
                                .to_string(),
                        )
                    })?;
                    parsed.resolve(size, &screen.geometry(&config)?)
                }
            };
            let keyword = match parsed {
                Target::Reserved(pos) => Some(pos.keyword()),
                Target::Coordinates(_) => None,
            };
            print_point(cli.format, &point, keyword);
            Ok(())
        }
        Command::Keywords { ref screen } => {
            screen.validate()?;
            let size = screen.screen_size(&config)?;
            let geometry = screen.geometry(&config)?;
            print_keywords(cli.format, size, &geometry);
            Ok(())
        }
        Command::Ip { ref interface } => {
            let preferred = interface.clone().or(config.preferred_interface.clone());
            let resolver = LocalAddressResolver::new(Arc::new(SystemInterfaces))
                .with_preferred_interface(preferred);
            let ip = resolver
                .ip_address()
                .map_err(|e| CliError::Failed(e.to_string()))?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "ip": ip }));
            } else {
                println!("{}", ip);
            }
            Ok(())
        }
        Command::Interfaces => {
            let interfaces = SystemInterfaces
                .list_interfaces()
                .map_err(|e| CliError::Failed(e.to_string()))?;
            if cli.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&interfaces)
                        .map_err(|e| CliError::Failed(e.to_string()))?
                );
            } else if interfaces.is_empty() {
                eprintln!("No network interfaces found");
            } else {
                for iface in &interfaces {
                    let mut flags = Vec::new();
                    if iface.is_up {
                        flags.push("up");
                    }
                    if iface.is_loopback {
                        flags.push("loopback");
                    }
                    println!(
                        "{:<10} {:<5} {:<40} {}",
                        iface.name,
                        iface.family,
                        iface.address,
                        flags.join(",")
                    );
                }
            }
            Ok(())
        }
    }
}

fn print_point(format: OutputFormat, point: &ScreenPoint, keyword: Option<&str>) {
    if format == OutputFormat::Json {
        let mut value = serde_json::json!({ "x": point.x, "y": point.y });
        if let Some(keyword) = keyword {
            value["keyword"] = serde_json::json!(keyword);
        }
        println!("{}", value);
    } else {
        println!("{}", point);
    }
}

fn print_keywords(format: OutputFormat, size: Option<ScreenSize>, geometry: &ReservedGeometry) {
    let rows: Vec<(&str, Option<ScreenPoint>)> = ReservedPosition::ALL
        .into_iter()
        .map(|pos| (pos.keyword(), size.map(|s| pos.point_in(s, geometry))))
        .collect();

    if format == OutputFormat::Json {
        let list: Vec<_> = rows
            .iter()
            .map(|(keyword, point)| match point {
                Some(p) => serde_json::json!({ "keyword": keyword, "x": p.x, "y": p.y }),
                None => serde_json::json!({ "keyword": keyword }),
            })
            .collect();
        println!("{}", serde_json::json!({ "keywords": list }));
    } else {
        for (keyword, point) in rows {
            match point {
                Some(p) => println!("{:<13} {}", keyword, p),
                None => println!("{}", keyword),
            }
        }
    }
}
