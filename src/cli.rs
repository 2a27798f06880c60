use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML engine configuration, built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Road network JSON (`nodes` and `edges`)
    #[arg(long)]
    pub network: PathBuf,
    /// Named places JSON used to resolve named stops
    #[arg(long)]
    pub places: Option<PathBuf>,
    /// Refuel stations JSON
    #[arg(long)]
    pub stations: Option<PathBuf>,
    /// Log filter, overrides `RUST_LOG`
    #[arg(long)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a single trip request
    Plan {
        /// Trip request JSON
        request: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Plan a JSON array of trip requests in parallel
    Batch {
        requests: PathBuf,
    },
    /// Load and validate all inputs, then print a summary
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Geojson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plan() {
        let cli = Cli::parse_from([
            "roadplan",
            "--network",
            "net.json",
            "--places",
            "places.json",
            "plan",
            "trip.json",
            "--format",
            "geojson",
        ]);

        assert_eq!(cli.network, PathBuf::from("net.json"));
        assert_eq!(cli.places, Some(PathBuf::from("places.json")));
        assert!(cli.config.is_none());
        let Command::Plan { request, format } = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(request, PathBuf::from("trip.json"));
        assert_eq!(format, OutputFormat::Geojson);
    }

    #[test]
    fn network_is_required() {
        assert!(Cli::try_parse_from(["roadplan", "check"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
