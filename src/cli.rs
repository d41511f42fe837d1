use clap::Parser;
use license_bom::application::dto::OutputFormat;
use std::path::PathBuf;

/// Build a license bill of materials for a package graph
#[derive(Parser, Debug)]
#[command(name = "license-bom")]
#[command(version)]
#[command(
    about = "Build a license bill of materials for a package graph",
    long_about = "Resolves the given packages and everything they import, finds the license \
                  files bundled with each package and identifies them against known license \
                  texts. Use <prefix>/... to select every package below a directory."
)]
pub struct Args {
    /// Packages to audit: identifiers such as colors/red, or patterns such as colors/...
    #[arg(value_name = "PACKAGES", required = true)]
    pub packages: Vec<String>,

    /// Source root the package identifiers are relative to [default: .]
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Root of the standard packages, which are left out of the report
    #[arg(long, value_name = "DIR")]
    pub std_root: Option<PathBuf>,

    /// JSON file overriding the detected licenses of some packages
    #[arg(short = 'O', long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exclude packages matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "colors/internal/*" -e "*test*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Number of packages scanned concurrently [default: 8]
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Path to config file (auto-discovers license-bom.config.yml in the current directory if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
