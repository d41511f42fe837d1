mod cli;

use clap::Parser;
use cli::Args;
use license_bom::adapters::outbound::console::StderrProgressReporter;
use license_bom::adapters::outbound::filesystem::{
    FileSystemLicenseLocator, FileSystemReader, SourceTreeResolver,
};
use license_bom::application::dto::{OutputFormat, ScanRequest, DEFAULT_JOBS};
use license_bom::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use license_bom::application::use_cases::AuditLicensesUseCase;
use license_bom::config::{self, ConfigFile};
use license_bom::shared::error::ExitCode;
use license_bom::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported as errors by clap too
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments.as_i32()
            } else {
                ExitCode::Success.as_i32()
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// Effective settings: command-line values win over the config file
struct Settings {
    root: PathBuf,
    std_root: Option<PathBuf>,
    overrides: Option<PathBuf>,
    format: OutputFormat,
    exclude: Vec<String>,
    jobs: usize,
}

impl Settings {
    fn merge(args: &Args, config: ConfigFile) -> Self {
        let format = args
            .format
            .or_else(|| config.output_format())
            .unwrap_or_default();
        let exclude = if args.exclude.is_empty() {
            config.exclude_packages.unwrap_or_default()
        } else {
            args.exclude.clone()
        };

        Self {
            root: args
                .root
                .clone()
                .or(config.root)
                .unwrap_or_else(|| PathBuf::from(".")),
            std_root: args.std_root.clone().or(config.std_root),
            overrides: args.overrides.clone().or(config.overrides),
            format,
            exclude,
            jobs: args.jobs.or(config.jobs).unwrap_or(DEFAULT_JOBS),
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Ok(config)
        }
        None => match config::discover_config(Path::new("."))? {
            Some(config) => {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
                Ok(config)
            }
            None => Ok(ConfigFile::default()),
        },
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = Settings::merge(&args, config);

    // Create adapters (Dependency Injection)
    let package_resolver = SourceTreeResolver::new(&settings.root, settings.std_root.as_deref())?;
    let license_locator = FileSystemLicenseLocator::new();
    let override_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    let use_case = AuditLicensesUseCase::new(
        package_resolver,
        license_locator,
        override_reader,
        progress_reporter,
    );

    let request = ScanRequest::parse(&args.packages)?
        .with_overrides(settings.overrides)
        .with_exclude_patterns(settings.exclude)
        .with_jobs(settings.jobs);

    let response = use_case.execute(request).await?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let report = formatter.format(&response.results, &response.metadata)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output));
    presenter.present(&report)?;

    Ok(())
}
