use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context as AnyhowContext, Result};
use aquasite_cms::{load_projects, ProjectLoad};
use aquasite_protocol::labels::{Localized, Message};
use aquasite_protocol::{serialize_json_pretty, Language};
use aquasite_search::{FilterSelection, ProjectFilter, Selection};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

mod config;
mod render;

pub use config::{Overrides, Settings, SourceSetting};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_lines(lines: &[String]) -> Result<()> {
    print_stdout(&lines.join("\n"))
}

#[derive(Parser)]
#[command(name = "aquasite")]
#[command(about = "Browse and filter published aquaculture projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (defaults to ./aquasite.toml when present)
    #[arg(long, global = true, env = "AQUASITE_CONFIG")]
    config: Option<PathBuf>,

    /// CMS GraphQL endpoint
    #[arg(long, global = true, env = "AQUASITE_CMS_URL")]
    endpoint: Option<String>,

    /// Bearer token for the CMS endpoint
    #[arg(long, global = true, env = "AQUASITE_CMS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Site language: en or uk
    #[arg(long, global = true, env = "AQUASITE_LANG")]
    lang: Option<String>,

    /// Read projects from a JSON export instead of the CMS
    #[arg(long, global = true)]
    from_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, optionally narrowed by facet filters
    Projects(ProjectsArgs),

    /// Show the selectable values of every filter
    Facets(FacetsArgs),

    /// Show one case study
    Project(ProjectArgs),
}

#[derive(Args)]
struct ProjectsArgs {
    /// Project status (Planning, Design, Construction, Operational, Completed)
    #[arg(long, default_value = aquasite_search::ALL)]
    status: String,

    /// System type (RAS, Biofloc, Hybrid, Flow-through, IMTA, Other)
    #[arg(long, default_value = aquasite_search::ALL)]
    system_type: String,

    /// Species, matched as a case-insensitive substring
    #[arg(long, default_value = aquasite_search::ALL_SPECIES)]
    species: String,

    /// Region, matched as a case-insensitive substring of the location
    #[arg(long, default_value = aquasite_search::ALL_REGIONS)]
    region: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FacetsArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Project slug
    slug: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Projects(args) => args.json,
        Commands::Facets(args) => args.json,
        Commands::Project(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let settings = config::resolve(
        Overrides {
            config: cli.config,
            endpoint: cli.endpoint,
            auth_token: cli.token,
            language: cli.lang,
            from_file: cli.from_file,
        },
        &cwd,
    )?;

    match cli.command {
        Commands::Projects(args) => run_projects(args, &settings).await?,
        Commands::Facets(args) => run_facets(args, &settings).await?,
        Commands::Project(args) => run_project(args, &settings).await?,
    }
    Ok(())
}

/// Fetch the listing. A failed load ends the process with the localized
/// failure message; it is never shown as an empty listing.
async fn load_or_exit(settings: &Settings, json: bool) -> Result<ProjectFilter> {
    let source = settings.build_source()?;
    let lang = settings.language;
    match load_projects(source.as_ref(), lang).await {
        ProjectLoad::Loaded(projects) => Ok(ProjectFilter::new(projects)),
        ProjectLoad::Failed { reason } => {
            report_failure(json, lang, Message::LoadFailed, &reason)?;
            std::process::exit(1);
        }
    }
}

fn parse_selection(args: &ProjectsArgs) -> Result<FilterSelection> {
    Ok(FilterSelection::new()
        .with_status(Selection::parse_status(&args.status).context("Invalid --status")?)
        .with_system_type(
            Selection::parse_system_type(&args.system_type).context("Invalid --system-type")?,
        )
        .with_species(&args.species)
        .with_region(&args.region))
}

async fn run_projects(args: ProjectsArgs, settings: &Settings) -> Result<()> {
    let selection = parse_selection(&args)?;
    let filter = load_or_exit(settings, args.json).await?;
    let outcome = filter.apply(&selection);
    let lang = settings.language;

    if args.json {
        let empty_message = match (outcome.is_empty(), outcome.reset_offered()) {
            (false, _) => None,
            (true, true) => Some(Message::NoMatches.label(lang)),
            (true, false) => Some(Message::NoProjects.label(lang)),
        };
        print_stdout(&serialize_json_pretty(&json!({
            "status": "ok",
            "language": lang,
            "selection": selection,
            "total": outcome.total(),
            "count": outcome.len(),
            "empty": outcome.is_empty(),
            "resetOffered": outcome.reset_offered(),
            "message": empty_message,
            "projects": outcome.matches(),
        }))?)?;
    } else {
        print_lines(&render::listing(&outcome, lang))?;
    }
    Ok(())
}

async fn run_facets(args: FacetsArgs, settings: &Settings) -> Result<()> {
    let filter = load_or_exit(settings, args.json).await?;
    let lang = settings.language;

    if args.json {
        print_stdout(&serialize_json_pretty(&json!({
            "status": "ok",
            "language": lang,
            "total": filter.len(),
            "facets": filter.facets(),
        }))?)?;
    } else {
        print_lines(&render::facets(filter.facets(), lang))?;
    }
    Ok(())
}

async fn run_project(args: ProjectArgs, settings: &Settings) -> Result<()> {
    let source = settings.build_source()?;
    let lang = settings.language;

    let project = match source.fetch_project(lang, &args.slug).await {
        Ok(project) => project,
        Err(err) => {
            log::error!("Failed to load project {} from {}: {err}", args.slug, source.describe());
            report_failure(args.json, lang, Message::LoadFailed, &err.to_string())?;
            std::process::exit(1);
        }
    };

    let Some(project) = project else {
        report_failure(args.json, lang, Message::ProjectNotFound, &args.slug)?;
        std::process::exit(1);
    };

    if args.json {
        print_stdout(&serialize_json_pretty(&json!({
            "status": "ok",
            "language": lang,
            "project": project,
        }))?)?;
    } else {
        print_lines(&render::project_detail(&project, lang))?;
    }
    Ok(())
}

fn report_failure(json: bool, lang: Language, message: Message, detail: &str) -> Result<()> {
    let text = message.label(lang);
    if json {
        print_stdout(&serialize_json_pretty(&json!({
            "status": "error",
            "language": lang,
            "message": text,
            "reason": detail,
        }))?)?;
    } else {
        eprintln!("{text}: {detail}");
    }
    Ok(())
}
