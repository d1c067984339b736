//! Lootgen CLI - export joined item tables and compile loot filters

mod config;
mod presets;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lootgen_core::{ItemJoiner, UnifiedItem};
use lootgen_filter::{validate_rules, Compiler, Rule};
use lootgen_sources::{load_tables, provider_from_uri};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SourceConfig;

#[derive(Parser)]
#[command(name = "lootgen")]
#[command(about = "Loot filter generator - join base item tables and compile filter rules")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Table source: a JSON export directory, a file:// URI or an http(s) base URL
    #[arg(long)]
    tables: Option<String>,

    /// Game patch tag, e.g. 3.25.3.4 or 4.1.0.11
    #[arg(long)]
    game_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the base item tables and write the items as JSON
    ExportItems {
        #[command(flatten)]
        source: SourceArgs,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a rules JSON file
    ValidateRules {
        /// Path to the rules JSON file
        rules: PathBuf,
    },

    /// Compile a rules JSON file into filter text
    Compile {
        /// Path to the rules JSON file
        rules: PathBuf,

        /// Hand-written filter appended after the compiled rules
        #[arg(long, env = "LOOTGEN_BASE_FILTER")]
        base_filter: Option<PathBuf>,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the preset highlight rules from the item tables and compile them
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Hand-written filter appended after the generated rules
        #[arg(long, env = "LOOTGEN_BASE_FILTER")]
        base_filter: Option<PathBuf>,

        /// Output path for the filter
        #[arg(short, long, default_value = "output.filter")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so exported documents can be piped from stdout
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::ExportItems { source, output } => {
            export_items(&source, output.as_deref()).await?;
        }
        Commands::ValidateRules { rules } => {
            validate_rules_file(&rules)?;
        }
        Commands::Compile {
            rules,
            base_filter,
            output,
        } => {
            compile_rules_file(&rules, base_filter.as_deref(), output.as_deref())?;
        }
        Commands::Generate {
            source,
            base_filter,
            output,
        } => {
            generate_filter(&source, base_filter.as_deref(), &output).await?;
        }
    }

    Ok(())
}

async fn load_items(source: &SourceArgs) -> Result<Vec<UnifiedItem>> {
    let config = SourceConfig::from_env()?
        .with_overrides(source.tables.clone(), source.game_version.clone());
    let version = config.game_version.clone();
    let provider = provider_from_uri(config.source_uri()?)?;

    info!("Loading item tables for game version {}", version);
    let tables = load_tables(provider.as_ref(), &version)
        .await
        .with_context(|| format!("Failed to load item tables for {}", version))?;
    info!("Loaded {} table rows", tables.row_count());

    let items = ItemJoiner::default().join(tables)?;
    info!("Joined {} items", items.len());
    Ok(items)
}

async fn export_items(source: &SourceArgs, output: Option<&Path>) -> Result<()> {
    let items = load_items(source).await?;
    let json = serde_json::to_string_pretty(&items)?;
    write_output(output, &json)
}

fn read_rules(path: &Path) -> Result<Vec<Rule>> {
    info!("Loading rules from {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {:?}", path))?;
    let rules: Vec<Rule> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse rules file {:?}", path))?;
    Ok(rules)
}

fn read_base_filter(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("Failed to read base filter {:?}", p))
    })
    .transpose()
}

fn ensure_valid(rules: &[Rule]) -> Result<()> {
    if let Err(errors) = validate_rules(rules) {
        for error in &errors {
            eprintln!("Validation error: {}", error);
        }
        anyhow::bail!("Rule validation failed with {} errors", errors.len());
    }
    Ok(())
}

fn validate_rules_file(path: &Path) -> Result<()> {
    let rules = read_rules(path)?;
    ensure_valid(&rules)?;

    println!("Rules file is valid");
    println!("  Rules: {}", rules.len());
    Ok(())
}

fn render_filter(rules: &[Rule], base_filter: Option<&str>) -> Result<String> {
    let filter = match base_filter {
        Some(base) => Compiler::compile_with_base(rules, base)?,
        None => Compiler::compile(rules)?,
    };
    Ok(filter)
}

fn compile_rules_file(
    path: &Path,
    base_filter: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let rules = read_rules(path)?;
    ensure_valid(&rules)?;

    let base = read_base_filter(base_filter)?;
    let filter = render_filter(&rules, base.as_deref())?;
    write_output(output, &filter)
}

async fn generate_filter(
    source: &SourceArgs,
    base_filter: Option<&Path>,
    output: &Path,
) -> Result<()> {
    // Read the base filter first so a bad path fails before the table load
    let base = read_base_filter(base_filter)?;
    let items = load_items(source).await?;

    let rules = presets::preset_rules(&items);
    info!("Built {} preset rules", rules.len());

    let filter = render_filter(&rules, base.as_deref())?;
    write_output(Some(output), &filter)?;

    println!("\n=== Filter Generated ===");
    println!("Items: {}", items.len());
    println!("Rules: {}", rules.len());
    println!("Output: {:?}", output);
    Ok(())
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {} bytes to {:?}", content.len(), path);
        }
        None => print!("{}", content),
    }
    Ok(())
}
