//! schemagen — migration generator CLI
//!
//! Prints generated migrations to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Full migration file
//! schemagen migration create_posts_table -s "title:string, body:text:nullable"
//!
//! # Only the up/down bodies, as JSON
//! schemagen migration add_votes_to_posts_table -s "votes:integer" --fragments -f json
//!
//! # Pivot table
//! schemagen pivot posts tags
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use schemagen::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(version)]
#[command(about = "Generate migrations from a name and a column shorthand", long_about = None)]
#[command(after_help = "EXAMPLES:
    schemagen migration create_posts_table -s 'title:string, user_id:integer:foreign'
    schemagen migration remove_avatar_from_users_table -s 'avatar:string:nullable' --fragments
    schemagen pivot posts tags -s 'weight:integer:default(0)'
    schemagen explain add_votes_to_posts_table -s 'votes:integer' -f json")]
struct Cli {
    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory with stub overrides
    #[arg(long, global = true, env = "SCHEMAGEN_STUBS")]
    stubs: Option<PathBuf>,

    /// Config file (defaults to ./schemagen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a migration from its name
    Migration {
        /// Migration name, e.g. create_posts_table
        name: String,

        /// Column shorthand, e.g. "name:string, age:integer:nullable"
        #[arg(short, long, default_value = "")]
        schema: String,

        /// Print only the up/down bodies
        #[arg(long)]
        fragments: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Generate a many-to-many pivot table migration
    Pivot {
        table_one: String,
        table_two: String,

        /// Extra pivot columns
        #[arg(short, long)]
        schema: Option<String>,
    },
    /// Show how a name and schema are parsed
    Explain {
        name: String,

        #[arg(short, long, default_value = "")]
        schema: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("schemagen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = Config::discover(cli.config.as_deref()).context("failed to load config")?;
    if let Some(dir) = &cli.stubs {
        config.stubs.dir = Some(dir.clone());
    }
    let builder = config.builder().context("failed to load stubs")?;

    match &cli.command {
        Commands::Migration {
            name,
            schema,
            fragments,
            format,
        } => generate_migration(&builder, &config, name, schema, *fragments, format),
        Commands::Pivot {
            table_one,
            table_two,
            schema,
        } => {
            generate_pivot(&builder, &config, table_one, table_two, schema.as_deref());
            Ok(())
        }
        Commands::Explain {
            name,
            schema,
            format,
        } => explain(name, schema, format),
    }
}

fn generate_migration(
    builder: &SyntaxBuilder,
    config: &Config,
    name: &str,
    schema: &str,
    fragments_only: bool,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let intent = parse_name(name);
    let columns = parse_schema(schema);
    let fragments = builder
        .create(&columns, &intent)
        .with_context(|| format!("migration name '{}' resolved to action '{}'", name, intent.action))?;

    let stub = MigrationStub::new(name);
    let path = config.migrations.path.join(stub.file_name());

    match (format, fragments_only) {
        (OutputFormat::Json, true) => {
            println!("{}", serde_json::to_string_pretty(&fragments)?);
        }
        (OutputFormat::Json, false) => {
            let out = serde_json::json!({
                "path": path,
                "class": stub.class_name(),
                "table": intent.table,
                "action": intent.action,
                "content": stub.render(builder.templates(), &fragments, &intent.table),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (OutputFormat::Text, true) => {
            println!("{}", "up:".green().bold());
            println!("{}", fragments.up);
            println!();
            println!("{}", "down:".green().bold());
            println!("{}", fragments.down);
        }
        (OutputFormat::Text, false) => {
            eprintln!("{} {}", "Migration:".green().bold(), path.display().to_string().cyan());
            println!("{}", stub.render(builder.templates(), &fragments, &intent.table));
        }
    }
    Ok(())
}

fn generate_pivot(
    builder: &SyntaxBuilder,
    config: &Config,
    table_one: &str,
    table_two: &str,
    schema: Option<&str>,
) {
    let pivot = PivotMigration::new(table_one, table_two);
    let columns = schema.map(parse_schema);
    let path = config.migrations.path.join(pivot.file_name());

    eprintln!("{} {}", "Migration:".green().bold(), path.display().to_string().cyan());
    println!("{}", pivot.render(builder, columns.as_ref()));
}

fn explain(name: &str, schema: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let intent = parse_name(name);
    let columns = parse_schema(schema);

    if let OutputFormat::Json = format {
        let out = serde_json::json!({ "intent": intent, "schema": columns });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Parsed Structure:".green().bold());
    let action = match intent.action {
        Action::Other(_) => format!("{} (unrecognized)", intent.action).red(),
        _ => intent.action.to_string().cyan(),
    };
    println!("  {} {}", "Action:".dimmed(), action);
    println!("  {} {}", "Table:".dimmed(), intent.table.white());

    if !columns.is_empty() {
        println!("  {}", "Columns:".dimmed());
        for col in &columns {
            println!("    • {}", col.to_string().white());
        }
    }
    Ok(())
}
