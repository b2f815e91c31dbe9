//! oxide-codegen CLI
//!
//! Command-line tool for generating data-access code from a database schema.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use oxide_codegen::prelude::*;

/// Generate data-access code from a PostgreSQL schema.
#[derive(Parser)]
#[command(name = "oxide-codegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL.
    #[arg(short, long, env = "DATABASE_URL", default_value = "postgres://localhost/postgres")]
    database: String,

    /// Source database dialect.
    #[arg(long, default_value = "postgres")]
    dialect: DatabaseEngine,

    /// Target language.
    #[arg(short, long, default_value = "csharp")]
    language: TargetLanguage,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for every table.
    Generate {
        /// Read tables from a JSON schema file instead of the database.
        #[arg(long)]
        from_json: Option<PathBuf>,

        /// Output file (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Database schema to introspect.
        #[arg(short, long, default_value = DEFAULT_SCHEMA)]
        schema: String,
    },

    /// Print the SQL templates for each table.
    Sql {
        /// Read tables from a JSON schema file instead of the database.
        #[arg(long)]
        from_json: Option<PathBuf>,

        /// Database schema to introspect.
        #[arg(short, long, default_value = DEFAULT_SCHEMA)]
        schema: String,

        /// Only this table (all if not specified).
        #[arg(short, long)]
        table: Option<String>,
    },

    /// List tables with their primary keys.
    Tables {
        /// Read tables from a JSON schema file instead of the database.
        #[arg(long)]
        from_json: Option<PathBuf>,

        /// Database schema to introspect.
        #[arg(short, long, default_value = DEFAULT_SCHEMA)]
        schema: String,
    },

    /// Show the result columns of a query without running it.
    DescribeQuery {
        /// The query to describe.
        sql: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Fail on an unsupported dialect/language pair before touching the database
    let pipeline = Pipeline::resolve(cli.dialect, cli.language)?;

    match cli.command {
        Commands::Generate {
            from_json,
            output,
            schema,
        } => {
            let provider = MetadataSource::new(from_json, &cli.database, &schema)
                .load()
                .await?;

            let mut observer = TracingObserver::new();
            let generated = pipeline.generate(&provider, &mut observer)?;
            write_output(output.as_deref(), &generated.code)?;

            info!(
                "Generated {} of {} tables ({} skipped)",
                generated.tables_emitted,
                observer.tables(),
                observer.skipped()
            );
        }

        Commands::Sql {
            from_json,
            schema,
            table,
        } => {
            let provider = MetadataSource::new(from_json, &cli.database, &schema)
                .load()
                .await?;
            pipeline.check_engines(provider.tables())?;

            let selected: Vec<&TableMetadata> = match &table {
                Some(name) => {
                    let found = provider
                        .tables()
                        .iter()
                        .find(|t| t.name() == name.as_str())
                        .ok_or_else(|| CodegenError::TableNotFound(name.clone()))?;
                    vec![found]
                }
                None => provider.tables().iter().collect(),
            };

            for table in selected {
                if !table.has_primary_key() {
                    warn!("{}", Diagnostic::missing_primary_key(table.name()));
                    continue;
                }
                println!("-- {}", table.name());
                for (operation, sql) in pipeline.render_sql(table) {
                    println!("-- {operation}");
                    println!("{sql};");
                }
                println!();
            }
        }

        Commands::Tables { from_json, schema } => {
            let provider = MetadataSource::new(from_json, &cli.database, &schema)
                .load()
                .await?;

            if provider.tables().is_empty() {
                info!("No tables found.");
            } else {
                println!("\nTables:");
                println!("{:-<60}", "");

                for table in provider.tables() {
                    if table.has_primary_key() {
                        println!(
                            " [X] {} ({} columns, key: {})",
                            table.name(),
                            table.columns().len(),
                            table.primary_key().join(", ")
                        );
                    } else {
                        println!(
                            " [ ] {} ({} columns, no primary key: skipped)",
                            table.name(),
                            table.columns().len()
                        );
                    }
                }
                println!();
            }
        }

        Commands::DescribeQuery { sql } => {
            let introspector = PostgresIntrospector::connect(&cli.database, DEFAULT_SCHEMA).await?;
            let columns = introspector.describe_query(&sql).await?;

            for column in &columns {
                println!(
                    "{:<30} {:<20} {}",
                    column.name(),
                    column.data_type(),
                    pipeline.types().map_type(column.data_type())
                );
            }
        }
    }

    Ok(())
}
