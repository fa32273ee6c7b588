//! oxide-ydb CLI
//!
//! Shows how the YQL dialect types and prepares a statement described by a
//! JSON fixture, without a database.

mod dry_run;
mod fixture;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_ydb_dbapi::{Connection, ConnectionConfig};
use oxide_ydb_dialect::{DialectOptions, YqlDialect};

use crate::dry_run::{DryRunClient, Recorded};
use crate::fixture::Fixture;

/// Inspect YDB bind typing for compiled statements.
#[derive(Parser)]
#[command(name = "oxide-ydb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database root path.
    #[arg(short, long, env = "OXIDE_YDB_DATABASE", default_value = "/local")]
    database: String,

    /// Directory prepended to relative table names.
    #[arg(long, env = "OXIDE_YDB_TABLE_PATH_PREFIX", default_value = "")]
    table_path_prefix: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved type of every bind.
    Resolve {
        /// Fixture file.
        fixture: PathBuf,
    },

    /// Print the queries that would be sent.
    Prepare {
        /// Fixture file.
        fixture: PathBuf,

        /// Prepend DECLARE statements for typed parameters.
        #[arg(long)]
        declare: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Resolve { fixture } => {
            let fixture = Fixture::load(&fixture)?;
            let rows = fixture.rows()?;
            let statement = fixture.statement(&rows)?;
            let types = statement.bind_types(&rows, &fixture.schema())?;

            for (name, ty) in &types {
                println!("{name}: {ty}");
            }
            for placeholder in statement.placeholders.iter().filter(|p| !p.literal_execute) {
                let untyped = placeholder.slots().iter().all(|slot| !types.contains_key(*slot));
                if untyped {
                    info!("{} left untyped", placeholder.name);
                }
            }
        }

        Commands::Prepare { fixture, declare } => {
            let fixture = Fixture::load(&fixture)?;
            let rows = fixture.rows()?;
            let statement = fixture.statement(&rows)?;

            let dialect = YqlDialect::new(DialectOptions::new().with_declare(declare));
            let config = dialect.create_connect_args(ConnectionConfig {
                database: cli.database,
                table_path_prefix: cli.table_path_prefix,
                ..ConnectionConfig::default()
            });
            let client = Arc::new(DryRunClient::new(config.database.clone(), fixture.schema()));
            let connection = Connection::new(Arc::clone(&client), config);
            let mut cursor = connection.cursor();

            if rows.len() > 1 {
                dialect
                    .do_executemany(&connection, &mut cursor, &statement, &rows)
                    .await?;
            } else {
                dialect
                    .do_execute(&connection, &mut cursor, &statement, rows.first())
                    .await?;
            }

            for recorded in client.take() {
                match recorded {
                    Recorded::Scheme(text) => println!("-- scheme\n{text}\n"),
                    Recorded::Data(query, parameters) => {
                        println!("-- data query {}\n{}", query.name, query.yql_text);
                        for (name, value) in &parameters {
                            println!("--   {name} = {value}");
                        }
                        println!();
                    }
                }
            }
        }
    }

    Ok(())
}
