// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project automation for the bike inventory workspace
//!
//! Wraps the cargo and tool invocations CI runs so they can be reproduced
//! locally with `cargo xtask <command>`.
//!
//! ### Migration checks
//!
//! `cargo xtask verify-migrations` applies the embedded persistence
//! migrations to a scratch in-memory `SQLite` database, replays the raw
//! `up.sql` on top to prove it is safe to run against an existing
//! database, and compares the resulting schema against the tables,
//! constraints, and indexes the application relies on.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use bike_inventory_persistence::MIGRATIONS;
use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{bail, eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::connection::SimpleConnection;
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::MigrationHarness;
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Raw DDL of the inventory migration, replayed to check idempotency.
const INVENTORY_UP_SQL: &str = include_str!(
    "../../crates/persistence/migrations/2026-01-01-000000_create_inventory_tables/up.sql"
);

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run everything CI gates on: lint, test, and migration checks
    CI,

    /// Run clippy, rustfmt, and rustdoc with warnings denied
    #[command(visible_alias = "l")]
    Lint,

    /// Run unit, router, and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Verify the inventory migrations produce the expected schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Lint => lint(),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn lint() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    run_cargo_nightly(vec!["fmt", "--all", "--check"])?;
    lint_docs()
}

/// Builds each library's docs with warnings denied, as docs.rs would.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd("cargo", ["doc", "--no-deps", "--package", &package.name])
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Doc tests run last because they are the slowest.
fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace", "--all-targets"])?;
    run_cargo(vec!["test", "--workspace", "--doc"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we run inside a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the persistence migrations.
///
/// Steps:
/// 1. Apply the embedded migrations to a fresh in-memory database
/// 2. Run the migration harness again and require it to be a no-op
/// 3. Replay the raw `up.sql` and require the schema to be unchanged
/// 4. Compare the schema against what the application expects
fn verify_migrations() -> Result<()> {
    tracing::info!("Verifying inventory migrations");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to open in-memory SQLite database")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let reapplied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-run migrations: {e}"))?;
    if !reapplied.is_empty() {
        bail!(
            "Migration harness re-applied {} migration(s) on a migrated database",
            reapplied.len()
        );
    }

    let migrated = introspect_sqlite_schema(&mut conn)?;

    conn.batch_execute(INVENTORY_UP_SQL)
        .wrap_err("Replaying up.sql on a migrated database failed")?;
    let replayed = introspect_sqlite_schema(&mut conn)?;
    if migrated != replayed {
        bail!("Replaying up.sql changed the schema");
    }

    let problems = compare_schemas(&expected_schema(), &migrated);
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("  - {problem}");
        }
        bail!("Schema verification failed with {} problem(s)", problems.len());
    }

    tracing::info!("Migrations verified: {} table(s) match", migrated.tables.len());
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Builds a table description from `(name, type, nullable)` triples.
///
/// The `id` column is always the primary key.
fn table(columns: &[(&str, &str, bool)]) -> Table {
    let mut table = Table::default();
    for &(name, ty, nullable) in columns {
        table.columns.insert(
            name.to_string(),
            Column {
                name: name.to_string(),
                normalized_type: ty.to_string(),
                nullable,
            },
        );
    }
    table.primary_keys.insert("id".to_string());
    table
}

/// The schema the persistence layer is written against.
fn expected_schema() -> Schema {
    let mut users = table(&[
        ("id", "integer", false),
        ("username", "text", false),
        ("password_hash", "text", false),
    ]);
    users.unique_constraints.insert(UniqueConstraint {
        columns: vec!["username".to_string()],
    });

    let bikes = table(&[
        ("id", "integer", false),
        ("brand", "text", false),
        ("model", "text", false),
        ("category", "text", false),
        ("quantity", "integer", false),
        ("price", "real", false),
    ]);

    let mut sessions = table(&[
        ("id", "integer", false),
        ("token", "text", false),
        ("username", "text", true),
        ("flash_level", "text", true),
        ("flash_message", "text", true),
        ("created_at", "text", false),
        ("expires_at", "text", false),
    ]);
    sessions.unique_constraints.insert(UniqueConstraint {
        columns: vec!["token".to_string()],
    });
    sessions.foreign_keys.insert(ForeignKey {
        from_column: "username".to_string(),
        to_table: "users".to_string(),
        to_column: "username".to_string(),
    });
    sessions.indexes.insert(Index {
        name: "idx_sessions_expires_at".to_string(),
        columns: vec!["expires_at".to_string()],
    });

    Schema {
        tables: BTreeMap::from([
            ("bikes".to_string(), bikes),
            ("sessions".to_string(), sessions),
            ("users".to_string(), users),
        ]),
    }
}

/// Introspect `SQLite` schema
#[allow(clippy::too_many_lines)]
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Integer)]
        #[allow(dead_code)]
        cid: i32,
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            // INTEGER PRIMARY KEY is implicitly NOT NULL
            let nullable = col.notnull == 0 && col.pk == 0;
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    name: col.name.clone(),
                    normalized_type: col.r#type.to_lowercase(),
                    nullable,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // origin 'u' covers column-level UNIQUE (sqlite_autoindex_*)
            if idx.origin == "u" {
                table_info.unique_constraints.insert(UniqueConstraint {
                    columns: column_names,
                });
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                });
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Lists every difference between the expected and actual schema.
fn compare_schemas(expected: &Schema, actual: &Schema) -> Vec<String> {
    let mut problems = Vec::new();

    for name in actual.tables.keys() {
        if !expected.tables.contains_key(name) {
            problems.push(format!("Unexpected table '{name}'"));
        }
    }

    for (name, want) in &expected.tables {
        let Some(got) = actual.tables.get(name) else {
            problems.push(format!("Missing table '{name}'"));
            continue;
        };

        for (column, want_col) in &want.columns {
            match got.columns.get(column) {
                None => problems.push(format!("Table '{name}': missing column '{column}'")),
                Some(got_col) if got_col != want_col => problems.push(format!(
                    "Table '{name}': column '{column}' is {got_col:?}, expected {want_col:?}"
                )),
                Some(_) => {}
            }
        }
        for column in got.columns.keys() {
            if !want.columns.contains_key(column) {
                problems.push(format!("Table '{name}': unexpected column '{column}'"));
            }
        }

        if got.primary_keys != want.primary_keys {
            problems.push(format!(
                "Table '{name}': primary key {:?}, expected {:?}",
                got.primary_keys, want.primary_keys
            ));
        }
        if got.foreign_keys != want.foreign_keys {
            problems.push(format!(
                "Table '{name}': foreign keys {:?}, expected {:?}",
                got.foreign_keys, want.foreign_keys
            ));
        }
        if got.unique_constraints != want.unique_constraints {
            problems.push(format!(
                "Table '{name}': unique constraints {:?}, expected {:?}",
                got.unique_constraints, want.unique_constraints
            ));
        }
        if got.indexes != want.indexes {
            problems.push(format!(
                "Table '{name}': indexes {:?}, expected {:?}",
                got.indexes, want.indexes
            ));
        }
    }

    problems
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
