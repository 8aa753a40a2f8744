use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::db::SqliteSource;
use crate::error::{ContactsError, ContactsResult};
use crate::ops::provider::ContactsProvider;
use crate::seed;

/// Query a contacts store and print bridge-ready JSON records
#[derive(Debug, Parser)]
#[command(name = "contacts")]
#[command(version)]
#[command(about = "Aggregate contact data rows into bridge records", long_about = None)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "CONTACTS_DB", default_value = ".data/contacts.db")]
    pub file: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the device owner's own profile
    Me,
    /// Print the profile followed by every other contact
    All,
    /// Print contacts whose display name contains TEXT
    Search {
        text: String,
    },
    /// Seed the database from a JSON file
    Import {
        json_path: PathBuf,
    },
}

/// Execute one CLI command, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> ContactsResult<()> {
    let value = match &cli.command {
        Commands::Me => open_provider(&cli.file)?.fetch_self_values()?,
        Commands::All => open_provider(&cli.file)?.fetch_all_values()?,
        Commands::Search { text } => open_provider(&cli.file)?.search_values(text)?,
        Commands::Import { json_path } => return import(&cli.file, json_path, out),
    };
    print_json(&value, cli.pretty, out)
}

fn open_provider(db_path: &Path) -> ContactsResult<ContactsProvider<SqliteSource>> {
    ensure_parent_dir(db_path)?;
    Ok(ContactsProvider::new(SqliteSource::open(db_path)?))
}

fn import(db_path: &Path, json_path: &Path, out: &mut dyn Write) -> ContactsResult<()> {
    if db_path.exists() {
        return Err(ContactsError::Other(format!(
            "Database file {} already exists. Remove it first or use --file to specify a different path.",
            db_path.display()
        )));
    }
    ensure_parent_dir(db_path)?;

    let stats = seed::import_json(json_path, db_path)?;
    writeln!(out, "Import complete!")?;
    writeln!(out, "  Contacts: {}", stats.contacts)?;
    writeln!(out, "  Profile rows: {}", stats.profile_rows)?;
    writeln!(out, "  Data rows: {}", stats.data_rows)?;
    Ok(())
}

fn print_json(value: &Value, pretty: bool, out: &mut dyn Write) -> ContactsResult<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", text)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> ContactsResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_file() {
        let cli = Cli::parse_from(["contacts", "--file", "x.db", "search", "ann"]);
        assert_eq!(cli.file, PathBuf::from("x.db"));
        assert!(matches!(cli.command, Commands::Search { ref text } if text == "ann"));
    }

    #[test]
    fn parses_pretty_all() {
        let cli = Cli::parse_from(["contacts", "--pretty", "all"]);
        assert!(cli.pretty);
        assert!(matches!(cli.command, Commands::All));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
