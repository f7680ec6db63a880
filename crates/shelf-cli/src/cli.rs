use clap::{Parser, Subcommand};

use shelf_core::VERSION;

/// Shelf - library circulation for librarians and members
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding books.csv, members.csv and loans.csv
    #[arg(long, global = true, env = "SHELF_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "SHELF_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that copy counts agree with outstanding loans
    Check,

    /// Print an Argon2 digest for the config's [librarian] password_hash
    HashPassword,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_data_dir_and_check() {
        let cli = Cli::try_parse_from(["shelf", "--data-dir", "/tmp/lib", "check"]).unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/lib"));
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["shelf"]).unwrap();
        assert!(cli.command.is_none());
    }
}
