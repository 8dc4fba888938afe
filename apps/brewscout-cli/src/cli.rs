//! Command-line arguments.

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "brewscout")]
#[command(about = "BrewScout command-line client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        email: String,
        #[arg(long, env = "BREWSCOUT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and store the session
    Register {
        name: String,
        email: String,
        #[arg(long, env = "BREWSCOUT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Print the locally stored profile without calling the gateway
        #[arg(long)]
        offline: bool,
    },

    /// List coffee shops
    Shops {
        #[arg(short, long)]
        search: Option<String>,
        /// Required equipment; repeat for several
        #[arg(short, long = "equipment")]
        equipments: Vec<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show one coffee shop
    Shop { id: Uuid },

    /// List reviews for a coffee shop
    Reviews {
        shop_id: Uuid,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },

    /// Check in at a coffee shop
    CheckIn {
        shop_id: Uuid,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// GET an arbitrary gateway path and print the raw payload
    Get {
        path: String,
        /// Cache the response for this many seconds
        #[arg(long)]
        cache_secs: Option<u64>,
    },
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
    fn test_shops_collects_repeated_equipment() {
        let cli = Cli::parse_from([
            "brewscout", "shops", "-e", "v60", "-e", "espresso", "--page", "2",
        ]);

        match cli.command {
            Command::Shops {
                equipments, page, ..
            } => {
                assert_eq!(equipments, vec!["v60", "espresso"]);
                assert_eq!(page, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_in_is_kebab_case() {
        let id = Uuid::new_v4();
        let raw = id.to_string();
        let cli = Cli::parse_from(["brewscout", "check-in", raw.as_str()]);

        assert!(matches!(cli.command, Command::CheckIn { shop_id, note: None } if shop_id == id));
    }
}
