use crate::db_init::DbAction;
use clap::Parser;

/// Device and SIM inventory service for the shop warehouse
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Database preparation to run before serving (clear-db, init-db)
    #[arg(value_enum)]
    pub actions: Vec<DbAction>,

    /// Seed for the random population generated by init-db
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_no_action() {
        let cli = Cli::try_parse_from(["shop-tracking-api"]).unwrap();
        assert!(cli.actions.is_empty());
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_positional_actions_in_any_order() {
        let cli = Cli::try_parse_from(["shop-tracking-api", "init-db", "clear-db"]).unwrap();
        assert_eq!(cli.actions, vec![DbAction::InitDb, DbAction::ClearDb]);
    }

    #[test]
    fn test_seed_flag() {
        let cli = Cli::try_parse_from(["shop-tracking-api", "init-db", "--seed", "42"]).unwrap();
        assert_eq!(cli.actions, vec![DbAction::InitDb]);
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["shop-tracking-api", "drop-db"]).is_err());
    }
}
