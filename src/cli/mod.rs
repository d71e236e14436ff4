pub mod genesis;
pub mod query;
pub mod tx;

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

use crate::account::{Bech32Codec, MINTER};
use crate::bank::{Bank, BankError};
use crate::config::ChainstConfig;
use crate::token::{Keeper, MODULE_NAME, MODULE_PERMISSIONS};

pub type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "chainst")]
#[command(about = "Token issuance, transfers and genesis checks", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "chainst.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Genesis file checks and bank initialisation
    Genesis {
        #[command(subcommand)]
        cmd: genesis::GenesisCommands,
    },
    /// Submit token messages against the local bank
    Tx {
        #[command(subcommand)]
        cmd: tx::TxCommands,
    },
    /// Read-only queries
    Query {
        #[command(subcommand)]
        cmd: query::QueryCommands,
    },
}

pub fn run(cli: Cli, config: &ChainstConfig) -> CliResult {
    match cli.command {
        Commands::Genesis { cmd } => genesis::handle_genesis_command(cmd, config),
        Commands::Tx { cmd } => tx::handle_tx_command(cmd, config),
        Commands::Query { cmd } => query::handle_query_command(cmd, config),
    }
}

/// Bank snapshot at the configured state file, or an empty bank if none has
/// been written yet. The token module account is registered either way.
pub fn open_bank(config: &ChainstConfig) -> Result<Bank, BankError> {
    let path = Path::new(&config.chain.state_file);
    let mut bank = if path.exists() {
        debug!("bank: loading snapshot {}", path.display());
        Bank::load(path)?
    } else {
        info!("bank: no snapshot at {}, starting empty", path.display());
        Bank::new()
    };
    ensure_token_module(&mut bank);
    Ok(bank)
}

pub fn open_keeper(config: &ChainstConfig) -> Result<Keeper<Bank, Bech32Codec>, BankError> {
    Ok(Keeper::new(open_bank(config)?, config.address_codec()))
}

pub(crate) fn ensure_token_module(bank: &mut Bank) {
    let registered = bank
        .module_account(MODULE_NAME)
        .is_some_and(|m| m.has_permission(MINTER));
    if !registered {
        bank.register_module_account(
            MODULE_NAME,
            MODULE_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tx_commands() {
        let cli = Cli::try_parse_from([
            "chainst",
            "tx",
            "mint-tokens",
            "100",
            "stake",
            "--from",
            "cosmos1abc",
        ])
        .unwrap();
        assert_eq!(cli.config, "chainst.toml");
        match cli.command {
            Commands::Tx {
                cmd: tx::TxCommands::MintTokens { amount, denom, from },
            } => {
                assert_eq!(amount, 100);
                assert_eq!(denom, "stake");
                assert_eq!(from, "cosmos1abc");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "chainst",
            "--config",
            "other.toml",
            "tx",
            "transfer-tokens",
            "cosmos1to",
            "5",
            "stake",
            "--from",
            "cosmos1from",
        ])
        .unwrap();
        assert_eq!(cli.config, "other.toml");
        assert!(matches!(
            cli.command,
            Commands::Tx {
                cmd: tx::TxCommands::TransferTokens { amount: 5, .. }
            }
        ));
    }

    #[test]
    fn test_negative_amount_is_a_parse_error() {
        assert!(Cli::try_parse_from([
            "chainst",
            "tx",
            "mint-tokens",
            "-1",
            "stake",
            "--from",
            "cosmos1abc",
        ])
        .is_err());
    }

    #[test]
    fn test_open_bank_registers_token_module() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ChainstConfig::default();
        config.chain.state_file = dir.path().join("bank.json").display().to_string();

        let bank = open_bank(&config).unwrap();
        let module = bank.module_account(MODULE_NAME).unwrap();
        assert!(module.has_permission(MINTER));
    }
}
