use clap::Subcommand;
use std::path::Path;
use tracing::{info, warn};

use super::{ensure_token_module, CliResult};
use crate::bank::Bank;
use crate::config::ChainstConfig;
use crate::genesis::GenesisState;

#[derive(Subcommand, Debug)]
pub enum GenesisCommands {
    /// Check every account and balance of a genesis file
    Validate {
        /// Genesis file (defaults to the configured one)
        #[arg(long)]
        file: Option<String>,
        /// Report every account instead of stopping at the first error
        #[arg(long, default_value = "false")]
        all: bool,
    },
    /// Validate a genesis file and write the initial bank snapshot
    Init {
        #[arg(long)]
        file: Option<String>,
        /// Replace an existing snapshot
        #[arg(long, default_value = "false")]
        force: bool,
    },
}

pub fn handle_genesis_command(cmd: GenesisCommands, config: &ChainstConfig) -> CliResult {
    let codec = config.address_codec();
    match cmd {
        GenesisCommands::Validate { file, all } => {
            let path = file.unwrap_or_else(|| config.chain.genesis_file.clone());
            let genesis = GenesisState::load(&path)?;

            if all {
                let mut failed = 0;
                for (account, result) in genesis.account_results(&codec) {
                    match result {
                        Ok(()) => println!("ok      {}", account.address()),
                        Err(e) => {
                            failed += 1;
                            println!("invalid {}: {}", account.address(), e);
                        }
                    }
                }
                if failed > 0 {
                    return Err(format!("{} invalid genesis account(s)", failed).into());
                }
            }

            genesis.validate(&codec)?;
            println!("{} is valid ({} accounts)", path, genesis.accounts.len());
        }
        GenesisCommands::Init { file, force } => {
            let path = file.unwrap_or_else(|| config.chain.genesis_file.clone());
            let state_file = &config.chain.state_file;
            if Path::new(state_file).exists() && !force {
                return Err(format!("{} already exists; pass --force to replace it", state_file).into());
            }

            let genesis = GenesisState::load(&path)?;
            if genesis.chain_id != config.chain.chain_id {
                warn!(
                    "genesis chain_id '{}' differs from configured '{}'",
                    genesis.chain_id, config.chain.chain_id
                );
            }

            let mut bank = Bank::new();
            ensure_token_module(&mut bank);
            genesis.init_bank(&codec, &mut bank)?;
            bank.save(state_file)?;
            info!("bank initialised at {}", state_file);
            println!("{}", serde_json::to_string_pretty(bank.supply())?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dummy_address, raw_address};

    fn write_genesis(dir: &Path, accounts: &str) -> String {
        let path = dir.join("genesis.json");
        let doc = format!(
            r#"{{
                "genesis_time": "2024-01-01T00:00:00Z",
                "chain_id": "chainst-1",
                "accounts": [{}],
                "balances": [
                    {{"address": "{}", "coins": [{{"denom": "stake", "amount": "7"}}]}}
                ]
            }}"#,
            accounts,
            dummy_address(1)
        );
        std::fs::write(&path, doc).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_init_writes_snapshot_once() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_genesis(dir.path(), &format!(r#"{{"address": "{}"}}"#, dummy_address(1)));
        let mut config = ChainstConfig::default();
        config.chain.state_file = dir.path().join("bank.json").display().to_string();

        handle_genesis_command(
            GenesisCommands::Init {
                file: Some(file.clone()),
                force: false,
            },
            &config,
        )
        .unwrap();
        let bank = Bank::load(&config.chain.state_file).unwrap();
        assert_eq!(bank.balance(&raw_address(1), "stake"), 7);

        let again = handle_genesis_command(
            GenesisCommands::Init {
                file: Some(file),
                force: false,
            },
            &config,
        );
        assert!(again.is_err());
    }

    #[test]
    fn test_validate_reports_bad_account() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_genesis(dir.path(), r#"{"address": "not-an-address"}"#);
        let config = ChainstConfig::default();

        for all in [false, true] {
            let result = handle_genesis_command(
                GenesisCommands::Validate {
                    file: Some(file.clone()),
                    all,
                },
                &config,
            );
            assert!(result.is_err());
        }
    }
}
