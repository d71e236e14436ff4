use clap::Subcommand;
use tracing::warn;

use super::{open_keeper, CliResult};
use crate::config::ChainstConfig;
use crate::events::{Event, EventManager};
use crate::token::{MsgMintTokens, MsgTransferTokens};

#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// Mint new tokens to the sender
    MintTokens {
        amount: u64,
        denom: String,
        #[arg(long)]
        from: String,
    },
    /// Send tokens to another account
    TransferTokens {
        to: String,
        amount: u64,
        denom: String,
        #[arg(long)]
        from: String,
    },
}

pub fn handle_tx_command(cmd: TxCommands, config: &ChainstConfig) -> CliResult {
    let events = execute(cmd, config)?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

/// Run one message against the bank snapshot and persist the result.
fn execute(cmd: TxCommands, config: &ChainstConfig) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    let mut keeper = open_keeper(config)?;
    let mut events = EventManager::new();

    let result = match cmd {
        TxCommands::MintTokens { amount, denom, from } => keeper
            .mint_tokens(&mut events, &MsgMintTokens {
                creator: from,
                amount,
                denom,
            })
            .map(|_| ()),
        TxCommands::TransferTokens {
            to,
            amount,
            denom,
            from,
        } => keeper
            .transfer_tokens(&mut events, &MsgTransferTokens {
                from,
                to,
                amount,
                denom,
            })
            .map(|_| ()),
    };

    match result {
        Ok(()) => {
            keeper.bank().save(&config.chain.state_file)?;
            Ok(events.into_events())
        }
        Err(e) => {
            if e.requires_reconciliation() {
                // minted supply sits in the module account
                warn!("saving bank with unforwarded supply in module account");
                keeper.bank().save(&config.chain.state_file)?;
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Bank;
    use crate::test_utils::{dummy_address, raw_address};

    fn temp_config(dir: &tempfile::TempDir) -> ChainstConfig {
        let mut config = ChainstConfig::default();
        config.chain.state_file = dir.path().join("data").join("bank.json").display().to_string();
        config
    }

    #[test]
    fn test_mint_then_transfer_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let events = execute(
            TxCommands::MintTokens {
                amount: 50,
                denom: "stake".to_string(),
                from: dummy_address(1),
            },
            &config,
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "mint_tokens");

        let events = execute(
            TxCommands::TransferTokens {
                to: dummy_address(2),
                amount: 20,
                denom: "stake".to_string(),
                from: dummy_address(1),
            },
            &config,
        )
        .unwrap();
        assert_eq!(events[0].kind, "transfer_tokens");

        let bank = Bank::load(&config.chain.state_file).unwrap();
        assert_eq!(bank.balance(&raw_address(1), "stake"), 30);
        assert_eq!(bank.balance(&raw_address(2), "stake"), 20);
        assert_eq!(bank.supply_of("stake"), 50);
    }

    #[test]
    fn test_rejected_tx_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let result = execute(
            TxCommands::MintTokens {
                amount: 0,
                denom: "stake".to_string(),
                from: dummy_address(1),
            },
            &config,
        );
        assert!(result.is_err());
        assert!(!std::path::Path::new(&config.chain.state_file).exists());
    }
}
