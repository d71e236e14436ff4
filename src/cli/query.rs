use clap::Subcommand;

use super::{open_keeper, CliResult};
use crate::account::AddressCodec;
use crate::config::ChainstConfig;
use crate::token::QueryTokenInfoRequest;

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Metadata of a denomination
    TokenInfo { denom: String },
    /// Balance of an account
    Balance {
        address: String,
        /// Only this denomination
        #[arg(long)]
        denom: Option<String>,
    },
}

pub fn handle_query_command(cmd: QueryCommands, config: &ChainstConfig) -> CliResult {
    let keeper = open_keeper(config)?;
    match cmd {
        QueryCommands::TokenInfo { denom } => {
            let res = keeper.token_info(Some(&QueryTokenInfoRequest { denom }))?;
            println!("{}", serde_json::to_string_pretty(&res)?);
        }
        QueryCommands::Balance { address, denom } => {
            let account = config.address_codec().string_to_bytes(&address)?;
            match denom {
                Some(denom) => println!("{}{}", keeper.bank().balance(&account, &denom), denom),
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&keeper.bank().all_balances(&account))?
                ),
            }
        }
    }
    Ok(())
}
