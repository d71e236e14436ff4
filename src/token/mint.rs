use tracing::{debug, error, info};

use super::{requested_coins, Keeper, MsgMintTokens, MsgMintTokensResponse, MODULE_NAME};
use crate::account::AddressCodec;
use crate::bank::BankKeeper;
use crate::error::{AddressRole, LedgerStep, TokenError};
use crate::events::{EventSink, MintTokensEvent};

impl<B, C> Keeper<B, C>
where
    B: BankKeeper,
    C: AddressCodec,
{
    /// Mint `msg.amount` of `msg.denom` into the module account and forward
    /// it to the creator.
    ///
    /// If forwarding fails after a successful mint, the new supply stays in
    /// the module account and the returned error reports
    /// [`TokenError::requires_reconciliation`].
    pub fn mint_tokens<E: EventSink>(
        &mut self,
        events: &mut E,
        msg: &MsgMintTokens,
    ) -> Result<MsgMintTokensResponse, TokenError> {
        debug!("mint_tokens: {} {} for {}", msg.amount, msg.denom, msg.creator);

        let creator = self.decode_address(AddressRole::Creator, &msg.creator)?;
        let coins = requested_coins(msg.amount, &msg.denom)?;

        self.bank
            .mint_coins(MODULE_NAME, &coins)
            .map_err(|source| TokenError::LedgerFailure {
                step: LedgerStep::Mint,
                source,
            })?;

        if let Err(source) = self
            .bank
            .send_coins_from_module_to_account(MODULE_NAME, &creator, &coins)
        {
            error!(
                "mint_tokens: {} minted into module '{}' but not forwarded to {}: {}; module balance needs reconciliation",
                coins, MODULE_NAME, msg.creator, source
            );
            return Err(TokenError::LedgerFailure {
                step: LedgerStep::ForwardToCreator,
                source,
            });
        }

        events.emit(
            MintTokensEvent {
                creator: msg.creator.clone(),
                amount: msg.amount,
                denom: msg.denom.clone(),
            }
            .into(),
        );
        info!("mint_tokens: minted {} to {}", coins, msg.creator);

        Ok(MsgMintTokensResponse {})
    }
}
