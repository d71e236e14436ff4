use tracing::{debug, info};

use super::{requested_coins, Keeper, MsgTransferTokens, MsgTransferTokensResponse};
use crate::account::AddressCodec;
use crate::bank::BankKeeper;
use crate::error::{AddressRole, LedgerStep, TokenError};
use crate::events::{EventSink, TransferTokensEvent};

impl<B, C> Keeper<B, C>
where
    B: BankKeeper,
    C: AddressCodec,
{
    /// Move `msg.amount` of `msg.denom` from `msg.from` to `msg.to` in one
    /// ledger call. No module account is involved.
    pub fn transfer_tokens<E: EventSink>(
        &mut self,
        events: &mut E,
        msg: &MsgTransferTokens,
    ) -> Result<MsgTransferTokensResponse, TokenError> {
        debug!(
            "transfer_tokens: {} {} from {} to {}",
            msg.amount, msg.denom, msg.from, msg.to
        );

        let from = self.decode_address(AddressRole::Sender, &msg.from)?;
        let to = self.decode_address(AddressRole::Receiver, &msg.to)?;
        let coins = requested_coins(msg.amount, &msg.denom)?;

        self.bank
            .send_coins(&from, &to, &coins)
            .map_err(|source| TokenError::LedgerFailure {
                step: LedgerStep::Send,
                source,
            })?;

        events.emit(
            TransferTokensEvent {
                from: msg.from.clone(),
                to: msg.to.clone(),
                amount: msg.amount,
                denom: msg.denom.clone(),
            }
            .into(),
        );
        info!("transfer_tokens: {} from {} to {}", coins, msg.from, msg.to);

        Ok(MsgTransferTokensResponse {})
    }
}
