use super::{Keeper, QueryTokenInfoRequest, QueryTokenInfoResponse};
use crate::account::AddressCodec;
use crate::bank::BankKeeper;
use crate::error::TokenError;

impl<B, C> Keeper<B, C>
where
    B: BankKeeper,
    C: AddressCodec,
{
    /// Token metadata lookup. No metadata is tracked yet, so any request
    /// yields an empty response.
    // TODO: resolve denom metadata once the bank keeps per-denom metadata
    pub fn token_info(
        &self,
        req: Option<&QueryTokenInfoRequest>,
    ) -> Result<QueryTokenInfoResponse, TokenError> {
        if req.is_none() {
            return Err(TokenError::InvalidArgument("invalid request".to_string()));
        }
        Ok(QueryTokenInfoResponse {})
    }
}
