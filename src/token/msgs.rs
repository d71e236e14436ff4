//! Request and response shapes of the token module.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgMintTokens {
    pub creator: String,
    pub amount: u64,
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MsgMintTokensResponse {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgTransferTokens {
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MsgTransferTokensResponse {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QueryTokenInfoRequest {
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryTokenInfoResponse {}
