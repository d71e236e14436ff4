pub mod account;
pub mod bank;
pub mod cli;
pub mod coin;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod events;
pub mod genesis;
pub mod token;

#[cfg(test)]
mod test_utils;
