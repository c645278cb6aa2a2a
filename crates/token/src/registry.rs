//! Token registry: singleton token metadata.
//!
//! Scalars are stored as UTF-8 text under four flat keys; `totalSupply`
//! is the only one that changes after initialization (via minting).

use alpha_common::{AlphaError, Result, StateKey, TokenMetadata};
use alpha_ledger::Invocation;
use tracing::info;

/// Write the fixed initial metadata. Caller authorization is the
/// contract layer's job; this only stages the four scalars.
pub fn set_token(inv: &mut Invocation<'_>) -> Result<()> {
    let meta = TokenMetadata::initial();
    inv.put(&StateKey::Name, meta.name.clone().into_bytes());
    inv.put(&StateKey::Symbol, meta.symbol.clone().into_bytes());
    inv.put(&StateKey::Decimals, meta.decimals.to_string().into_bytes());
    inv.put(
        &StateKey::TotalSupply,
        meta.total_supply.to_string().into_bytes(),
    );

    info!(name = %meta.name, symbol = %meta.symbol, "token metadata staged");
    Ok(())
}

pub fn name(inv: &mut Invocation<'_>) -> Result<String> {
    read_scalar(inv, &StateKey::Name)
}

pub fn symbol(inv: &mut Invocation<'_>) -> Result<String> {
    read_scalar(inv, &StateKey::Symbol)
}

pub fn decimals(inv: &mut Invocation<'_>) -> Result<u32> {
    let text = read_scalar(inv, &StateKey::Decimals)?;
    text.parse()
        .map_err(|_| AlphaError::Decode(format!("invalid decimals value: {}", text)))
}

pub fn total_supply(inv: &mut Invocation<'_>) -> Result<u64> {
    let text = read_scalar(inv, &StateKey::TotalSupply)?;
    text.parse()
        .map_err(|_| AlphaError::Decode(format!("invalid totalSupply value: {}", text)))
}

/// Stage a new total supply. Only the mint engine calls this.
pub(crate) fn put_total_supply(inv: &mut Invocation<'_>, supply: u64) {
    inv.put(&StateKey::TotalSupply, supply.to_string().into_bytes());
}

fn read_scalar(inv: &mut Invocation<'_>, key: &StateKey) -> Result<String> {
    let bytes = inv
        .get(key)?
        .ok_or_else(|| AlphaError::NotFound("token metadata is not initialized".to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| AlphaError::Decode(format!("stored value for {} is not UTF-8", key)))
}
