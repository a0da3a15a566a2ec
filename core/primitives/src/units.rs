//! Decimal-scaled display of wei amounts.
//!
//! Amounts are split by exact integer division, so the fractional digits are
//! exact at gwei and ether scale and no rounding step is needed.

use primitive_types::U256;

/// Fractional digits of a gwei amount.
pub const GWEI_DECIMALS: u32 = 9;
/// Fractional digits of an ether amount.
pub const ETHER_DECIMALS: u32 = 18;

/// Render `value / 10^decimals` with exactly `decimals` fractional digits.
pub fn format_units(value: &U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = U256::exp10(decimals as usize);
    let whole = *value / scale;
    let fraction = *value % scale;
    format!(
        "{}.{:0>width$}",
        whole,
        fraction.to_string(),
        width = decimals as usize
    )
}
