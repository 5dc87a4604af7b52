//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the u32 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let max = f64::from(u32::MAX);
    let clamped = value.clamp(0.0, max).floor();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Price the shop pays back for an item: `floor(base * markdown)`.
#[must_use]
pub fn buy_back_price(base_price: u32, markdown: f64) -> u32 {
    floor_f64_to_u32(f64::from(base_price) * markdown)
}

/// Apply a signed change to a gold balance, flooring at zero.
#[must_use]
pub fn apply_gold_delta(gold: u32, delta: i64) -> u32 {
    let next = i64::from(gold).saturating_add(delta);
    cast::<i64, u32>(next.clamp(0, i64::from(u32::MAX))).unwrap_or(0)
}
