//! Tiered material conversion.
//!
//! Members of one crafting group convert upward at a fixed ratio:
//! [`CONVERSION_RATIO`] units of tier `k` make one unit of tier `k + 1`,
//! so one unit of tier `t` costs `3^(t - k)` units of tier `k`. Conversion
//! never runs downward. Stocks are flat per-tier slices indexed in the
//! group's member order, lowest tier first.

/// Units of a tier consumed to produce one unit of the next tier up.
pub const CONVERSION_RATIO: u64 = 3;

/// Raw units of the lower tier consumed per unit crafted `distance` tiers up.
fn conversion_factor(distance: usize) -> u64 {
    let exp = u32::try_from(distance).unwrap_or(u32::MAX);
    CONVERSION_RATIO.saturating_pow(exp)
}

/// Satisfy `needed` units at `tier`, consuming same-tier stock first and
/// then synthesizing from lower tiers, nearest first. Mutates `stocks` in
/// place and returns the unmet remainder.
///
/// Each lower tier is converted in one aggregate step at its own factor;
/// partial stacks below the factor are left untouched. A `tier` beyond the
/// slice satisfies nothing.
///
/// Example:
/// let mut stocks = [9, 0];
/// assert_eq!(allocate(&mut stocks, 1, 3), 0);
/// assert_eq!(stocks, [0, 0]);
pub fn allocate(stocks: &mut [u64], tier: usize, needed: u64) -> u64 {
    if needed == 0 || tier >= stocks.len() {
        return needed;
    }

    let direct = needed.min(stocks[tier]);
    stocks[tier] -= direct;
    let mut remaining = needed - direct;

    let mut k = tier;
    while remaining > 0 && k > 0 {
        k -= 1;
        let factor = conversion_factor(tier - k);
        let possible = stocks[k] / factor;
        let produce = remaining.min(possible);
        if produce > 0 {
            // produce <= stocks[k] / factor, so this cannot underflow
            stocks[k] -= produce * factor;
            remaining -= produce;
        }
    }
    remaining
}

/// Maximum quantity satisfiable at `tier` given the current stocks:
/// the same-tier count plus each lower tier's integer yield at its factor.
///
/// This is exactly what [`allocate`] with unbounded need would satisfy.
pub fn coverage(stocks: &[u64], tier: usize) -> u64 {
    if tier >= stocks.len() {
        return 0;
    }
    let mut total = stocks[tier];
    for k in 0..tier {
        total = total.saturating_add(stocks[k] / conversion_factor(tier - k));
    }
    total
}
