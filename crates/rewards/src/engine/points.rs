/// Upper bound of the one-point-per-dollar band.
const SINGLE_BAND_CEILING: f64 = 100.0;
/// Amounts at or below this earn nothing.
const SINGLE_BAND_FLOOR: f64 = 50.0;
const DOUBLE_RATE: f64 = 2.0;

/// Reward points earned by a single purchase amount.
///
/// Each whole dollar between $50 and $100 earns one point, each whole
/// dollar above $100 earns two. The floor is applied per band, after the
/// doubling, so $120.50 earns 50 + floor(20.50 * 2) = 91 points and
/// $100.01 earns exactly 50.
///
/// Total over all inputs: negative, NaN, and infinite amounts earn zero
/// points instead of failing, so a malformed record degrades to nothing
/// rather than aborting a whole batch.
pub fn points_for(amount: f64) -> u32 {
    if !amount.is_finite() || amount < 0.0 {
        return 0;
    }

    let single = (amount.min(SINGLE_BAND_CEILING) - SINGLE_BAND_FLOOR)
        .max(0.0)
        .floor();
    let double = ((amount - SINGLE_BAND_CEILING).max(0.0) * DOUBLE_RATE).floor();

    (single + double) as u32
}
