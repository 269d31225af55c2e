//! Tick to sqrt price conversion for concentrated liquidity pools.
//!
//! A pool price is tracked as sqrt(token1/token0) in Q64.96 fixed point, and
//! ticks index prices in steps of 1.0001. The conversion here is the exact
//! integer algorithm the pools themselves use: a ladder of precomputed
//! Q128.128 ratios, one per bit of the tick, multiplied together and cut down
//! to Q64.96 at the end. Bit-exact agreement with the on-chain result is the
//! point; a float rendition drifts in the last digits at the range edges.

use alloy_primitives::U256;

use crate::error::TickError;

/// Lowest tick for which a sqrt price is defined.
pub const MIN_TICK: i32 = -887272;
/// Highest tick for which a sqrt price is defined.
pub const MAX_TICK: i32 = 887272;

/// Sqrt price at [`MIN_TICK`].
pub const MIN_SQRT_PRICE_X96: U256 = U256::from_limbs([0x1000276a3, 0, 0, 0]);
/// Sqrt price at [`MAX_TICK`].
pub const MAX_SQRT_PRICE_X96: U256 =
    U256::from_limbs([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);

/// Q128.128 ratios for sqrt(1/1.0001) raised to successive powers of two.
/// Entry `i` is applied when bit `i` of the tick magnitude is set.
const STEP_RATIOS_X128: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Sqrt price for a tick, as a Q64.96 fixed point number.
///
/// Exact for every tick in `[MIN_TICK, MAX_TICK]`; anything outside is
/// rejected rather than clamped.
pub fn sqrt_price_x96_at_tick(tick: i32) -> Result<U256, TickError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TickError::OutOfRange(tick));
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 1 != 0 {
        U256::from(STEP_RATIOS_X128[0])
    } else {
        U256::ONE << 128
    };
    for (i, step) in STEP_RATIOS_X128.iter().enumerate().skip(1) {
        if abs_tick & (1 << i) != 0 {
            ratio = (ratio * U256::from(*step)) >> 128;
        }
    }

    // The ladder walks downward from tick zero; positive ticks take the
    // reciprocal of the negative-tick ratio.
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 down to Q64.96, rounding up so the reciprocal pair of a tick
    // stays on the correct side of the price.
    let shifted = ratio >> 32;
    if (ratio & U256::from(u32::MAX)).is_zero() {
        Ok(shifted)
    } else {
        Ok(shifted + U256::ONE)
    }
}

/// Largest multiple of `spacing` that is a valid tick. `spacing` must be
/// positive.
pub fn max_usable_tick(spacing: i32) -> i32 {
    (MAX_TICK / spacing) * spacing
}

/// Smallest multiple of `spacing` that is a valid tick. `spacing` must be
/// positive.
pub fn min_usable_tick(spacing: i32) -> i32 {
    (MIN_TICK / spacing) * spacing
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MIN_TICK, "4295128739")]
    #[case(-887200, "4310618292")]
    #[case(-1, "79224201403219477170569942574")]
    #[case(0, "79228162514264337593543950336")]
    #[case(1, "79232123823359799118286999568")]
    #[case(100, "79625275426524748796330556128")]
    #[case(887200, "1456195216270955103206513029158776779468408838535")]
    #[case(MAX_TICK, "1461446703485210103287273052203988822378723970342")]
    fn matches_reference_ratios(#[case] tick: i32, #[case] expected: &str) {
        let expected: U256 = expected.parse().unwrap();
        assert_eq!(sqrt_price_x96_at_tick(tick).unwrap(), expected);
    }

    #[test]
    fn tick_zero_is_exactly_one_in_q64_96() {
        assert_eq!(sqrt_price_x96_at_tick(0).unwrap(), U256::ONE << 96);
    }

    #[test]
    fn bound_constants_match_the_ladder() {
        assert_eq!(sqrt_price_x96_at_tick(MIN_TICK).unwrap(), MIN_SQRT_PRICE_X96);
        assert_eq!(sqrt_price_x96_at_tick(MAX_TICK).unwrap(), MAX_SQRT_PRICE_X96);
    }

    #[rstest]
    #[case(MIN_TICK - 1)]
    #[case(MAX_TICK + 1)]
    #[case(i32::MIN)]
    #[case(i32::MAX)]
    fn out_of_range_ticks_are_rejected(#[case] tick: i32) {
        assert_eq!(
            sqrt_price_x96_at_tick(tick).unwrap_err(),
            TickError::OutOfRange(tick)
        );
    }

    #[test]
    fn price_is_strictly_increasing_in_tick() {
        let samples = [
            MIN_TICK, -887200, -500000, -100000, -1000, -1, 0, 1, 1000, 100000, 500000, 887200,
            MAX_TICK,
        ];
        for pair in samples.windows(2) {
            let lower = sqrt_price_x96_at_tick(pair[0]).unwrap();
            let upper = sqrt_price_x96_at_tick(pair[1]).unwrap();
            assert!(lower < upper, "ticks {} vs {}", pair[0], pair[1]);
        }
    }

    #[rstest]
    #[case(1, MIN_TICK, MAX_TICK)]
    #[case(60, -887220, 887220)]
    #[case(200, -887200, 887200)]
    fn usable_ticks_truncate_toward_zero(#[case] spacing: i32, #[case] min: i32, #[case] max: i32) {
        assert_eq!(min_usable_tick(spacing), min);
        assert_eq!(max_usable_tick(spacing), max);
        assert!(sqrt_price_x96_at_tick(min_usable_tick(spacing)).is_ok());
        assert!(sqrt_price_x96_at_tick(max_usable_tick(spacing)).is_ok());
    }
}
