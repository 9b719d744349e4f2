//! Shared coordinate rounding.
//!
//! Every coordinate the layout engine produces goes through [`round_to`] so
//! that stored layouts compare equal across calls and serialize compactly.

/// Rounds `value` to `decimals` decimal places.
///
/// Halfway cases round away from zero (the semantics of [`f64::round`]). A
/// result of negative zero is normalized to positive zero.
///
/// `decimals` is expected to be small (layout configs cap it at 15); very
/// large values overflow the scaling factor.
pub fn round_to(value: f64, decimals: u32) -> f64 {
	let factor = 10f64.powi(decimals as i32);
	let rounded = (value * factor).round() / factor;
	if rounded == 0.0 {
		return 0.0;
	}
	return rounded;
}

#[cfg(test)]
mod tests {
	use super::round_to;

	#[test]
	fn rounds_to_three_places() {
		assert_eq!(round_to(0.123_456, 3), 0.123);
		assert_eq!(round_to(-0.7999, 3), -0.8);
		assert_eq!(round_to(0.8, 3), 0.8);
	}

	#[test]
	fn halfway_rounds_away_from_zero() {
		assert_eq!(round_to(2.5, 0), 3.0);
		assert_eq!(round_to(-2.5, 0), -3.0);
	}

	#[test]
	fn negative_zero_is_normalized() {
		let rounded = round_to(-1.2e-16, 3);
		assert_eq!(rounded, 0.0);
		assert!(rounded.is_sign_positive());
	}
}
