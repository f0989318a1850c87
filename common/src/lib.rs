pub use float_cmp;

use num_traits::{Float, cast::NumCast};

// DEFAULT_F64_MARGIN is the (epsilon, ulps) margin used when asserting float equality in tests
// and when checking derived tile geometry against its orientation.
pub const DEFAULT_F64_MARGIN: (f64, i64) = (0.000_000_001, 4);

// approx_eq asserts that two values are equal within DEFAULT_F64_MARGIN
#[macro_export]
macro_rules! approx_eq {
    ($typ:ty, $lhs:expr, $rhs:expr) => {{
        let (lhs, rhs) = ($lhs, $rhs);
        assert!(
            <$typ as $crate::float_cmp::ApproxEq>::approx_eq(lhs, rhs, $crate::DEFAULT_F64_MARGIN),
            "expected {:?} ~= {:?}",
            lhs,
            rhs,
        );
    }};
}

// fmt_float truncates digits from a float
pub fn fmt_float<F: Float>(f: F, decimal_precision: u32) -> String {
    let pow = 10_i64.pow(decimal_precision);
    let i = match (f * NumCast::from(pow).unwrap_or_else(F::one)).round().to_i64() {
        Some(i) => i,
        None => return String::from("NaN"),
    };
    format!(
        "{}{}.{}",
        if i < 0 { "-" } else { "" },
        (i / pow).abs(),
        if decimal_precision == 0 {
            String::from("")
        } else {
            format!("{:0width$}", (i % pow).abs(), width = decimal_precision as usize)
        }
    )
}
