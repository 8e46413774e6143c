/*!
# Weight Representation

Edge weights are `f64`. A `NaN` weight means *there is no edge*; every other value, `0.0` and
infinities included, is a present edge carrying that weight.

Weights are compared exactly when deciding whether two edges are the same.
*/

/// Weight of an edge; `NaN` encodes a missing edge
pub type Weight = f64;

/// Weight reported for absent edges
pub const NO_WEIGHT: Weight = Weight::NAN;

/// Weight assigned to edges whose weight is not given explicitly
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Returns *true* if `weight` denotes a present edge
#[inline]
pub fn is_weight(weight: Weight) -> bool {
    !weight.is_nan()
}

/// Returns the lesser of two weights where a missing weight loses against any present one.
/// Returns [`NO_WEIGHT`] only if both are missing.
#[inline]
pub fn lighter(a: Weight, b: Weight) -> Weight {
    // `f64::min` already ignores a single NaN operand
    a.min(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence() {
        assert!(is_weight(0.0));
        assert!(is_weight(-3.5));
        assert!(is_weight(Weight::INFINITY));
        assert!(!is_weight(NO_WEIGHT));
    }

    #[test]
    fn lighter_prefers_present() {
        assert_eq!(lighter(1.0, 2.0), 1.0);
        assert_eq!(lighter(NO_WEIGHT, 2.0), 2.0);
        assert_eq!(lighter(3.0, NO_WEIGHT), 3.0);
        assert!(!is_weight(lighter(NO_WEIGHT, NO_WEIGHT)));
    }
}
