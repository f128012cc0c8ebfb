use crate::core::scoring::coverage_ratio;
use crate::models::{Policy, PolicyComparison};

/// Compare two policies side by side
///
/// Differences are `right - left`. The better-value policy is the one with
/// more coverage per unit of premium; equal ratios name neither.
pub fn compare_policies(left: &Policy, right: &Policy) -> PolicyComparison {
    let left_value_ratio = coverage_ratio(left);
    let right_value_ratio = coverage_ratio(right);

    let better_value = if left_value_ratio > right_value_ratio {
        Some(left.id.clone())
    } else if right_value_ratio > left_value_ratio {
        Some(right.id.clone())
    } else {
        None
    };

    PolicyComparison {
        left: left.clone(),
        right: right.clone(),
        premium_difference: right.premium - left.premium,
        coverage_difference: right.coverage - left.coverage,
        left_value_ratio,
        right_value_ratio,
        better_value,
    }
}
