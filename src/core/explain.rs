use crate::models::{Recommendation, RiskLevel, UserProfile};

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Format an amount in rupees using crore / lakh abbreviations
pub fn format_currency(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1}Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.1}L", amount / LAKH)
    } else {
        format!("₹{}", group_thousands(amount.round() as u64))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Plain-text explanation of why the best policy was picked
pub fn build_rationale(
    profile: &UserProfile,
    best: &Recommendation,
    risk_level: RiskLevel,
) -> String {
    let policy = &best.policy;
    let mut lines = Vec::with_capacity(5);

    lines.push(format!(
        "{} is the strongest fit out of the policies you qualify for.",
        policy.display_name()
    ));

    match policy.target_age {
        Some(target) => lines.push(format!(
            "- Age: {} years is close to the {} year profile this {} policy is priced for",
            profile.age, target, policy.policy_type
        )),
        None => lines.push(format!(
            "- Age: {} years falls within the range this {} policy accepts",
            profile.age, policy.policy_type
        )),
    }

    lines.push(format!(
        "- Coverage: {} of protection",
        format_currency(policy.coverage)
    ));

    if profile.annual_income > 0.0 {
        lines.push(format!(
            "- Premium: {} a year, {:.1}% of your annual income",
            format_currency(policy.premium),
            policy.premium / profile.annual_income * 100.0
        ));
    } else {
        lines.push(format!("- Premium: {} a year", format_currency(policy.premium)));
    }

    lines.push(format!(
        "- Risk score: {:.2} ({} risk, {} health)",
        best.risk_score, risk_level, profile.health
    ));

    lines.join("\n")
}
