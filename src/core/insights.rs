use std::collections::BTreeMap;

use crate::core::error::ScoringError;
use crate::models::{AgePremiumPoint, CatalogInsights, Policy, PolicyType, RegionSummary, TypeSummary};

#[derive(Default)]
struct Accumulator {
    count: usize,
    premium_sum: f64,
    premium_min: f64,
    premium_max: f64,
    coverage_sum: f64,
    coverage_min: f64,
    coverage_max: f64,
}

impl Accumulator {
    fn add(&mut self, policy: &Policy) {
        if self.count == 0 {
            self.premium_min = policy.premium;
            self.premium_max = policy.premium;
            self.coverage_min = policy.coverage;
            self.coverage_max = policy.coverage;
        } else {
            self.premium_min = self.premium_min.min(policy.premium);
            self.premium_max = self.premium_max.max(policy.premium);
            self.coverage_min = self.coverage_min.min(policy.coverage);
            self.coverage_max = self.coverage_max.max(policy.coverage);
        }
        self.count += 1;
        self.premium_sum += policy.premium;
        self.coverage_sum += policy.coverage;
    }

    fn avg_premium(&self) -> f64 {
        self.premium_sum / self.count as f64
    }

    fn avg_coverage(&self) -> f64 {
        self.coverage_sum / self.count as f64
    }
}

/// Aggregate the catalog for market overview charts
///
/// Groups are ordered by policy type, region name and target age.
pub fn catalog_insights(catalog: &[Policy]) -> Result<CatalogInsights, ScoringError> {
    if catalog.is_empty() {
        return Err(ScoringError::EmptyCatalog);
    }

    let mut by_type: BTreeMap<PolicyType, Accumulator> = BTreeMap::new();
    let mut by_region: BTreeMap<&str, Accumulator> = BTreeMap::new();
    let mut by_age: BTreeMap<u32, Accumulator> = BTreeMap::new();

    for policy in catalog {
        by_type.entry(policy.policy_type.clone()).or_default().add(policy);

        if let Some(region) = policy.region.as_deref() {
            by_region.entry(region).or_default().add(policy);
        }
        if let Some(age) = policy.target_age {
            by_age.entry(age).or_default().add(policy);
        }
    }

    let by_type = by_type
        .into_iter()
        .map(|(policy_type, acc)| TypeSummary {
            policy_type,
            count: acc.count,
            avg_premium: acc.avg_premium(),
            min_premium: acc.premium_min,
            max_premium: acc.premium_max,
            avg_coverage: acc.avg_coverage(),
            min_coverage: acc.coverage_min,
            max_coverage: acc.coverage_max,
        })
        .collect();

    let by_region = by_region
        .into_iter()
        .map(|(region, acc)| RegionSummary {
            region: region.to_string(),
            count: acc.count,
            avg_premium: acc.avg_premium(),
            avg_coverage: acc.avg_coverage(),
        })
        .collect();

    let premium_by_age = by_age
        .into_iter()
        .map(|(age, acc)| AgePremiumPoint {
            age,
            avg_premium: acc.avg_premium(),
        })
        .collect();

    Ok(CatalogInsights {
        total_policies: catalog.len(),
        by_type,
        by_region,
        premium_by_age,
    })
}
