// Integration tests for Policy Optimizer

use policy_optimizer::core::{Advisor, Scorer, ScoringError};
use policy_optimizer::models::{FinancialGoal, HealthStatus, Policy, PolicyType, UserProfile};
use policy_optimizer::services::{CatalogFormat, PolicyCatalog};

fn create_policy(id: &str, policy_type: PolicyType, premium: f64, coverage: f64, target_age: u32) -> Policy {
    let mut policy = Policy::new(id, policy_type, premium, coverage);
    policy.target_age = Some(target_age);
    policy
}

fn create_catalog() -> Vec<Policy> {
    vec![
        create_policy("TL-1", PolicyType::TermLife, 7_200.0, 5_000_000.0, 28),
        create_policy("TL-2", PolicyType::TermLife, 14_500.0, 10_000_000.0, 38),
        create_policy("HL-1", PolicyType::Health, 18_500.0, 1_500_000.0, 32),
        create_policy("HL-2", PolicyType::Health, 9_800.0, 1_000_000.0, 26),
        create_policy("HL-3", PolicyType::Health, 42_000.0, 2_000_000.0, 62),
        create_policy("CP-1", PolicyType::Comprehensive, 34_000.0, 3_000_000.0, 35),
        create_policy("CP-2", PolicyType::Comprehensive, 48_000.0, 5_000_000.0, 42),
        create_policy("AC-1", PolicyType::AccidentCover, 2_400.0, 1_000_000.0, 30),
        create_policy("AC-2", PolicyType::AccidentCover, 5_200.0, 2_500_000.0, 40),
    ]
}

fn create_profiles() -> Vec<UserProfile> {
    let mut profiles = Vec::new();
    for age in [1, 19, 30, 45, 67] {
        for health in [HealthStatus::Good, HealthStatus::Average, HealthStatus::Poor] {
            for income in [0.0, 300_000.0, 1_200_000.0, 9_000_000.0] {
                profiles.push(UserProfile::new(age, income, health));
            }
        }
    }
    profiles
}

#[test]
fn test_ranking_covers_catalog_in_value_order() {
    let scorer = Scorer::with_default_weights();
    let catalog = create_catalog();

    for profile in create_profiles() {
        let ranked = scorer.score(&profile, &catalog).unwrap();

        assert_eq!(ranked.len(), catalog.len());

        for pair in ranked.windows(2) {
            assert!(
                pair[0].value_score >= pair[1].value_score,
                "Recommendations not sorted by value score"
            );
        }

        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=catalog.len()).collect::<Vec<_>>());

        let mut ids: Vec<&str> = ranked.iter().map(|r| r.policy.id.as_str()).collect();
        ids.sort_unstable();
        let mut expected: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let scorer = Scorer::with_default_weights();
    let catalog = create_catalog();
    let profile = UserProfile::new(41, 1_100_000.0, HealthStatus::Average)
        .with_goals([FinancialGoal::CriticalIllness]);

    let first = scorer.score(&profile, &catalog).unwrap();
    let second = scorer.score(&profile, &catalog).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reference_example_ranks_p1_first() {
    let scorer = Scorer::with_default_weights();
    let profile = UserProfile::new(30, 50_000.0, HealthStatus::Good);
    let catalog = vec![
        Policy::new("P1", PolicyType::Other, 100.0, 10_000.0),
        Policy::new("P2", PolicyType::Other, 50.0, 4_000.0),
    ];

    let ranked = scorer.score(&profile, &catalog).unwrap();

    assert_eq!(ranked[0].policy.id, "P1");
    assert_eq!(ranked[1].policy.id, "P2");
    assert!(ranked[0].value_score > ranked[1].value_score);
}

#[test]
fn test_zero_age_returns_no_recommendations() {
    let scorer = Scorer::with_default_weights();
    let advisor = Advisor::default();
    let profile = UserProfile::new(0, 50_000.0, HealthStatus::Good);

    assert!(matches!(scorer.score(&profile, &create_catalog()), Err(ScoringError::InvalidInput(_))));
    assert!(matches!(
        advisor.recommend(&profile, &create_catalog(), None),
        Err(ScoringError::InvalidInput(_))
    ));
}

#[test]
fn test_empty_catalog_is_an_error() {
    let scorer = Scorer::with_default_weights();
    let profile = UserProfile::new(30, 50_000.0, HealthStatus::Good);

    assert_eq!(scorer.score(&profile, &[]), Err(ScoringError::EmptyCatalog));
}

#[test]
fn test_end_to_end_recommendation() {
    let advisor = Advisor::default();
    let profile = UserProfile::new(34, 1_200_000.0, HealthStatus::Good)
        .with_goals(FinancialGoal::from_text("I want to protect my family"));

    let report = advisor.recommend(&profile, &create_catalog(), Some(3)).unwrap();

    assert!(report.shortlist.len() <= 3);
    assert_eq!(report.catalog_size, 9);
    // Family protection needs at least 15 lakh of cover
    assert!(report.shortlist.iter().all(|r| r.policy.coverage >= 1_500_000.0));
    assert!(report.shortlist.iter().all(|r| r.policy.target_age.unwrap().abs_diff(34) <= 10));
    assert_eq!(report.best.policy.id, report.shortlist[0].policy.id);
    assert!(report.rationale.contains(&report.best.policy.display_name()));
}

#[test]
fn test_shortlist_preserves_scorer_order() {
    let advisor = Advisor::default();
    let profile = UserProfile::new(30, 1_200_000.0, HealthStatus::Good);
    let catalog = create_catalog();

    let ranked = advisor.scorer().score(&profile, &catalog).unwrap();
    let report = advisor.recommend(&profile, &catalog, Some(20)).unwrap();

    let ranked_ids: Vec<&str> = ranked
        .iter()
        .map(|r| r.policy.id.as_str())
        .filter(|id| report.shortlist.iter().any(|s| s.policy.id == *id))
        .collect();
    let shortlist_ids: Vec<&str> = report.shortlist.iter().map(|r| r.policy.id.as_str()).collect();

    assert_eq!(ranked_ids, shortlist_ids);
}

#[tokio::test]
async fn test_load_catalog_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    serde_json::to_writer(&mut file, &create_catalog()).unwrap();

    let catalog = PolicyCatalog::load(file.path()).await.unwrap();

    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.get("CP-2").unwrap().coverage, 5_000_000.0);
}

#[tokio::test]
async fn test_load_catalog_missing_file() {
    assert!(PolicyCatalog::load("does/not/exist.json").await.is_err());
}

#[test]
fn test_shipped_catalog_is_valid() {
    let content = include_str!("../data/catalog.json");
    let catalog = PolicyCatalog::parse(content, CatalogFormat::Json).unwrap();

    assert!(!catalog.is_empty());
}
