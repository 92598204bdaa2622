use std::collections::BTreeMap;

use super::*;
use crate::net::types::RiskTolerance;

#[test]
fn empty_profile_has_no_rows() {
    assert!(profile_rows(&FinancialProfile::default()).is_empty());
}

#[test]
fn rows_follow_display_order_and_skip_blanks() {
    let profile = FinancialProfile {
        income_range: Some("50k-100k".to_owned()),
        investment_goals: vec!["retirement".to_owned(), "house".to_owned()],
        risk_tolerance: Some(RiskTolerance::High),
        monthly_income: Some(5000.0),
        monthly_expenses: BTreeMap::from([("rent".to_owned(), 1500.0), ("food".to_owned(), 400.5)]),
        goals: Vec::new(),
        phone: Some(String::new()),
    };
    let rows = profile_rows(&profile);
    assert_eq!(
        rows,
        vec![
            ("Income range", "50k-100k".to_owned()),
            ("Monthly income", "$5,000.00".to_owned()),
            ("Monthly expenses", "$1,900.50".to_owned()),
            ("Risk tolerance", "high".to_owned()),
            ("Investment goals", "retirement, house".to_owned()),
        ]
    );
}
