use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_principal() -> Principal {
    Principal {
        uid: "u1".to_owned(),
        email: Some("ada@example.com".to_owned()),
        display_name: Some("Ada".to_owned()),
        financial_profile: None,
    }
}

// =============================================================
// Principal
// =============================================================

#[test]
fn principal_serializes_camel_case_without_profile() {
    let json = serde_json::to_value(make_principal()).unwrap();
    assert_eq!(json["uid"], "u1");
    assert_eq!(json["displayName"], "Ada");
    assert!(json.get("financialProfile").is_none());
}

#[test]
fn principal_label_prefers_display_name_then_email_then_uid() {
    let mut principal = make_principal();
    assert_eq!(principal.label(), "Ada");

    principal.display_name = Some("  ".to_owned());
    assert_eq!(principal.label(), "ada@example.com");

    principal.email = None;
    assert_eq!(principal.label(), "u1");
}

// =============================================================
// FinancialProfile
// =============================================================

#[test]
fn partial_profile_parses_with_defaults() {
    let profile: FinancialProfile = serde_json::from_str(r#"{"riskTolerance":"high"}"#).unwrap();
    assert_eq!(profile.risk_tolerance, Some(RiskTolerance::High));
    assert!(profile.investment_goals.is_empty());
    assert!(profile.monthly_expenses.is_empty());
    assert_eq!(profile.monthly_income, None);
}

#[test]
fn full_profile_keeps_goal_order_and_expenses() {
    let raw = r#"{
        "incomeRange": "50k-75k",
        "investmentGoals": ["retirement", "house"],
        "riskTolerance": "medium",
        "monthlyIncome": 5200.0,
        "monthlyExpenses": {"rent": 1800.0, "food": 450.5},
        "goals": ["emergency fund", "pay off card"],
        "phone": "+1-555-0100"
    }"#;
    let profile: FinancialProfile = serde_json::from_str(raw).unwrap();
    assert_eq!(profile.investment_goals, vec!["retirement", "house"]);
    assert_eq!(profile.goals, vec!["emergency fund", "pay off card"]);
    assert!((profile.total_monthly_expenses() - 2250.5).abs() < f64::EPSILON);
}

#[test]
fn unknown_risk_tolerance_is_rejected() {
    let result = serde_json::from_str::<FinancialProfile>(r#"{"riskTolerance":"extreme"}"#);
    assert!(result.is_err());
}

// =============================================================
// Market DTOs
// =============================================================

#[test]
fn market_quote_accepts_integral_float_volume() {
    let raw = r#"{"symbol":"SPY","name":"S&P","price":1.0,"change":0.0,"changePercent":0.0,"volume":1200.0}"#;
    let quote: MarketQuote = serde_json::from_str(raw).unwrap();
    assert_eq!(quote.volume, 1200);
}

#[test]
fn market_quote_rejects_fractional_volume() {
    let raw = r#"{"symbol":"SPY","name":"S&P","price":1.0,"change":0.0,"changePercent":0.0,"volume":1.5}"#;
    assert!(serde_json::from_str::<MarketQuote>(raw).is_err());
}

#[test]
fn holding_value_and_gain() {
    let holding = Holding { symbol: "VTI".to_owned(), shares: 10.0, average_cost: 200.0, current_price: 220.0 };
    assert!((holding.market_value() - 2200.0).abs() < f64::EPSILON);
    assert!((holding.gain() - 200.0).abs() < f64::EPSILON);
}

#[test]
fn portfolio_missing_holdings_defaults_empty() {
    let portfolio: Portfolio = serde_json::from_str(r#"{"userId":"u1","totalValue":0.0}"#).unwrap();
    assert!(portfolio.holdings.is_empty());
}
