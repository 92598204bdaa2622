//! Shared DTOs for the identity boundary, the local profile cache, and the
//! market-data REST API.
//!
//! DESIGN
//! ======
//! Wire and cache payloads are camelCase JSON. Every `FinancialProfile` field
//! defaults so partially-filled cached profiles still parse.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated identity for the current session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Identity-provider user identifier.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Profile merged in from the local cache, never from the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_profile: Option<FinancialProfile>,
}

impl Principal {
    /// Name to greet the user with: display name, then email, then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Self-reported financial situation collected during onboarding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialProfile {
    pub income_range: Option<String>,
    pub investment_goals: Vec<String>,
    pub risk_tolerance: Option<RiskTolerance>,
    pub monthly_income: Option<f64>,
    /// Category name to monthly amount.
    pub monthly_expenses: BTreeMap<String, f64>,
    pub goals: Vec<String>,
    pub phone: Option<String>,
}

impl FinancialProfile {
    /// Sum of all monthly expense categories.
    pub fn total_monthly_expenses(&self) -> f64 {
        self.monthly_expenses.values().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One row of the `/market/data` overview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub volume: u64,
}

/// Single-instrument detail from `/stocks/{symbol}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub volume: u64,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// A user's holdings from `/users/{userId}/portfolio`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub user_id: String,
    pub total_value: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub average_cost: f64,
    pub current_price: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.shares * self.current_price
    }

    /// Unrealized gain or loss against the average cost basis.
    pub fn gain(&self) -> f64 {
        self.shares * (self.current_price - self.average_cost)
    }
}

/// Headline from `/news`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    /// ISO 8601 publication timestamp.
    pub published_at: String,
}

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= u64::MAX as f64
            {
                return Ok(float as u64);
            }
            Err(D::Error::custom("expected non-negative integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
