//! Read-only view of the financial profile merged into the principal.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::net::types::FinancialProfile;
use crate::state::auth::SessionState;
use crate::util::format::format_currency;

/// Label/value pairs for the populated profile fields, in display order.
pub(crate) fn profile_rows(profile: &FinancialProfile) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if let Some(range) = profile.income_range.as_deref().filter(|r| !r.is_empty()) {
        rows.push(("Income range", range.to_owned()));
    }
    if let Some(income) = profile.monthly_income {
        rows.push(("Monthly income", format_currency(income)));
    }
    if !profile.monthly_expenses.is_empty() {
        rows.push(("Monthly expenses", format_currency(profile.total_monthly_expenses())));
    }
    if let Some(risk) = profile.risk_tolerance {
        rows.push(("Risk tolerance", risk.as_str().to_owned()));
    }
    if !profile.investment_goals.is_empty() {
        rows.push(("Investment goals", profile.investment_goals.join(", ")));
    }
    if !profile.goals.is_empty() {
        rows.push(("Goals", profile.goals.join(", ")));
    }
    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
        rows.push(("Phone", phone.to_owned()));
    }
    rows
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let body = move || {
        session.with(|state| {
            let Some(principal) = state.principal.as_ref() else {
                return view! { <p>"Not signed in."</p> }.into_any();
            };
            let email = principal.email.clone().unwrap_or_default();
            let name = principal.label().to_owned();
            let rows = principal.financial_profile.as_ref().map(profile_rows).unwrap_or_default();
            let details = if rows.is_empty() {
                view! { <p class="profile-page__empty">"No financial profile on this device."</p> }.into_any()
            } else {
                view! {
                    <dl class="profile-page__fields">
                        {rows
                            .into_iter()
                            .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                            .collect_view()}
                    </dl>
                }
                .into_any()
            };
            view! {
                <h2>{name}</h2>
                <p class="profile-page__email">{email}</p>
                {details}
            }
            .into_any()
        })
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header">
                <a href="/dashboard">"← Dashboard"</a>
                <h1>"Profile"</h1>
            </header>
            {body}
        </div>
    }
}
