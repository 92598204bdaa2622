//! Portfolio page: the signed-in user's holdings.

#[cfg(test)]
#[path = "portfolio_test.rs"]
mod portfolio_test;

use leptos::prelude::*;

use crate::app::AppMarketClient;
use crate::components::source_badge::SourceBadge;
use crate::net::types::{Holding, Portfolio};
use crate::state::auth::SessionState;
use crate::util::format::{change_class, format_currency};

/// Unrealized gain across all holdings.
pub(crate) fn total_gain(portfolio: &Portfolio) -> f64 {
    portfolio.holdings.iter().map(Holding::gain).sum()
}

#[component]
pub fn PortfolioPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let market = expect_context::<AppMarketClient>();

    // Refetches when the uid changes; `None` until the gate resolves.
    let portfolio = LocalResource::new(move || {
        let uid = session.with(|s| s.principal.as_ref().map(|p| p.uid.clone()));
        let market = market.clone();
        async move {
            match uid {
                Some(uid) => Some(market.portfolio(&uid).await),
                None => None,
            }
        }
    });

    view! {
        <div class="portfolio-page">
            <header class="portfolio-page__header">
                <a href="/dashboard">"← Dashboard"</a>
                <h1>"Portfolio"</h1>
            </header>
            <Suspense fallback=move || view! { <p>"Loading portfolio..."</p> }>
                {move || {
                    portfolio
                        .get()
                        .flatten()
                        .map(|sourced| {
                            let gain = total_gain(&sourced.data);
                            view! {
                                <SourceBadge source=sourced.source/>
                                <div class="portfolio-page__summary">
                                    <span>"Total value " {format_currency(sourced.data.total_value)}</span>
                                    <span class=change_class(gain)>"Gain " {format_currency(gain)}</span>
                                </div>
                                {render_holdings(sourced.data.holdings)}
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

fn render_holdings(holdings: Vec<Holding>) -> impl IntoView {
    if holdings.is_empty() {
        return view! { <p class="portfolio-page__empty">"No holdings yet."</p> }.into_any();
    }
    let rows = holdings
        .into_iter()
        .map(|h| {
            let href = format!("/stocks/{}", h.symbol);
            let value = format_currency(h.market_value());
            let gain = h.gain();
            view! {
                <tr>
                    <td><a href=href>{h.symbol}</a></td>
                    <td class="num">{h.shares}</td>
                    <td class="num">{format_currency(h.average_cost)}</td>
                    <td class="num">{format_currency(h.current_price)}</td>
                    <td class="num">{value}</td>
                    <td class=format!("num {}", change_class(gain))>{format_currency(gain)}</td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="quote-table">
            <thead>
                <tr>
                    <th>"Symbol"</th>
                    <th>"Shares"</th>
                    <th>"Avg Cost"</th>
                    <th>"Price"</th>
                    <th>"Value"</th>
                    <th>"Gain"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}
