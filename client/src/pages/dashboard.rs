//! Dashboard page: greeting, market overview, headlines, sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only reachable with a principal; the route guard sends everyone else to
//! `/login`. Signing out clears the identity session, which the gate turns
//! into a signed-out state and the guard into a redirect.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::app::{AppMarketClient, BrowserIdentity, IdentityHandle};
use crate::components::quote_table::QuoteTable;
use crate::components::source_badge::SourceBadge;
use crate::net::types::NewsItem;
use crate::state::auth::SessionState;

pub(crate) fn greeting(state: &SessionState) -> String {
    match &state.principal {
        Some(principal) => format!("Welcome back, {}", principal.label()),
        None => "Welcome".to_owned(),
    }
}

/// `2024-05-01T13:45:00Z` → `2024-05-01`; anything unparseable is shown as-is.
pub(crate) fn published_date(published_at: &str) -> &str {
    match published_at.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => published_at,
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let identity = use_context::<IdentityHandle>();
    let market = expect_context::<AppMarketClient>();

    let quotes = LocalResource::new({
        let market = market.clone();
        move || {
            let market = market.clone();
            async move { market.market_data().await }
        }
    });
    let news = LocalResource::new(move || {
        let market = market.clone();
        async move { market.news().await }
    });

    let on_sign_out = move |_| {
        if let Some(identity) = identity {
            identity.with_value(BrowserIdentity::sign_out);
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || session.with(greeting)}</h1>
                <nav class="dashboard-page__nav">
                    <a href="/portfolio">"Portfolio"</a>
                    <a href="/profile">"Profile"</a>
                    <button class="btn" on:click=on_sign_out>"Sign Out"</button>
                </nav>
            </header>

            <section class="dashboard-page__panel">
                <h2>"Markets"</h2>
                <Suspense fallback=move || view! { <p>"Loading market data..."</p> }>
                    {move || {
                        quotes
                            .get()
                            .map(|sourced| {
                                view! {
                                    <SourceBadge source=sourced.source/>
                                    <QuoteTable quotes=sourced.data/>
                                }
                            })
                    }}
                </Suspense>
            </section>

            <section class="dashboard-page__panel">
                <h2>"News"</h2>
                <Suspense fallback=move || view! { <p>"Loading news..."</p> }>
                    {move || {
                        news.get()
                            .map(|sourced| {
                                view! {
                                    <SourceBadge source=sourced.source/>
                                    <ul class="news-list">
                                        {sourced.data.into_iter().map(render_news_item).collect_view()}
                                    </ul>
                                }
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}

fn render_news_item(item: NewsItem) -> impl IntoView {
    let date = published_date(&item.published_at).to_owned();
    let title = match item.url {
        Some(url) => view! { <a href=url target="_blank" rel="noopener">{item.title}</a> }.into_any(),
        None => view! { <span>{item.title}</span> }.into_any(),
    };
    view! {
        <li class="news-list__item">
            <div class="news-list__title">{title}</div>
            <p class="news-list__summary">{item.summary}</p>
            <span class="news-list__meta">{item.source} " · " {date}</span>
        </li>
    }
}
