//! Stock detail page for `/stocks/:symbol`.

#[cfg(test)]
#[path = "stock_test.rs"]
mod stock_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::AppMarketClient;
use crate::components::source_badge::SourceBadge;
use crate::net::types::StockDetail;
use crate::util::format::{change_class, format_change, format_currency, format_volume};

/// Route param → ticker. Blank params yield `None`.
pub(crate) fn normalize_symbol(raw: Option<String>) -> Option<String> {
    let symbol = raw?.trim().to_ascii_uppercase();
    (!symbol.is_empty()).then_some(symbol)
}

/// `2_500_000_000_000.0` → `"$2.50T"`.
pub(crate) fn format_market_cap(cap: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];
    for (scale, suffix) in UNITS {
        if cap >= scale {
            return format!("${:.2}{suffix}", cap / scale);
        }
    }
    format_currency(cap)
}

#[component]
pub fn StockPage() -> impl IntoView {
    let market = expect_context::<AppMarketClient>();
    let params = use_params_map();
    let symbol = Memo::new(move |_| normalize_symbol(params.with(|p| p.get("symbol"))));

    let detail = LocalResource::new(move || {
        let symbol = symbol.get();
        let market = market.clone();
        async move {
            match symbol {
                Some(symbol) => Some(market.stock(&symbol).await),
                None => None,
            }
        }
    });

    view! {
        <div class="stock-page">
            <header class="stock-page__header">
                <a href="/dashboard">"← Dashboard"</a>
                <h1>{move || symbol.get().unwrap_or_default()}</h1>
            </header>
            <Suspense fallback=move || view! { <p>"Loading quote..."</p> }>
                {move || {
                    detail
                        .get()
                        .map(|sourced| match sourced {
                            Some(sourced) => {
                                view! {
                                    <SourceBadge source=sourced.source/>
                                    {render_detail(sourced.data)}
                                }
                                    .into_any()
                            }
                            None => view! { <p>"Unknown symbol."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

fn render_detail(stock: StockDetail) -> impl IntoView {
    let cap = stock.market_cap.map_or_else(|| "n/a".to_owned(), format_market_cap);
    view! {
        <dl class="stock-page__detail">
            <dt>"Name"</dt>
            <dd>{stock.name}</dd>
            <dt>"Price"</dt>
            <dd>{format_currency(stock.price)}</dd>
            <dt>"Change"</dt>
            <dd class=change_class(stock.change)>{format_change(stock.change, stock.change_percent)}</dd>
            <dt>"Volume"</dt>
            <dd>{format_volume(stock.volume)}</dd>
            <dt>"Market Cap"</dt>
            <dd>{cap}</dd>
        </dl>
    }
}
