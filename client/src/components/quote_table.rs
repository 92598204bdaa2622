//! Table of market quotes linking to each instrument's detail page.

use leptos::prelude::*;

use crate::net::types::MarketQuote;
use crate::util::format::{change_class, format_change, format_currency, format_volume};

#[component]
pub fn QuoteTable(quotes: Vec<MarketQuote>) -> impl IntoView {
    let rows = quotes
        .into_iter()
        .map(|q| {
            let href = format!("/stocks/{}", q.symbol);
            view! {
                <tr>
                    <td><a href=href>{q.symbol.clone()}</a></td>
                    <td>{q.name.clone()}</td>
                    <td class="num">{format_currency(q.price)}</td>
                    <td class=format!("num {}", change_class(q.change))>{format_change(q.change, q.change_percent)}</td>
                    <td class="num">{format_volume(q.volume)}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="quote-table">
            <thead>
                <tr>
                    <th>"Symbol"</th>
                    <th>"Name"</th>
                    <th>"Price"</th>
                    <th>"Change"</th>
                    <th>"Volume"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
