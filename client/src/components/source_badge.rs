//! Badge marking a payload as live or as offline sample data.

use leptos::prelude::*;

use crate::net::market::DataSource;

/// Small pill shown next to market panels. Fallback data carries the failure
/// reason as a tooltip.
#[component]
pub fn SourceBadge(source: DataSource) -> impl IntoView {
    match source {
        DataSource::Live => view! { <span class="source-badge source-badge--live">"Live"</span> }.into_any(),
        DataSource::Fallback { reason } => view! {
            <span class="source-badge source-badge--fallback" title=reason>
                "Offline sample data"
            </span>
        }
        .into_any(),
    }
}
