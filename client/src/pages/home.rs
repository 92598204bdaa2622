//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::SessionState;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <div class="home-page">
            <h1>"FinAssist"</h1>
            <p class="home-page__tagline">"Markets, portfolio and your financial profile in one place."</p>
            <div class="home-page__actions">
                <Show
                    when=move || session.with(SessionState::is_authenticated)
                    fallback=|| {
                        view! {
                            <a class="btn btn--primary" href="/login">"Sign In"</a>
                            <a class="btn" href="/register">"Create Account"</a>
                        }
                    }
                >
                    <a class="btn btn--primary" href="/dashboard">"Open Dashboard"</a>
                </Show>
            </div>
        </div>
    }
}
