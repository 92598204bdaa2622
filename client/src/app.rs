//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the session signal, the market client, and (in the browser)
//! the session gate feeding that signal. The route guard sits inside the
//! router so it can see the current path.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::{ClientConfig, RouteConfig};
use crate::net::identity::FirebaseIdentity;
use crate::net::market::{HttpTransport, MarketClient};
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, portfolio::PortfolioPage, profile::ProfilePage,
    register::RegisterPage, stock::StockPage,
};
use crate::state::auth::SessionState;
use crate::util::auth::install_route_guard;
use crate::util::storage::BrowserStorage;

pub type BrowserIdentity = FirebaseIdentity<BrowserStorage>;

/// Browser-only identity adapter. Absent during SSR, so pages look it up with
/// `use_context`.
pub type IdentityHandle = StoredValue<BrowserIdentity, LocalStorage>;

pub type AppMarketClient = MarketClient<HttpTransport>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let session = RwSignal::new(SessionState::default());
    provide_context(session);
    provide_context(AppMarketClient::new(HttpTransport::new(config.api_base_url.clone())));

    #[cfg(feature = "hydrate")]
    mount_session_gate(&config, session);

    let routes = config.routes;

    view! {
        <Stylesheet id="leptos" href="/pkg/finassist.css"/>
        <Title text="FinAssist"/>

        <Router>
            <RouteGuard routes/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("portfolio") view=PortfolioPage/>
                    <Route path=(StaticSegment("stocks"), ParamSegment("symbol")) view=StockPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Redirects based on session state and the current path.
#[component]
fn RouteGuard(routes: RouteConfig) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_route_guard(session, routes, use_navigate());
}

/// Build the identity adapter and session gate, and bind the gate's lifetime
/// to the root owner.
#[cfg(feature = "hydrate")]
fn mount_session_gate(config: &ClientConfig, session: RwSignal<SessionState>) {
    use crate::state::auth::{Environment, SessionGate};

    let identity = BrowserIdentity::new(config.identity.clone(), BrowserStorage);
    let gate = SessionGate::new(identity.clone(), BrowserStorage);
    gate.observe(move |state| session.set(state.clone()));
    provide_context::<IdentityHandle>(StoredValue::new_local(identity));

    let gate = StoredValue::new_local(gate);
    // Subscribe after hydration so the first client render matches the server's.
    Effect::new(move || gate.with_value(|gate| gate.initialize(Environment::detect())));
    on_cleanup(move || {
        let _ = gate.try_with_value(|gate| gate.teardown());
    });
}
