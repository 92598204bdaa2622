//! Registration page: display name, email, password, confirmation.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use super::login::{MIN_PASSWORD_LEN, looks_like_email};
use crate::app::IdentityHandle;

/// Validated registration fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Registration {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

pub(crate) fn validate_registration_input(
    display_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Registration, &'static str> {
    let display_name = display_name.trim();
    let email = email.trim();
    if display_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in every field.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(Registration { display_name: display_name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let identity = use_context::<IdentityHandle>();
    let display_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration =
            match validate_registration_input(&display_name.get(), &email.get(), &password.get(), &confirm.get()) {
                Ok(r) => r,
                Err(msg) => {
                    info.set(msg.to_owned());
                    return;
                }
            };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let Some(identity) = identity.map(|handle| handle.get_value()) else {
                info.set("Registration is not available yet.".to_owned());
                busy.set(false);
                return;
            };
            leptos::task::spawn_local(async move {
                let result = identity
                    .register(&registration.email, &registration.password, &registration.display_name)
                    .await;
                match result {
                    Ok(_) => info.set(String::new()),
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (identity, registration);
        }
    };

    let text_input = move |kind: &'static str, placeholder: &'static str, field: RwSignal<String>| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || field.get()
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"FinAssist"</h1>
                <p class="login-card__subtitle">"Create your account"</p>
                <form class="login-form" on:submit=on_submit>
                    {text_input("text", "Your name", display_name)}
                    {text_input("email", "you@example.com", email)}
                    {text_input("password", "Password", password)}
                    {text_input("password", "Confirm password", confirm)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Create Account"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
