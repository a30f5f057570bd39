use crate::server::login_user;
use crate::utils::auth::use_auth_session;
use crate::utils::format::server_error_message;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::{use_navigate, use_query_map};
use thaw::*;

/// Only same-site paths are followed after sign-in.
fn safe_return_url(raw: Option<String>) -> String {
    match raw {
        Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
        _ => "/".to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let query_map = use_query_map();
    let navigate = use_navigate();
    let session = use_auth_session();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let is_button_disabled =
        Memo::new(move |_| email.get().trim().is_empty() || password.get().is_empty());

    let submit_login = move || {
        loading.set(true);
        error_message.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let return_url = safe_return_url(query_map.get_untracked().get("return_url"));
        let navigate = navigate.clone();

        spawn_local(async move {
            match login_user(email_value, password_value).await {
                Ok(response) => {
                    session.sign_in(response);
                    navigate(&return_url, Default::default());
                }
                Err(e) => {
                    error_message.set(Some(server_error_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Welcome back"</h1>
                    <p>"Sign in to book a professional"</p>
                </div>
                <form on:submit=move |ev| {
                    ev.prevent_default();
                    if !is_button_disabled.get_untracked() {
                        submit_login();
                    }
                }>
                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Email"
                            input_type=InputType::Email
                            value=email
                        />
                    </div>
                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Password"
                            input_type=InputType::Password
                            value=password
                        />
                    </div>
                    {move || error_message.get().map(|msg| view! {
                        <div class="auth-error-message">{msg}</div>
                    })}
                    <Button
                        class="auth-submit-btn"
                        button_type=ButtonType::Submit
                        loading=Signal::from(loading)
                        disabled=Signal::from(is_button_disabled)
                    >
                        "Sign In"
                    </Button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_url_stays_on_site() {
        assert_eq!(safe_return_url(Some("/pro/3".to_string())), "/pro/3");
        assert_eq!(safe_return_url(Some("//evil.test".to_string())), "/");
        assert_eq!(safe_return_url(Some("https://evil.test".to_string())), "/");
        assert_eq!(safe_return_url(None), "/");
    }
}
