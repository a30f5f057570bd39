use leptos::prelude::*;
use leptos_router::components::A;

use crate::utils::auth::use_auth_session;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_auth_session();

    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <A href="/" attr:class="navbar__logo">
                        "HandyBook"
                    </A>
                </div>

                <div class="navbar__links">
                    <A href="/" attr:class="navbar__link">
                        "Professionals"
                    </A>
                    {move || match session.user() {
                        Some(user) => view! {
                            <A href="/appointments" attr:class="navbar__link">
                                "My appointments"
                            </A>
                            <span class="navbar__user">{user.email}</span>
                            <button
                                class="navbar__link navbar__link--ghost"
                                on:click=move |_| session.sign_out()
                            >
                                "Sign out"
                            </button>
                        }.into_any(),
                        None => view! {
                            <A href="/login" attr:class="navbar__link navbar__link--cta">
                                "Sign in"
                            </A>
                        }.into_any(),
                    }}
                </div>
            </div>
        </nav>
    }
}
