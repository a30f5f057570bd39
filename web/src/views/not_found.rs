use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="not-found">
            <div class="not-found__code">"404"</div>
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist or has moved."</p>
            <A href="/" attr:class="btn-primary">"Browse professionals"</A>
        </div>
    }
}
