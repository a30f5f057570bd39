use leptos::prelude::*;
use leptos_router::components::A;
use shared_types::{ProfessionalProfile, ServiceCategory};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server::get_all_professionals;
use crate::utils::format::format_price;

#[component]
pub fn HomePage() -> impl IntoView {
    let category_filter = RwSignal::new(None::<ServiceCategory>);
    let professionals = Resource::new(|| (), |_| async move { get_all_professionals().await });

    view! {
        <div class="homepage-container">
            <div class="homepage-hero">
                <h1>"HandyBook"</h1>
                <p>"Book a mechanic, plumber or locksmith for this week."</p>
            </div>

            <div class="category-filter">
                <button
                    class="btn-outlined"
                    class:active=move || category_filter.get().is_none()
                    on:click=move |_| category_filter.set(None)
                >
                    "All"
                </button>
                {ServiceCategory::ALL
                    .into_iter()
                    .map(|category| {
                        view! {
                            <button
                                class="btn-outlined"
                                class:active=move || category_filter.get() == Some(category)
                                on:click=move |_| category_filter.set(Some(category))
                            >
                                {category.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <Suspense fallback=move || view! { <LoadingView message="Loading professionals..."/> }>
                {move || {
                    professionals
                        .get()
                        .map(|result| match result {
                            Err(e) => {
                                view! {
                                    <ErrorView message=format!("Could not load professionals: {}", e)/>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                let filter = category_filter.get();
                                let shown: Vec<ProfessionalProfile> = list
                                    .into_iter()
                                    .filter(|p| filter.map_or(true, |c| p.category == c))
                                    .collect();
                                if shown.is_empty() {
                                    view! {
                                        <p class="professional-list__empty">
                                            "No professionals in this category yet."
                                        </p>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        <div class="professional-list">
                                            {shown
                                                .into_iter()
                                                .map(|p| view! { <ProfessionalCard professional=p/> })
                                                .collect_view()}
                                        </div>
                                    }
                                        .into_any()
                                }
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ProfessionalCard(professional: ProfessionalProfile) -> impl IntoView {
    let href = format!("/pro/{}", professional.id);
    let starting_at = professional
        .starting_price()
        .map(|price| format!("From {}", format_price(price)));
    let service_count = professional.services.len();

    view! {
        <A href=href attr:class="professional-card">
            <span class="professional-card__category">{professional.category.label()}</span>
            <h3>{professional.business_name}</h3>
            <p class="professional-card__location">
                {format!("{}, {}", professional.city, professional.state)}
            </p>
            <p class="professional-card__services">
                {format!("{} services", service_count)}
                {starting_at.map(|s| view! { <span class="professional-card__price">{s}</span> })}
            </p>
        </A>
    }
}
