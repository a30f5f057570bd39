use leptos::prelude::*;
use shared_types::{BookingFlow, Service};

use crate::utils::format::{format_duration, format_price};

/// Checkbox list of a professional's services with a running total.
#[component]
pub fn ServiceSelector(
    services: Vec<Service>,
    flow: RwSignal<BookingFlow>,
    flow_error: RwSignal<Option<String>>,
) -> impl IntoView {
    if services.is_empty() {
        return view! {
            <div class="service-selector service-selector--empty">
                <p>"This professional has not listed any services yet."</p>
            </div>
        }
        .into_any();
    }

    let selected_count = Memo::new(move |_| flow.with(|f| f.selection().len()));
    let total_price = Memo::new(move |_| flow.with(|f| f.selection().total_price()));
    let total_duration = Memo::new(move |_| flow.with(|f| f.selection().total_duration()));
    let locked = Memo::new(move |_| flow.with(|f| f.is_submitting()));

    view! {
        <div class="service-selector">
            <h3>"1. Choose services"</h3>
            <ul class="service-selector__list">
                {services
                    .into_iter()
                    .map(|service| {
                        let name = service.name.clone();
                        let is_selected = Memo::new(move |_| {
                            flow.with(|f| f.selection().contains(&name))
                        });
                        let target = service.clone();
                        let on_toggle = move |_| {
                            let mut outcome = Ok(false);
                            flow.update(|f| outcome = f.toggle_service(&target));
                            match outcome {
                                Ok(_) => flow_error.set(None),
                                Err(e) => flow_error.set(Some(e.to_string())),
                            }
                        };

                        view! {
                            <li
                                class="service-card"
                                class:service-card--selected=move || is_selected.get()
                            >
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || is_selected.get()
                                        disabled=move || locked.get()
                                        on:change=on_toggle
                                    />
                                    <div class="service-card__body">
                                        <span class="service-card__name">{service.name}</span>
                                        <span class="service-card__description">
                                            {service.description}
                                        </span>
                                    </div>
                                    <div class="service-card__meta">
                                        <span class="service-card__price">
                                            {format_price(service.price)}
                                        </span>
                                        <span class="service-card__duration">
                                            {format_duration(service.duration)}
                                        </span>
                                    </div>
                                </label>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="service-selector__totals">
                {move || match selected_count.get() {
                    0 => "No services selected".to_string(),
                    1 => "1 service selected".to_string(),
                    n => format!("{} services selected", n),
                }}
                <Show when=move || { selected_count.get() > 0 }>
                    <span class="service-selector__total-price">
                        {move || format_price(total_price.get())}
                    </span>
                    <span class="service-selector__total-duration">
                        {move || format_duration(total_duration.get())}
                    </span>
                </Show>
            </div>
        </div>
    }
    .into_any()
}
