use leptos::prelude::*;
use shared_types::slot::group_by_day;
use shared_types::{BookingFlow, TimeSlot};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server::get_week_slots;
use crate::utils::format::{convert_to_12_hour_format, format_day};

/// Next week's start times for one professional, grouped by day.
///
/// Bumping `refresh` reloads the slots, e.g. after a booking went through.
#[component]
pub fn TimeSlotPicker(
    professional_id: i32,
    flow: RwSignal<BookingFlow>,
    flow_error: RwSignal<Option<String>>,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let slots_resource = Resource::new(
        move || (professional_id, refresh.get()),
        |(id, _)| async move { get_week_slots(id).await },
    );

    let enabled = Memo::new(move |_| flow.with(|f| f.can_choose_slot()));
    let selected_id = Memo::new(move |_| flow.with(|f| f.slot().map(|s| s.id.clone())));

    view! {
        <div class="time-slot-picker" class:time-slot-picker--disabled=move || !enabled.get()>
            <div class="time-slot-picker__header">
                <h3>"2. Pick a time"</h3>
                <Show when=move || !enabled.get()>
                    <p class="time-slot-picker__hint">"Choose at least one service first."</p>
                </Show>
            </div>

            <Suspense fallback=move || view! { <LoadingView message="Loading available times..."/> }>
                {move || {
                    slots_resource
                        .get()
                        .map(|result| match result {
                            Err(e) => {
                                view! {
                                    <ErrorView message=format!("Could not load time slots: {}", e)/>
                                }
                                    .into_any()
                            }
                            Ok(slots) if slots.iter().all(|s| !s.available) => {
                                view! {
                                    <div class="time-slot-picker__empty">
                                        <p>"No open times in the coming week."</p>
                                    </div>
                                }
                                    .into_any()
                            }
                            Ok(slots) => {
                                view! {
                                    <div class="time-slot-picker__days">
                                        {group_by_day(slots)
                                            .into_iter()
                                            .map(|(date, day)| {
                                                view! {
                                                    <div class="time-slot-day">
                                                        <h4>{format_day(date)}</h4>
                                                        <div class="time-slot-day__grid">
                                                            {day
                                                                .into_iter()
                                                                .map(|slot| {
                                                                    view! {
                                                                        <SlotButton
                                                                            time_slot=slot
                                                                            flow=flow
                                                                            flow_error=flow_error
                                                                            enabled=enabled
                                                                            selected_id=selected_id
                                                                        />
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn SlotButton(
    time_slot: TimeSlot,
    flow: RwSignal<BookingFlow>,
    flow_error: RwSignal<Option<String>>,
    enabled: Memo<bool>,
    selected_id: Memo<Option<String>>,
) -> impl IntoView {
    let slot = time_slot;
    let available = slot.available;
    let id = slot.id.clone();
    let label = convert_to_12_hour_format(slot.start);
    let is_selected = Memo::new(move |_| selected_id.with(|s| s.as_deref() == Some(id.as_str())));

    let on_pick = move |_| {
        let mut outcome = Ok(());
        flow.update(|f| outcome = f.select_slot(slot.clone()));
        match outcome {
            Ok(()) => flow_error.set(None),
            Err(e) => flow_error.set(Some(e.to_string())),
        }
    };

    view! {
        <button
            class="time-slot-button"
            class:time-slot-button--selected=move || is_selected.get()
            class:time-slot-button--taken=!available
            disabled=move || !available || !enabled.get()
            on:click=on_pick
        >
            {label}
        </button>
    }
}
