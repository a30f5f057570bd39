use leptos::prelude::*;
use shared_types::{BookingFlow, BookingFlowError, BookingStage, NewAppointment};
use thaw::*;

use crate::server::create_appointment;
use crate::utils::auth::use_auth_session;
use crate::utils::format::{
    format_appointment_time, format_duration, format_price, server_error_message,
};

/// Final review before the appointment is sent. Open while the flow is
/// confirming or submitting.
#[component]
pub fn BookingConfirmModal(
    flow: RwSignal<BookingFlow>,
    flow_error: RwSignal<Option<String>>,
    professional_id: i32,
    business_name: String,
    on_booked: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let session = use_auth_session();

    let address = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let show = Memo::new(move |_| {
        flow.with(|f| matches!(f.stage(), BookingStage::Confirming | BookingStage::Submitting))
    });
    let is_submitting = Memo::new(move |_| flow.with(|f| f.is_submitting()));

    let submit_booking = Action::new(move |input: &(String, NewAppointment)| {
        let (token, appointment) = input.clone();
        async move { create_appointment(token, appointment).await }
    });

    let handle_submit = move || {
        let (Some(user), Some(token)) = (session.user(), session.token()) else {
            flow_error.set(Some(BookingFlowError::NotAuthenticated.to_string()));
            return;
        };

        let mut outcome = Err(BookingFlowError::NoSlotSelected);
        flow.update(|f| {
            f.set_address(address.get_untracked());
            f.set_notes(notes.get_untracked());
            outcome = f.begin_submit(user.profile_id, professional_id);
        });

        match outcome {
            Ok(appointment) => {
                flow_error.set(None);
                submit_booking.dispatch((token, appointment));
            }
            Err(e) => flow_error.set(Some(e.to_string())),
        }
    };

    Effect::new(move |_| {
        if let Some(result) = submit_booking.value().get() {
            let outcome = result.map_err(|e| {
                leptos::logging::error!("Booking failed: {}", e);
                server_error_message(&e)
            });
            let booked = outcome.is_ok();

            let mut finished = Ok(());
            flow.update(|f| finished = f.finish(outcome));
            if let Err(e) = finished {
                leptos::logging::warn!("Ignoring booking result: {}", e);
                return;
            }

            if booked {
                address.set(String::new());
                notes.set(String::new());
                on_booked();
            }
        }
    });

    let close_modal = move || {
        let mut outcome = Ok(());
        flow.update(|f| outcome = f.cancel_confirmation());
        if let Err(e) = outcome {
            flow_error.set(Some(e.to_string()));
        }
    };

    view! {
        <div class=move || if show.get() { "booking-modal-overlay show" } else { "booking-modal-overlay" }>
            <div class="booking-modal">
                <div class="modal-header">
                    <h2>{format!("Book with {}", business_name)}</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| close_modal()
                        disabled=Signal::from(is_submitting)
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <div class="modal-content">
                    <div class="booking-summary">
                        <h4>"Services"</h4>
                        <ul>
                            {move || {
                                flow.with(|f| {
                                    f.selection()
                                        .services()
                                        .iter()
                                        .map(|s| {
                                            view! {
                                                <li>
                                                    <span>{s.name.clone()}</span>
                                                    <span>{format_price(s.price)}</span>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </ul>
                        <p class="booking-summary__when">
                            {move || {
                                flow.with(|f| {
                                    f.slot()
                                        .map(|s| format_appointment_time(s.starts_at()))
                                        .unwrap_or_default()
                                })
                            }}
                        </p>
                        <p class="booking-summary__total">
                            {move || {
                                flow.with(|f| {
                                    format!(
                                        "Total {} · {}",
                                        format_price(f.selection().total_price()),
                                        format_duration(f.selection().total_duration()),
                                    )
                                })
                            }}
                        </p>
                    </div>

                    <form
                        class="booking-form-content"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            handle_submit();
                        }
                    >
                        <div class="form-group">
                            <label for="booking-address">"Service address *"</label>
                            <Input
                                id="booking-address"
                                placeholder="Street, city"
                                value=address
                            />
                        </div>
                        <div class="form-group">
                            <label for="booking-notes">"Notes for the professional"</label>
                            <Textarea
                                id="booking-notes"
                                placeholder="Gate code, parking, what is broken..."
                                value=notes
                            />
                        </div>

                        <Show when=move || flow_error.get().is_some()>
                            <MessageBar intent=MessageBarIntent::Error>
                                {move || flow_error.get().unwrap_or_default()}
                            </MessageBar>
                        </Show>

                        <div class="form-actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| close_modal()
                                disabled=Signal::from(is_submitting)
                            >
                                "Back"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                button_type=ButtonType::Submit
                                disabled=Signal::from(is_submitting)
                            >
                                {move || if is_submitting.get() { "Booking..." } else { "Confirm booking" }}
                            </Button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
