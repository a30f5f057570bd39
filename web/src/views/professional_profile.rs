use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use shared_types::{BookingFlow, BookingFlowError, BookingStage, ProfessionalProfile};
use thaw::*;

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::{BookingConfirmModal, ServiceSelector, TimeSlotPicker};
use crate::server::get_professional;
use crate::utils::auth::use_auth_session;
use crate::utils::format::{format_appointment_time, format_duration, format_price};

#[component]
pub fn ProfessionalProfilePage() -> impl IntoView {
    let params = use_params_map();
    let professional_id =
        Memo::new(move |_| params.read().get("id").and_then(|id| id.parse::<i32>().ok()));

    let professional_resource = Resource::new(
        move || professional_id.get(),
        |id| async move {
            match id {
                Some(id) => get_professional(id).await.map(Some),
                None => Ok(None),
            }
        },
    );

    view! {
        <div class="professional-page">
            <Suspense fallback=move || view! { <LoadingView message="Loading professional..."/> }>
                {move || {
                    professional_resource
                        .get()
                        .map(|result| match result {
                            Ok(Some(professional)) => {
                                view! { <BookingPanel professional=professional/> }.into_any()
                            }
                            Ok(None) => {
                                view! { <ErrorView message="That professional does not exist."/> }
                                    .into_any()
                            }
                            Err(e) => {
                                view! {
                                    <ErrorView message=format!("Could not load professional: {}", e)/>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

/// The booking wizard for one professional.
#[component]
fn BookingPanel(professional: ProfessionalProfile) -> impl IntoView {
    let session = use_auth_session();
    let navigate = use_navigate();

    let flow = RwSignal::new(BookingFlow::new());
    let flow_error = RwSignal::new(None::<String>);
    let slot_refresh = RwSignal::new(0u32);

    let ProfessionalProfile {
        id: professional_id,
        business_name,
        category,
        city,
        state,
        bio,
        services,
        ..
    } = professional;
    let heading = business_name.clone();
    let can_confirm = Memo::new(move |_| flow.with(|f| f.can_confirm()));

    let handle_book = move |_| {
        let user = session.user();
        let mut outcome = Ok(());
        flow.update(|f| outcome = f.open_confirmation(user.as_ref()));

        match outcome {
            Ok(()) => flow_error.set(None),
            Err(BookingFlowError::NotAuthenticated) => {
                let here = format!("/pro/{}", professional_id);
                navigate(
                    &format!("/login?return_url={}", urlencoding::encode(&here)),
                    Default::default(),
                );
            }
            Err(e) => flow_error.set(Some(e.to_string())),
        }
    };

    let on_booked = move || slot_refresh.update(|n| *n += 1);

    view! {
        <div class="professional-header">
            <span class="professional-header__category">{category.label()}</span>
            <h1>{heading}</h1>
            <p class="professional-header__location">{format!("{}, {}", city, state)}</p>
            {bio.map(|bio| view! { <p class="professional-header__bio">{bio}</p> })}
        </div>

        {move || flow.with(|f| match f.stage() {
            BookingStage::Success(receipt) => Some({ let receipt = receipt.clone(); view! {
                <MessageBar intent=MessageBarIntent::Success>
                    {format!(
                        "Booking requested! Your reference is #{}. The professional will confirm shortly.",
                        receipt.appointment_id,
                    )}
                </MessageBar>
            }.into_any() }),
            BookingStage::Error(message) => Some({ let message = message.clone(); view! {
                <MessageBar intent=MessageBarIntent::Error>
                    {format!("We could not book this appointment: {}", message)}
                </MessageBar>
            }.into_any() }),
            _ => None,
        })}

        <div class="booking-steps">
            <ServiceSelector
                services=services
                flow=flow
                flow_error=flow_error
            />
            <TimeSlotPicker
                professional_id=professional_id
                flow=flow
                flow_error=flow_error
                refresh=slot_refresh
            />
        </div>

        <div class="booking-bar">
            <div class="booking-bar__summary">
                {move || flow.with(|f| match f.slot() {
                    Some(slot) => format!(
                        "{} · {} · {}",
                        format_appointment_time(slot.starts_at()),
                        format_price(f.selection().total_price()),
                        format_duration(f.selection().total_duration()),
                    ),
                    None if f.selection().is_empty() => "Pick a service to get started".to_string(),
                    None => "Now pick a time".to_string(),
                })}
            </div>
            <Show when=move || flow_error.get().is_some()>
                <div class="booking-bar__error">{move || flow_error.get().unwrap_or_default()}</div>
            </Show>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || !can_confirm.get())
                on_click=handle_book
            >
                "Book"
            </Button>
        </div>

        <BookingConfirmModal
            flow=flow
            flow_error=flow_error
            professional_id=professional_id
            business_name=business_name
            on_booked=on_booked
        />
    }
}
