use leptos::prelude::*;
use leptos_router::components::A;
use shared_types::Appointment;

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server::get_my_appointments;
use crate::utils::auth::use_auth_session;
use crate::utils::format::{format_appointment_time, format_duration, format_price};

#[component]
pub fn MyAppointmentsPage() -> impl IntoView {
    let session = use_auth_session();

    let appointments = Resource::new(
        move || session.token(),
        |token| async move {
            match token {
                Some(token) => get_my_appointments(token).await.map(Some),
                None => Ok(None),
            }
        },
    );

    view! {
        <div class="appointments-page">
            <h1>"My appointments"</h1>
            <Show
                when=move || session.is_loaded()
                fallback=|| view! { <LoadingView/> }
            >
                <Suspense fallback=move || view! { <LoadingView message="Loading appointments..."/> }>
                    {move || {
                        appointments
                            .get()
                            .map(|result| match result {
                                Ok(None) => {
                                    view! {
                                        <p class="appointments-page__signin">
                                            <A href="/login?return_url=%2Fappointments">"Sign in"</A>
                                            " to see your appointments."
                                        </p>
                                    }
                                        .into_any()
                                }
                                Ok(Some(list)) if list.is_empty() => {
                                    view! {
                                        <p class="appointments-page__empty">
                                            "No appointments yet. "
                                            <A href="/">"Find a professional"</A>
                                        </p>
                                    }
                                        .into_any()
                                }
                                Ok(Some(list)) => {
                                    view! {
                                        <ul class="appointment-list">
                                            {list
                                                .into_iter()
                                                .map(|a| view! { <AppointmentRow appointment=a/> })
                                                .collect_view()}
                                        </ul>
                                    }
                                        .into_any()
                                }
                                Err(e) => {
                                    view! {
                                        <ErrorView message=format!("Could not load appointments: {}", e)/>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </Show>
        </div>
    }
}

#[component]
fn AppointmentRow(appointment: Appointment) -> impl IntoView {
    let status = appointment.status.as_str();

    view! {
        <li class="appointment-row">
            <div class="appointment-row__main">
                <span class="appointment-row__service">{appointment.service}</span>
                <span class="appointment-row__when">{format_appointment_time(appointment.date)}</span>
                <span class="appointment-row__address">{appointment.address}</span>
            </div>
            <div class="appointment-row__meta">
                <span class=format!("status-badge status-badge--{}", status)>{status}</span>
                <span>{format_price(appointment.price)}</span>
                <span>{format_duration(appointment.duration)}</span>
            </div>
        </li>
    }
}
