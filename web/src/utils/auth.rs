use leptos::prelude::*;
use shared_types::AuthUser;

use crate::db::entities::LoginResponse;

const TOKEN_KEY: &str = "handybook_auth_token";
const USER_KEY: &str = "handybook_auth_user";

/// The signed-in account as seen by the browser.
///
/// Created once in `App` and handed to pages through context. Pages take
/// it with [`use_auth_session`], which panics when `App` did not provide
/// it instead of silently treating the visitor as signed out.
#[derive(Clone, Copy)]
pub struct AuthSession {
    token: RwSignal<Option<String>>,
    user: RwSignal<Option<AuthUser>>,
    /// False until the browser storage has been read.
    loaded: RwSignal<bool>,
}

impl AuthSession {
    pub fn new() -> Self {
        let session = AuthSession {
            token: RwSignal::new(None),
            user: RwSignal::new(None),
            loaded: RwSignal::new(false),
        };

        // Only runs in the browser, after hydration.
        Effect::new(move |_| {
            if let Some((token, user)) = read_stored_session() {
                session.token.set(Some(token));
                session.user.set(Some(user));
            }
            session.loaded.set(true);
        });

        session
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.user.get()
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn sign_in(&self, response: LoginResponse) {
        write_stored_session(&response);
        self.token.set(Some(response.token));
        self.user.set(Some(response.user));
    }

    pub fn sign_out(&self) {
        clear_stored_session();
        self.token.set(None);
        self.user.set(None);
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_auth_session() -> AuthSession {
    let session = AuthSession::new();
    provide_context(session);
    session
}

pub fn use_auth_session() -> AuthSession {
    expect_context::<AuthSession>()
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "hydrate")]
fn read_stored_session() -> Option<(String, AuthUser)> {
    let storage = local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok().flatten().filter(|t| !t.is_empty())?;
    let user_json = storage.get_item(USER_KEY).ok().flatten()?;
    match serde_json::from_str::<AuthUser>(&user_json) {
        Ok(user) => Some((token, user)),
        Err(e) => {
            leptos::logging::warn!("Discarding unreadable stored session: {}", e);
            clear_stored_session();
            None
        }
    }
}

#[cfg(not(feature = "hydrate"))]
fn read_stored_session() -> Option<(String, AuthUser)> {
    None
}

#[cfg(feature = "hydrate")]
fn write_stored_session(response: &LoginResponse) {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = storage.set_item(TOKEN_KEY, &response.token);
    match serde_json::to_string(&response.user) {
        Ok(json) => {
            let _ = storage.set_item(USER_KEY, &json);
        }
        Err(e) => leptos::logging::error!("Failed to store session: {}", e),
    }
}

#[cfg(not(feature = "hydrate"))]
fn write_stored_session(_response: &LoginResponse) {}

#[cfg(feature = "hydrate")]
fn clear_stored_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

#[cfg(not(feature = "hydrate"))]
fn clear_stored_session() {}
