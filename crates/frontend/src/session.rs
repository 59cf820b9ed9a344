//! Client-side session state: the bearer token and the cached profile.
//!
//! The session is an explicit value owned by the app root and handed down
//! through context. Components never reach for storage directly; they
//! dispatch [`SessionAction`]s and the reducer keeps LocalStorage in sync.

use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use shared_types::UserProfile;
use yew::prelude::*;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "user_data";

/// Snapshot of the signed-in state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Rebuild the session from LocalStorage at app start.
    pub fn restore() -> Self {
        Self {
            token: LocalStorage::get(TOKEN_KEY).ok(),
            user: LocalStorage::get(USER_KEY).ok(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// State transitions the UI can request.
pub enum SessionAction {
    /// A fresh token arrived from the OAuth callback.
    SignIn(String),
    /// The profile fetch for the current token completed.
    SetUser(UserProfile),
    /// Log out and forget everything.
    Clear,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        let next = match action {
            SessionAction::SignIn(token) => {
                if let Err(e) = LocalStorage::set(TOKEN_KEY, &token) {
                    tracing::error!("Failed to persist session token: {:?}", e);
                }
                Session {
                    token: Some(token),
                    user: self.user.clone(),
                }
            }
            SessionAction::SetUser(user) => {
                if let Err(e) = LocalStorage::set(USER_KEY, &user) {
                    tracing::error!("Failed to persist user snapshot: {:?}", e);
                }
                Session {
                    token: self.token.clone(),
                    user: Some(user),
                }
            }
            SessionAction::Clear => {
                LocalStorage::delete(TOKEN_KEY);
                LocalStorage::delete(USER_KEY);
                Session::default()
            }
        };

        Rc::new(next)
    }
}

pub type SessionHandle = UseReducerHandle<Session>;
