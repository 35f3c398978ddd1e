//! Durable persistence for the one bearer token.
//!
//! Browser builds store the token in `localStorage` under a fixed key so the
//! session survives page reloads. When storage is unavailable (private
//! browsing, disabled storage) nothing here panics: `write` warns once and
//! the token stays usable in memory for the rest of the session, `read` and
//! `clear` fail silently. Non-browser builds keep the value in memory, shared
//! across clones.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "FILESHARE_AUTH_TOKEN";

/// Persistence boundary for the bearer token. Cheap to clone; clones share
/// the same underlying storage.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    #[cfg(feature = "hydrate")]
    warned: std::rc::Rc<std::cell::Cell<bool>>,
    #[cfg(not(feature = "hydrate"))]
    value: std::rc::Rc<std::cell::RefCell<Option<String>>>,
}

impl TokenStore {
    /// Read the persisted token. `None` when absent, empty, or storage is
    /// unavailable.
    pub fn read(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()
                .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
                .filter(|t| !t.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.value.borrow().clone().filter(|t| !t.is_empty())
        }
    }

    /// Persist the token. If storage is unavailable the first failed write
    /// warns; the session continues in-memory only.
    pub fn write(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            let stored =
                local_storage().is_some_and(|s| s.set_item(STORAGE_KEY, token).is_ok());
            if !stored && !self.warned.replace(true) {
                leptos::logging::warn!(
                    "local storage is unavailable; you stay logged in for this tab only"
                );
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            *self.value.borrow_mut() = Some(token.to_owned());
        }
    }

    /// Remove the persisted token. Fails silently when storage is
    /// unavailable.
    pub fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            *self.value.borrow_mut() = None;
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
