// Mock auth and subscriber bits. There is no backend - the "session" is
// a JSON slot like everything else, which is exactly what the demo needs.

use crate::store::{slots, StateStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: String,
}

pub struct AccountManager {
    store: StateStore,
    user: Option<UserAccount>,
    favorites: Vec<String>,
}

impl AccountManager {
    pub fn load(store: StateStore) -> Self {
        let user = store.load_or(slots::USER, || None);
        let favorites = store.load_or(slots::FAVORITES, Vec::new);
        Self { store, user, favorites }
    }

    pub fn user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    /// Mock sign-in: the name is whatever comes before the @, the plan is
    /// always the monthly one. Empty input gets the demo subscriber.
    pub fn login(&mut self, email: &str) {
        let email = match email.trim() {
            "" => "assinante@demo.tv",
            email => email,
        };
        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = UserAccount {
            id: "u1".to_string(),
            name,
            email: email.to_string(),
            plan: "Mensal".to_string(),
        };
        info!("signed in as {}", user.email);
        self.user = Some(user);
        self.flush_user();
    }

    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            info!("signed out");
            self.flush_user();
        }
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Flip a media id in or out of the favorites list. Returns whether it
    /// is a favorite afterwards.
    pub fn toggle_favorite(&mut self, media_id: &str) -> bool {
        let favorited = if let Some(pos) = self.favorites.iter().position(|f| f == media_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(media_id.to_string());
            true
        };
        if let Err(e) = self.store.save(slots::FAVORITES, &self.favorites) {
            warn!("could not persist favorites: {}", e);
        }
        favorited
    }

    fn flush_user(&self) {
        if let Err(e) = self.store.save(slots::USER, &self.user) {
            warn!("could not persist user session: {}", e);
        }
    }

    /// Opt into desktop alerts for new transmissions. One notification
    /// confirms it worked; a refusal bubbles up so the frontend can show
    /// its single alert line.
    #[cfg(feature = "notify")]
    pub fn enable_notifications(&self) -> anyhow::Result<()> {
        notify_rust::Notification::new()
            .summary("Notificações ativadas!")
            .body("Você receberá alertas de novas lives.")
            .show()?;
        Ok(())
    }
}
