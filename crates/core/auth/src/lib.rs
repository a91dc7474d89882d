#[macro_use]
extern crate log;

#[macro_use]
extern crate vibepulse_result;

use std::sync::Arc;

use futures::lock::Mutex;
use vibepulse_database::{Database, PartialUser, User};
use vibepulse_result::Result;

/// Session with the frame host
///
/// Verification of frame signatures is stubbed out; the session
/// trusts the frame id it is handed.
#[derive(Clone)]
pub struct FrameSession {
    db: Database,
    current: Arc<Mutex<Option<User>>>,
}

impl FrameSession {
    /// Create a new session service over the given database
    pub fn new(db: Database) -> FrameSession {
        FrameSession {
            db,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Authenticate a frame id, provisioning a profile on first sight
    pub async fn authenticate(&self, frame_id: u64) -> Result<User> {
        let id = format!("frame_{frame_id}");

        let user = match self.db.fetch_user(&id).await {
            Ok(user) => user,
            Err(_) => {
                info!("Provisioning a new user for frame id {frame_id}.");
                User::create(&self.db, format!("user{frame_id}"), Some(id), None).await?
            }
        };

        self.current.lock().await.replace(user.clone());
        Ok(user)
    }

    /// Currently authenticated user, if any
    pub async fn current_user(&self) -> Option<User> {
        self.current.lock().await.clone()
    }

    /// Update the signed-in user's profile
    pub async fn update_profile(&self, partial: PartialUser) -> Result<User> {
        let mut current = self.current.lock().await;
        let user = current
            .as_mut()
            .ok_or_else(|| create_error!(NotAuthenticated))?;

        user.update(&self.db, partial).await?;
        Ok(user.clone())
    }

    /// Clear the session
    pub async fn sign_out(&self) {
        self.current.lock().await.take();
    }

    /// Verify a frame signature
    ///
    /// Stub: accepts everything until wired up to the frame host's
    /// verifier.
    pub async fn verify_signature(&self, _frame_id: u64, _signature: &str) -> Result<bool> {
        Ok(true)
    }
}
