use vibepulse_result::Result;

use crate::{PartialUser, User};

mod reference;

#[async_trait]
pub trait AbstractUsers: Sync + Send {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User>;

    /// Fetch multiple users by their ids
    ///
    /// Input order is preserved; unknown ids are skipped silently.
    async fn fetch_users<'a>(&self, ids: &'a [String]) -> Result<Vec<User>>;

    /// Update a user's information
    async fn update_user(&self, id: &str, partial: &PartialUser) -> Result<()>;
}
