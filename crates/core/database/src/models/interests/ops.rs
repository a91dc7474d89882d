use vibepulse_result::Result;

use crate::Interest;

mod reference;

#[async_trait]
pub trait AbstractInterests: Sync + Send {
    /// Insert a new interest into the database
    async fn insert_interest(&self, interest: &Interest) -> Result<()>;

    /// Fetch an interest from the database
    async fn fetch_interest(&self, id: &str) -> Result<Interest>;

    /// Fetch all interests, in insertion order
    async fn fetch_interests(&self) -> Result<Vec<Interest>>;
}
