use vibepulse_result::Result;

use crate::Interest;
use crate::ReferenceDb;

use super::AbstractInterests;

#[async_trait]
impl AbstractInterests for ReferenceDb {
    /// Insert a new interest into the database
    async fn insert_interest(&self, interest: &Interest) -> Result<()> {
        let mut interests = self.interests.lock().await;
        if interests.contains_key(&interest.id) {
            Err(create_database_error!("insert", "interest"))
        } else {
            interests.insert(interest.id.clone(), interest.clone());
            Ok(())
        }
    }

    /// Fetch an interest from the database
    async fn fetch_interest(&self, id: &str) -> Result<Interest> {
        let interests = self.interests.lock().await;
        interests
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all interests, in insertion order
    async fn fetch_interests(&self) -> Result<Vec<Interest>> {
        let interests = self.interests.lock().await;
        Ok(interests.values().cloned().collect())
    }
}
