use iso8601_timestamp::{Duration, Timestamp};
use vibepulse_result::Result;

use crate::SocialActivity;

mod reference;

#[async_trait]
pub trait AbstractSocialActivities: Sync + Send {
    /// Append a new activity to the log
    ///
    /// Entries older than the configured retention window are evicted
    /// on the way in, bounding the log.
    async fn insert_activity(&self, activity: &SocialActivity) -> Result<()>;

    /// Fetch the latest activities for an event, newest first
    async fn fetch_activities_for_event(
        &self,
        event_id: &str,
        limit: usize,
    ) -> Result<Vec<SocialActivity>>;

    /// Fetch the latest activities by a user, newest first
    async fn fetch_activities_by_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SocialActivity>>;

    /// Fetch activities for an event strictly newer than the given time, newest first
    async fn fetch_activities_since(
        &self,
        event_id: &str,
        since: Timestamp,
    ) -> Result<Vec<SocialActivity>>;

    /// Count activities for an event within the given window
    async fn count_recent_activities(&self, event_id: &str, window: Duration) -> Result<usize>;
}
