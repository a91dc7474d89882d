use iso8601_timestamp::{Duration, Timestamp};
use vibepulse_config::config;
use vibepulse_result::Result;

use crate::ReferenceDb;
use crate::SocialActivity;

use super::AbstractSocialActivities;

fn newest_first(mut activities: Vec<SocialActivity>) -> Vec<SocialActivity> {
    activities.sort_by(|a, b| (*b.timestamp).cmp(&*a.timestamp));
    activities
}

#[async_trait]
impl AbstractSocialActivities for ReferenceDb {
    /// Append a new activity to the log
    async fn insert_activity(&self, activity: &SocialActivity) -> Result<()> {
        let retention = Duration::hours(config().await.features.social.activity_retention_hours);
        let cutoff = Timestamp::now_utc()
            .checked_sub(retention)
            .unwrap_or(Timestamp::UNIX_EPOCH);

        let mut activities = self.social_activities.lock().await;
        activities.retain(|entry| *entry.timestamp > *cutoff);
        activities.push(activity.clone());
        Ok(())
    }

    /// Fetch the latest activities for an event, newest first
    async fn fetch_activities_for_event(
        &self,
        event_id: &str,
        limit: usize,
    ) -> Result<Vec<SocialActivity>> {
        let activities = self.social_activities.lock().await;
        let mut results = newest_first(
            activities
                .iter()
                .filter(|activity| activity.event_id == event_id)
                .cloned()
                .collect(),
        );
        results.truncate(limit);
        Ok(results)
    }

    /// Fetch the latest activities by a user, newest first
    async fn fetch_activities_by_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SocialActivity>> {
        let activities = self.social_activities.lock().await;
        let mut results = newest_first(
            activities
                .iter()
                .filter(|activity| activity.user_id == user_id)
                .cloned()
                .collect(),
        );
        results.truncate(limit);
        Ok(results)
    }

    /// Fetch activities for an event strictly newer than the given time, newest first
    async fn fetch_activities_since(
        &self,
        event_id: &str,
        since: Timestamp,
    ) -> Result<Vec<SocialActivity>> {
        let activities = self.social_activities.lock().await;
        Ok(newest_first(
            activities
                .iter()
                .filter(|activity| {
                    activity.event_id == event_id && *activity.timestamp > *since
                })
                .cloned()
                .collect(),
        ))
    }

    /// Count activities for an event within the given window
    async fn count_recent_activities(&self, event_id: &str, window: Duration) -> Result<usize> {
        let cutoff = Timestamp::now_utc()
            .checked_sub(window)
            .unwrap_or(Timestamp::UNIX_EPOCH);

        let activities = self.social_activities.lock().await;
        Ok(activities
            .iter()
            .filter(|activity| activity.event_id == event_id && *activity.timestamp > *cutoff)
            .count())
    }
}
