#[macro_use]
extern crate log;

use iso8601_timestamp::{Duration, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vibepulse_config::config;
use vibepulse_database::{
    ActivityKind, Database, Event, PartialEvent, SocialActivity, SocialBuzz, User,
};
use vibepulse_result::Result;

/// Relationship of a connection to the viewing user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Friend,
}

/// Lightweight view of a user connected to an event
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SocialConnection {
    /// Id of the connected user
    pub user_id: String,
    /// Username
    pub username: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Relationship to the viewer
    pub relationship: Relationship,
}

impl SocialConnection {
    fn from_friend(user: User) -> SocialConnection {
        SocialConnection {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            avatar: user.avatar,
            relationship: Relationship::Friend,
        }
    }
}

/// Friend-relative views of events, the activity log and the trending
/// signal derived from it
#[derive(Clone)]
pub struct SocialGraph {
    db: Database,
}

impl SocialGraph {
    /// Create a new accessor over the given database
    pub fn new(db: Database) -> SocialGraph {
        SocialGraph { db }
    }

    /// Friends of `user` attending `event`, in attendee-list order
    pub async fn friends_attending(
        &self,
        event: &Event,
        user: &User,
    ) -> Result<Vec<SocialConnection>> {
        self.resolve_friends(&event.attendee_ids, user).await
    }

    /// Friends of `user` marked interested in `event`, in list order
    pub async fn friends_interested(
        &self,
        event: &Event,
        user: &User,
    ) -> Result<Vec<SocialConnection>> {
        self.resolve_friends(&event.interested_user_ids, user).await
    }

    /// Friends of `user` attending or interested in `event`
    ///
    /// The user's own id never appears in the result.
    pub async fn mutual_friends(
        &self,
        event: &Event,
        user: &User,
    ) -> Result<Vec<SocialConnection>> {
        let mut member_ids = event.attendee_ids.clone();
        member_ids.extend(event.interested_user_ids.iter().cloned());
        member_ids.retain(|id| id != &user.id);

        self.resolve_friends(&member_ids, user).await
    }

    async fn resolve_friends(
        &self,
        member_ids: &[String],
        user: &User,
    ) -> Result<Vec<SocialConnection>> {
        let friend_ids: Vec<String> = member_ids
            .iter()
            .filter(|&id| user.friend_ids.contains(id))
            .cloned()
            .collect();

        Ok(self
            .db
            .fetch_users(&friend_ids)
            .await?
            .into_iter()
            .map(SocialConnection::from_friend)
            .collect())
    }

    /// Record a social activity and refresh the event's buzz
    pub async fn record_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        event_id: &str,
        metadata: Option<Value>,
    ) -> Result<SocialActivity> {
        let activity = SocialActivity::new(
            kind,
            user_id.to_string(),
            event_id.to_string(),
            metadata,
        );

        self.db.insert_activity(&activity).await?;
        self.recalculate_buzz(event_id).await?;
        Ok(activity)
    }

    /// Recompute an event's stored buzz summary
    ///
    /// Trending is 0.1 per recent activity, 0.2 per attendee and 0.1
    /// per interested user, clamped to 10. Unknown events are a no-op.
    pub async fn recalculate_buzz(&self, event_id: &str) -> Result<()> {
        let event = match self.db.fetch_event(event_id).await {
            Ok(event) => event,
            Err(_) => return Ok(()),
        };

        let recent = self
            .db
            .count_recent_activities(event_id, trending_window().await)
            .await?;

        let trending_score = (recent as f64 * 0.1
            + event.attendee_ids.len() as f64 * 0.2
            + event.interested_user_ids.len() as f64 * 0.1)
            .min(10.0);

        self.db
            .update_event(
                event_id,
                &PartialEvent {
                    social_buzz: Some(SocialBuzz {
                        // Resolved per viewer on demand
                        friends_attending: 0,
                        total_attending: event.attendee_ids.len(),
                        trending_score,
                    }),
                    ..Default::default()
                },
            )
            .await?;

        info!("Updated social buzz for event {event_id}: {trending_score}");
        Ok(())
    }

    /// Buzz summary as seen by a viewer, computed on demand
    pub async fn social_buzz(&self, event: &Event, viewer: Option<&User>) -> Result<SocialBuzz> {
        let recent = self
            .db
            .count_recent_activities(&event.id, trending_window().await)
            .await?;

        let friends_attending = viewer
            .map(|user| {
                event
                    .attendee_ids
                    .iter()
                    .filter(|&id| user.friend_ids.contains(id))
                    .count()
            })
            .unwrap_or_default();

        Ok(SocialBuzz {
            friends_attending,
            total_attending: event.attendee_ids.len(),
            trending_score: (recent as f64 * 0.5).min(10.0),
        })
    }

    /// Latest activities for an event, newest first
    pub async fn recent_activities(
        &self,
        event_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SocialActivity>> {
        let limit = match limit {
            Some(limit) => limit,
            None => config().await.features.limits.recent_activities,
        };

        self.db.fetch_activities_for_event(event_id, limit).await
    }

    /// Latest activities by a user, newest first
    pub async fn user_activity(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SocialActivity>> {
        let limit = match limit {
            Some(limit) => limit,
            None => config().await.features.limits.user_activities,
        };

        self.db.fetch_activities_by_user(user_id, limit).await
    }

    /// Activities for an event strictly newer than `since`, newest first
    ///
    /// Polling stand-in for push delivery.
    pub async fn poll_for_updates(
        &self,
        event_id: &str,
        since: Timestamp,
    ) -> Result<Vec<SocialActivity>> {
        self.db.fetch_activities_since(event_id, since).await
    }
}

async fn trending_window() -> Duration {
    Duration::minutes(config().await.features.social.trending_window_minutes)
}
