use iso8601_timestamp::Timestamp;
use ulid::Ulid;

auto_derived!(
    /// Kind of recorded social activity
    #[serde(rename_all = "snake_case")]
    pub enum ActivityKind {
        Rsvp,
        Interest,
        Comment,
        Share,
    }

    /// Entry in the social activity log
    ///
    /// Entries are append-only; the store evicts them past the
    /// configured retention window.
    pub struct SocialActivity {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Kind of activity
        #[serde(rename = "type")]
        pub kind: ActivityKind,
        /// Id of the acting user
        pub user_id: String,
        /// Id of the event acted upon
        pub event_id: String,
        /// When this activity was recorded
        pub timestamp: Timestamp,
        /// Arbitrary activity payload
        #[serde(skip_serializing_if = "Option::is_none")]
        pub metadata: Option<serde_json::Value>,
    }
);

impl SocialActivity {
    /// Create a new activity entry stamped with the current time
    pub fn new(
        kind: ActivityKind,
        user_id: String,
        event_id: String,
        metadata: Option<serde_json::Value>,
    ) -> SocialActivity {
        SocialActivity {
            id: Ulid::new().to_string(),
            kind,
            user_id,
            event_id,
            timestamp: Timestamp::now_utc(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::{Duration, Timestamp};

    use crate::{ActivityKind, SocialActivity};

    fn activity_at(event_id: &str, offset: Duration) -> SocialActivity {
        SocialActivity {
            timestamp: Timestamp::now_utc()
                .checked_add(offset)
                .expect("valid timestamp"),
            ..SocialActivity::new(
                ActivityKind::Rsvp,
                "frame_123".to_string(),
                event_id.to_string(),
                None,
            )
        }
    }

    #[async_std::test]
    async fn listings_are_newest_first() {
        database_test!(|db| async move {
            let oldest = activity_at("event_1", Duration::minutes(-30));
            let newer = activity_at("event_1", Duration::minutes(-10));
            let newest = activity_at("event_1", Duration::minutes(-1));
            let elsewhere = activity_at("event_2", Duration::minutes(-5));

            for activity in [&oldest, &newer, &newest, &elsewhere] {
                db.insert_activity(activity).await.unwrap();
            }

            let listed = db.fetch_activities_for_event("event_1", 10).await.unwrap();
            assert_eq!(
                listed,
                vec![newest.clone(), newer.clone(), oldest.clone()]
            );

            let limited = db.fetch_activities_for_event("event_1", 2).await.unwrap();
            assert_eq!(limited, vec![newest.clone(), newer.clone()]);

            let by_user = db.fetch_activities_by_user("frame_123", 10).await.unwrap();
            assert_eq!(by_user.len(), 4);
            assert_eq!(by_user[0], newest);
        });
    }

    #[async_std::test]
    async fn since_filter_is_strict() {
        database_test!(|db| async move {
            let before = activity_at("event_1", Duration::minutes(-20));
            let exact = activity_at("event_1", Duration::minutes(-10));
            let after = activity_at("event_1", Duration::minutes(-5));

            for activity in [&before, &exact, &after] {
                db.insert_activity(activity).await.unwrap();
            }

            let since = db
                .fetch_activities_since("event_1", exact.timestamp)
                .await
                .unwrap();
            assert_eq!(since, vec![after]);
        });
    }

    #[async_std::test]
    async fn recent_count_honours_window() {
        database_test!(|db| async move {
            let stale = activity_at("event_1", Duration::hours(-2));
            let fresh = activity_at("event_1", Duration::minutes(-10));

            db.insert_activity(&stale).await.unwrap();
            db.insert_activity(&fresh).await.unwrap();

            let count = db
                .count_recent_activities("event_1", Duration::hours(1))
                .await
                .unwrap();
            assert_eq!(count, 1);
        });
    }

    #[async_std::test]
    async fn retention_evicts_old_entries() {
        database_test!(|db| async move {
            // Default retention is 24 hours
            let expired = activity_at("event_1", Duration::hours(-25));
            let recent = activity_at("event_1", Duration::minutes(-5));

            db.insert_activity(&expired).await.unwrap();
            db.insert_activity(&recent).await.unwrap();

            let listed = db.fetch_activities_for_event("event_1", 10).await.unwrap();
            assert_eq!(listed, vec![recent]);
        });
    }
}
