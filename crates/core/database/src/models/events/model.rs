use iso8601_timestamp::Timestamp;
use ulid::Ulid;
use vibepulse_result::Result;

use crate::{Database, User};

auto_derived_partial!(
    /// # Event
    pub struct Event {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Event name
        pub name: String,
        /// Event description
        pub description: String,
        /// When the event takes place
        pub date_time: Timestamp,
        /// Venue description
        pub location: String,
        /// Cover image URL
        #[serde(skip_serializing_if = "Option::is_none")]
        pub image_url: Option<String>,
        /// Category tags
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub tags: Vec<String>,

        /// Id of the hosting user
        pub host_user_id: String,
        /// Display name of the host
        #[serde(skip_serializing_if = "Option::is_none")]
        pub host_name: Option<String>,

        /// Ids of users attending
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub attendee_ids: Vec<String>,
        /// Ids of users marked interested
        ///
        /// A user id appears in at most one of the two membership lists.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub interested_user_ids: Vec<String>,

        /// Aggregated social signal, maintained by buzz recalculation
        #[serde(skip_serializing_if = "Option::is_none")]
        pub social_buzz: Option<SocialBuzz>,
    },
    "PartialEvent"
);

auto_derived!(
    /// Aggregated social signal for an event
    pub struct SocialBuzz {
        /// Number of the viewer's friends attending
        ///
        /// Zero in the stored summary; resolved per viewer on demand.
        pub friends_attending: usize,
        /// Total number of attendees
        pub total_attending: usize,
        /// Trending score, clamped to [0, 10]
        pub trending_score: f64,
    }

    /// A user's RSVP response to an event
    #[serde(rename_all = "snake_case")]
    pub enum RsvpStatus {
        Attending,
        Interested,
        NotAttending,
    }
);

impl Event {
    /// Create a new event
    pub async fn create<D>(
        db: &Database,
        host: &User,
        name: String,
        description: String,
        date_time: Timestamp,
        location: String,
        data: D,
    ) -> Result<Event>
    where
        D: Into<Option<PartialEvent>>,
    {
        let mut event = Event {
            id: Ulid::new().to_string(),
            name,
            description,
            date_time,
            location,
            image_url: None,
            tags: vec![],
            host_user_id: host.id.to_string(),
            host_name: Some(
                host.display_name
                    .clone()
                    .unwrap_or_else(|| host.username.clone()),
            ),
            attendee_ids: vec![],
            interested_user_ids: vec![],
            social_buzz: None,
        };

        if let Some(data) = data.into() {
            event.apply_options(data);
        }

        db.insert_event(&event).await?;
        Ok(event)
    }

    /// Update this event
    pub async fn update(&mut self, db: &Database, partial: PartialEvent) -> Result<()> {
        db.update_event(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Apply a user's RSVP to this event
    ///
    /// The user is removed from both membership lists before being
    /// re-added to the one matching the new status.
    pub async fn rsvp(&mut self, db: &Database, user_id: &str, status: RsvpStatus) -> Result<()> {
        db.rsvp_to_event(&self.id, user_id, status.clone()).await?;

        self.attendee_ids.retain(|id| id != user_id);
        self.interested_user_ids.retain(|id| id != user_id);

        match status {
            RsvpStatus::Attending => self.attendee_ids.push(user_id.to_string()),
            RsvpStatus::Interested => self.interested_user_ids.push(user_id.to_string()),
            RsvpStatus::NotAttending => {}
        }

        Ok(())
    }
}
