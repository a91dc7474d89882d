use iso8601_timestamp::Timestamp;
use vibepulse_result::Result;

use crate::{Event, PartialEvent, RsvpStatus};

mod reference;

auto_derived!(
    /// Filters for listing events
    ///
    /// All filters are optional; the limit applies after filtering.
    #[derive(Default)]
    pub struct EventQuery {
        /// Match events carrying this tag
        pub category: Option<String>,
        /// Case-insensitive substring match on the event location
        pub location: Option<String>,
        /// Earliest event time, inclusive
        pub date_from: Option<Timestamp>,
        /// Latest event time, inclusive
        pub date_to: Option<Timestamp>,
        /// Maximum number of results
        pub limit: Option<usize>,
    }
);

#[async_trait]
pub trait AbstractEvents: Sync + Send {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()>;

    /// Fetch an event from the database
    async fn fetch_event(&self, id: &str) -> Result<Event>;

    /// Fetch all events matching the given query, in insertion order
    async fn fetch_events<'a>(&self, query: &'a EventQuery) -> Result<Vec<Event>>;

    /// Update an event's information
    async fn update_event(&self, id: &str, partial: &PartialEvent) -> Result<()>;

    /// Apply a user's RSVP to an event
    ///
    /// The user is cleared from both membership lists before being
    /// re-added per the new status. Unknown users are not validated.
    async fn rsvp_to_event(&self, event_id: &str, user_id: &str, status: RsvpStatus)
        -> Result<()>;
}
