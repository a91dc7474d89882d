use vibepulse_result::Result;

use crate::ReferenceDb;
use crate::{Event, PartialEvent, RsvpStatus};

use super::{AbstractEvents, EventQuery};

#[async_trait]
impl AbstractEvents for ReferenceDb {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.lock().await;
        if events.contains_key(&event.id) {
            Err(create_database_error!("insert", "event"))
        } else {
            events.insert(event.id.clone(), event.clone());
            Ok(())
        }
    }

    /// Fetch an event from the database
    async fn fetch_event(&self, id: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all events matching the given query, in insertion order
    async fn fetch_events<'a>(&self, query: &'a EventQuery) -> Result<Vec<Event>> {
        let events = self.events.lock().await;
        let mut results: Vec<Event> = events.values().cloned().collect();

        if let Some(category) = &query.category {
            results.retain(|event| event.tags.iter().any(|tag| tag == category));
        }

        if let Some(location) = &query.location {
            let location = location.to_lowercase();
            results.retain(|event| event.location.to_lowercase().contains(&location));
        }

        if let Some(from) = &query.date_from {
            results.retain(|event| *event.date_time >= **from);
        }

        if let Some(to) = &query.date_to {
            results.retain(|event| *event.date_time <= **to);
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    /// Update an event's information
    async fn update_event(&self, id: &str, partial: &PartialEvent) -> Result<()> {
        let mut events = self.events.lock().await;
        if let Some(event) = events.get_mut(id) {
            event.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Apply a user's RSVP to an event
    async fn rsvp_to_event(
        &self,
        event_id: &str,
        user_id: &str,
        status: RsvpStatus,
    ) -> Result<()> {
        let mut events = self.events.lock().await;
        let event = events
            .get_mut(event_id)
            .ok_or_else(|| create_error!(UnknownEvent))?;

        event.attendee_ids.retain(|id| id != user_id);
        event.interested_user_ids.retain(|id| id != user_id);

        match status {
            RsvpStatus::Attending => event.attendee_ids.push(user_id.to_string()),
            RsvpStatus::Interested => event.interested_user_ids.push(user_id.to_string()),
            RsvpStatus::NotAttending => {}
        }

        Ok(())
    }
}
