use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::from_str;

use crate::{Database, Event, Interest, User};

static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new("__ID:(\\d+)__").unwrap());

/// Stock demo network: interests, a few users and their events
pub static SAMPLE_NETWORK: &str = r#"[
    { "_object_type": "Interest", "_id": "music", "name": "Music & Concerts" },
    { "_object_type": "Interest", "_id": "tech", "name": "Technology & AI" },
    { "_object_type": "Interest", "_id": "art", "name": "Art & Culture" },
    { "_object_type": "Interest", "_id": "sports", "name": "Sports & Fitness" },
    { "_object_type": "Interest", "_id": "food", "name": "Food & Dining" },
    { "_object_type": "Interest", "_id": "social", "name": "Social & Networking" },
    {
        "_object_type": "User",
        "_id": "frame_123",
        "username": "alice",
        "display_name": "Alice Chen",
        "interests": ["music", "tech", "art"],
        "attended_event_ids": ["__ID:1__"],
        "friend_ids": ["frame_124", "frame_125"]
    },
    {
        "_object_type": "User",
        "_id": "frame_124",
        "username": "bob",
        "display_name": "Bob Smith",
        "interests": ["tech", "sports"],
        "attended_event_ids": ["__ID:2__"],
        "friend_ids": ["frame_123", "frame_125"]
    },
    {
        "_object_type": "User",
        "_id": "frame_125",
        "username": "carol",
        "display_name": "Carol Reyes",
        "interests": ["music", "art", "food"],
        "friend_ids": ["frame_123", "frame_124"]
    },
    {
        "_object_type": "Event",
        "_id": "__ID:1__",
        "name": "Rooftop Jazz & Cocktails",
        "description": "Smooth jazz vibes with craft cocktails overlooking the city skyline.",
        "date_time": "2026-09-20T19:00:00Z",
        "location": "Sky Lounge, Downtown",
        "tags": ["music", "nightlife", "jazz"],
        "host_user_id": "host_1",
        "host_name": "Sky Lounge",
        "attendee_ids": ["frame_124", "frame_125"],
        "interested_user_ids": [],
        "social_buzz": {
            "friends_attending": 0,
            "total_attending": 45,
            "trending_score": 8.5
        }
    },
    {
        "_object_type": "Event",
        "_id": "__ID:2__",
        "name": "Tech Startup Mixer",
        "description": "Network with fellow entrepreneurs and tech enthusiasts.",
        "date_time": "2026-09-21T18:30:00Z",
        "location": "Innovation Hub, Tech District",
        "tags": ["tech", "networking", "startup"],
        "host_user_id": "host_2",
        "host_name": "Innovation Hub",
        "attendee_ids": ["frame_125"],
        "interested_user_ids": ["frame_124"],
        "social_buzz": {
            "friends_attending": 0,
            "total_attending": 32,
            "trending_score": 7.2
        }
    },
    {
        "_object_type": "Event",
        "_id": "__ID:3__",
        "name": "Underground Art Gallery Opening",
        "description": "Discover emerging artists in an intimate gallery setting.",
        "date_time": "2026-09-22T20:00:00Z",
        "location": "The Vault Gallery, Arts Quarter",
        "tags": ["art", "gallery", "culture"],
        "host_user_id": "host_3",
        "host_name": "The Vault Gallery",
        "attendee_ids": ["frame_124"],
        "interested_user_ids": ["frame_125"],
        "social_buzz": {
            "friends_attending": 0,
            "total_attending": 28,
            "trending_score": 6.8
        }
    }
]"#;

#[derive(Debug, Deserialize)]
#[serde(tag = "_object_type")]
enum LoadedFixture {
    User(User),
    Event(Event),
    Interest(Interest),
}

/// Load a JSON fixture into the database
///
/// `__ID:n__` placeholders are substituted with fresh ulids; the
/// mapping is returned for ease of use.
pub async fn load_fixture(db: &Database, input: &str) -> HashMap<String, String> {
    let mut ids = HashMap::<String, String>::new();
    let input = RE_ID.replace_all(input, |cap: &Captures| {
        let d = cap.get(1).unwrap().as_str();

        if !ids.contains_key(d) {
            ids.insert(d.to_string(), ulid::Ulid::new().to_string());
        }

        ids.get(d).unwrap().clone()
    });

    // Deserialise the fixtures
    let items: Vec<LoadedFixture> = from_str(&input).expect("Failed to deserialise fixture");

    // Load all of the items within
    for item in items {
        match item {
            LoadedFixture::User(user) => db.insert_user(&user).await.unwrap(),
            LoadedFixture::Event(event) => db.insert_event(&event).await.unwrap(),
            LoadedFixture::Interest(interest) => db.insert_interest(&interest).await.unwrap(),
        }
    }

    // Return IDs for ease of use
    ids
}

/// Seed the stock demo network
pub async fn seed_sample_data(db: &Database) -> HashMap<String, String> {
    load_fixture(db, SAMPLE_NETWORK).await
}

#[cfg(test)]
mod tests {
    use super::seed_sample_data;

    #[async_std::test]
    async fn sample_network_loads() {
        database_test!(|db| async move {
            let ids = seed_sample_data(&db).await;

            let alice = db.fetch_user("frame_123").await.unwrap();
            assert_eq!(alice.attended_event_ids, vec![ids["1"].clone()]);

            let jazz = db.fetch_event(&ids["1"]).await.unwrap();
            assert_eq!(jazz.attendee_ids, vec!["frame_124", "frame_125"]);

            assert_eq!(db.fetch_interests().await.unwrap().len(), 6);
        });
    }
}
