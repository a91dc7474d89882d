#[macro_use]
extern crate log;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use vibepulse_config::config;
use vibepulse_database::{Database, Event, EventQuery, User};
use vibepulse_result::Result;
use vibepulse_social::{SocialConnection, SocialGraph};

/// Budget for the declared-interest overlap term
const INTEREST_WEIGHT: f64 = 0.4;
/// Contribution of a single attending friend to the social term
const SOCIAL_STEP: f64 = 0.1;
/// Cap on the social term
const SOCIAL_CAP: f64 = 0.3;
/// Flat bonus for users with any attendance history
const HISTORY_WEIGHT: f64 = 0.15;
/// Location term when matched or no preference is given
const LOCATION_MATCH: f64 = 0.1;
/// Location term when a given preference does not match
const LOCATION_MISS: f64 = 0.05;
/// Time-of-day term when matched or no preference is given
const TIME_MATCH: f64 = 0.05;
/// Time-of-day term when a given preference does not match
const TIME_MISS: f64 = 0.025;

/// Threshold a buzz trending score must clear for the trending listing
const TRENDING_FLOOR: f64 = 5.0;
/// Attendance above which an event counts as popular
const POPULAR_ATTENDANCE: usize = 10;
/// Buzz trending score above which an event counts as trending
const TRENDING_REASON_FLOOR: f64 = 7.0;

/// Preferred part of day for events
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 21:59
    Evening,
    /// 22:00 to 05:59
    Night,
}

/// Context a recommendation run is scored against
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecommendationContext {
    /// User being recommended to
    pub user: User,
    /// Preferred location, matched as a case-insensitive substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Preferred part of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<TimePreference>,
    /// Maximum distance in miles
    ///
    /// Reserved; accepted but not yet applied to results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
}

impl RecommendationContext {
    /// Context with no declared preferences
    pub fn for_user(user: User) -> RecommendationContext {
        RecommendationContext {
            user,
            location: None,
            time_preference: None,
            max_distance: None,
        }
    }
}

/// A scored event with its justification
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRecommendation {
    /// The recommended event
    pub event: Event,
    /// Relevance in [0, 1]
    pub score: f64,
    /// Human-readable justifications
    ///
    /// Descriptive only; independent of the score terms.
    pub reasons: Vec<String>,
    /// Friends of the user attending this event
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub friends_attending: Vec<SocialConnection>,
}

/// Ranks stored events for a user under an optional context
#[derive(Clone)]
pub struct RecommendationEngine {
    db: Database,
    social: SocialGraph,
}

impl RecommendationEngine {
    /// Create a new engine over the given database
    pub fn new(db: Database) -> RecommendationEngine {
        RecommendationEngine {
            social: SocialGraph::new(db.clone()),
            db,
        }
    }

    /// Rank all known events for the given context
    ///
    /// Events scoring zero are dropped; the rest sort descending by
    /// score with ties kept in store order, truncated to `limit`.
    pub async fn recommend(
        &self,
        context: &RecommendationContext,
        limit: Option<usize>,
    ) -> Result<Vec<EventRecommendation>> {
        let limit = match limit {
            Some(limit) => limit,
            None => config().await.features.limits.recommendations,
        };

        let events = self.db.fetch_events(&EventQuery::default()).await?;

        let mut recommendations = Vec::new();
        for event in events {
            let score = relevance_score(&event, context);
            if score <= 0.0 {
                continue;
            }

            debug!("Scored event {} at {score:.3}", event.id);

            let reasons = generate_reasons(&event, &context.user);
            let friends_attending = self
                .social
                .friends_attending(&event, &context.user)
                .await?;

            recommendations.push(EventRecommendation {
                event,
                score,
                reasons,
                friends_attending,
            });
        }

        recommendations
            .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        recommendations.truncate(limit);
        Ok(recommendations)
    }

    /// Events currently trending across the network
    ///
    /// Keeps events whose buzz trending score clears the floor, sorted
    /// descending by that score.
    pub async fn trending_events(&self, limit: Option<usize>) -> Result<Vec<Event>> {
        let limit = match limit {
            Some(limit) => limit,
            None => config().await.features.limits.trending_events,
        };

        let mut events: Vec<Event> = self
            .db
            .fetch_events(&EventQuery::default())
            .await?
            .into_iter()
            .filter(|event| buzz_trending_score(event) > TRENDING_FLOOR)
            .collect();

        events.sort_by(|a, b| {
            buzz_trending_score(b)
                .partial_cmp(&buzz_trending_score(a))
                .unwrap_or(Ordering::Equal)
        });
        events.truncate(limit);
        Ok(events)
    }

    /// Events the user's friends are attending or interested in
    ///
    /// Sorted descending by how many of the user's friends are
    /// involved, ties kept in store order.
    pub async fn events_by_friends(&self, user: &User, limit: Option<usize>) -> Result<Vec<Event>> {
        let limit = match limit {
            Some(limit) => limit,
            None => config().await.features.limits.friend_events,
        };

        let mut involved: Vec<(Event, usize)> = self
            .db
            .fetch_events(&EventQuery::default())
            .await?
            .into_iter()
            .filter_map(|event| {
                let friends = friend_involvement(&event, user);
                if friends > 0 {
                    Some((event, friends))
                } else {
                    None
                }
            })
            .collect();

        involved.sort_by(|a, b| b.1.cmp(&a.1));
        involved.truncate(limit);
        Ok(involved.into_iter().map(|(event, _)| event).collect())
    }
}

/// Relevance of an event to the given context, in [0, 1]
///
/// Five independently weighted terms, each pre-scaled into its budget
/// so the sum is naturally bounded.
pub fn relevance_score(event: &Event, context: &RecommendationContext) -> f64 {
    let user = &context.user;
    let mut score = 0.0;

    // Interest overlap
    let overlap = event
        .tags
        .iter()
        .filter(|&tag| user.interests.contains(tag))
        .count();
    score += overlap as f64 / event.tags.len().max(1) as f64 * INTEREST_WEIGHT;

    // Social overlap, capped
    let friends_attending = event
        .attendee_ids
        .iter()
        .filter(|&id| user.friend_ids.contains(id))
        .count();
    let friends_interested = event
        .interested_user_ids
        .iter()
        .filter(|&id| user.friend_ids.contains(id))
        .count();
    score += ((friends_attending as f64 + 0.5 * friends_interested as f64) * SOCIAL_STEP)
        .min(SOCIAL_CAP);

    // Attendance history, presence only
    if !user.attended_event_ids.is_empty() {
        score += HISTORY_WEIGHT;
    }

    // Location
    score += match &context.location {
        Some(location)
            if event
                .location
                .to_lowercase()
                .contains(&location.to_lowercase()) =>
        {
            LOCATION_MATCH
        }
        Some(_) => LOCATION_MISS,
        None => LOCATION_MATCH,
    };

    // Time of day
    score += match &context.time_preference {
        Some(preference) if matches_time_preference(event.date_time.hour(), preference) => {
            TIME_MATCH
        }
        Some(_) => TIME_MISS,
        None => TIME_MATCH,
    };

    score.clamp(0.0, 1.0)
}

/// Human-readable justifications for recommending an event
pub fn generate_reasons(event: &Event, user: &User) -> Vec<String> {
    let mut reasons = Vec::new();

    let matching: Vec<&str> = event
        .tags
        .iter()
        .filter(|&tag| user.interests.contains(tag))
        .map(String::as_str)
        .collect();
    if !matching.is_empty() {
        reasons.push(format!("Matches your interests: {}", matching.join(", ")));
    }

    let friends_attending = event
        .attendee_ids
        .iter()
        .filter(|&id| user.friend_ids.contains(id))
        .count();
    if friends_attending > 0 {
        reasons.push(format!(
            "{} friend{} attending",
            friends_attending,
            if friends_attending > 1 { "s" } else { "" }
        ));
    }

    if let Some(buzz) = &event.social_buzz {
        if buzz.total_attending > POPULAR_ATTENDANCE {
            reasons.push("Popular event with high attendance".to_string());
        }

        if buzz.trending_score > TRENDING_REASON_FLOOR {
            reasons.push("Trending in your network".to_string());
        }
    }

    reasons
}

fn matches_time_preference(hour: u8, preference: &TimePreference) -> bool {
    match preference {
        TimePreference::Morning => (6..12).contains(&hour),
        TimePreference::Afternoon => (12..17).contains(&hour),
        TimePreference::Evening => (17..22).contains(&hour),
        TimePreference::Night => hour >= 22 || hour < 6,
    }
}

fn buzz_trending_score(event: &Event) -> f64 {
    event
        .social_buzz
        .as_ref()
        .map(|buzz| buzz.trending_score)
        .unwrap_or_default()
}

fn friend_involvement(event: &Event, user: &User) -> usize {
    let attending = event
        .attendee_ids
        .iter()
        .filter(|&id| user.friend_ids.contains(id))
        .count();
    let interested = event
        .interested_user_ids
        .iter()
        .filter(|&id| user.friend_ids.contains(id))
        .count();

    attending + interested
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::Timestamp;
    use vibepulse_database::util::fixtures::seed_sample_data;
    use vibepulse_database::{
        Database, DatabaseInfo, Event, PartialEvent, PartialUser, SocialBuzz, User,
    };

    use crate::{
        generate_reasons, relevance_score, RecommendationContext, RecommendationEngine,
        TimePreference,
    };

    async fn test_db(name: &str) -> Database {
        DatabaseInfo::Test(name.to_string())
            .connect()
            .await
            .expect("Database connection failed.")
    }

    fn timestamp(raw: &str) -> Timestamp {
        Timestamp::parse(raw).expect("valid timestamp")
    }

    async fn scoring_scenario(db: &Database) -> (User, Event) {
        let friend = User::create(db, "friend".to_string(), Some("f1".to_string()), None)
            .await
            .unwrap();

        let user = User::create(
            db,
            "taylor".to_string(),
            Some("frame_300".to_string()),
            PartialUser {
                interests: Some(vec!["music".to_string(), "tech".to_string()]),
                friend_ids: Some(vec!["f1".to_string()]),
                attended_event_ids: Some(vec!["event_0".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let event = Event::create(
            db,
            &friend,
            "Vernissage".to_string(),
            String::new(),
            timestamp("2026-09-22T20:00:00Z"),
            "Arts Quarter".to_string(),
            PartialEvent {
                tags: Some(vec!["music".to_string(), "art".to_string()]),
                attendee_ids: Some(vec!["f1".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        (user, event)
    }

    #[async_std::test]
    async fn worked_example_scores_0_60() {
        let db = test_db("reco_worked_example").await;
        let (user, event) = scoring_scenario(&db).await;

        // 0.20 interest + 0.10 social + 0.15 history + 0.10 location
        // default + 0.05 time default
        let score = relevance_score(&event, &RecommendationContext::for_user(user));
        assert!((score - 0.60).abs() < 1e-9);
    }

    #[async_std::test]
    async fn score_stays_within_bounds() {
        let db = test_db("reco_score_bounds").await;
        let (mut user, mut event) = scoring_scenario(&db).await;

        // Saturate every term
        user.interests = event.tags.clone();
        event.attendee_ids = (0..10).map(|n| format!("f{n}")).collect();
        user.friend_ids = event.attendee_ids.clone();

        let score = relevance_score(
            &event,
            &RecommendationContext {
                location: Some("arts".to_string()),
                time_preference: Some(TimePreference::Evening),
                max_distance: None,
                user,
            },
        );
        assert!(score <= 1.0);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[async_std::test]
    async fn preferences_scale_location_and_time_terms() {
        let db = test_db("reco_preferences").await;
        let (user, event) = scoring_scenario(&db).await;

        // Event is 20:00 in the Arts Quarter; prefer mornings elsewhere
        let mismatched = relevance_score(
            &event,
            &RecommendationContext {
                location: Some("harbor".to_string()),
                time_preference: Some(TimePreference::Morning),
                max_distance: None,
                user: user.clone(),
            },
        );
        // 0.20 + 0.10 + 0.15 + 0.05 location miss + 0.025 time miss
        assert!((mismatched - 0.525).abs() < 1e-9);

        let matched = relevance_score(
            &event,
            &RecommendationContext {
                location: Some("ARTS quarter".to_string()),
                time_preference: Some(TimePreference::Evening),
                max_distance: None,
                user,
            },
        );
        assert!((matched - 0.60).abs() < 1e-9);
    }

    #[async_std::test]
    async fn night_preference_wraps_midnight() {
        let db = test_db("reco_night_wrap").await;
        let (user, mut event) = scoring_scenario(&db).await;

        let context = RecommendationContext {
            time_preference: Some(TimePreference::Night),
            location: None,
            max_distance: None,
            user,
        };

        event.date_time = timestamp("2026-09-23T23:30:00Z");
        let late = relevance_score(&event, &context);

        event.date_time = timestamp("2026-09-23T03:00:00Z");
        let small_hours = relevance_score(&event, &context);

        event.date_time = timestamp("2026-09-23T06:00:00Z");
        let morning = relevance_score(&event, &context);

        assert!((late - small_hours).abs() < 1e-9);
        assert!(late > morning);
    }

    #[async_std::test]
    async fn recommendations_are_ranked_and_limited() {
        let db = test_db("reco_ranking").await;
        let ids = seed_sample_data(&db).await;
        let engine = RecommendationEngine::new(db.clone());

        let alice = db.fetch_user("frame_123").await.unwrap();
        let context = RecommendationContext::for_user(alice);

        let recommendations = engine.recommend(&context, None).await.unwrap();
        assert!(!recommendations.is_empty());
        for pair in recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        // Jazz leads: full friend attendance plus an interest match
        assert_eq!(recommendations[0].event.id, ids["1"]);
        assert_eq!(recommendations[0].friends_attending.len(), 2);

        let limited = engine.recommend(&context, Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].event.id, ids["1"]);
    }

    #[async_std::test]
    async fn tied_scores_keep_store_order() {
        let db = test_db("reco_stable_ties").await;
        let host = User::create(&db, "venue".to_string(), Some("host_1".to_string()), None)
            .await
            .unwrap();
        let user = User::create(&db, "sam".to_string(), Some("frame_301".to_string()), None)
            .await
            .unwrap();

        let mut created = Vec::new();
        for name in ["First", "Second", "Third"] {
            created.push(
                Event::create(
                    &db,
                    &host,
                    name.to_string(),
                    String::new(),
                    timestamp("2026-09-23T12:00:00Z"),
                    "Midtown".to_string(),
                    None,
                )
                .await
                .unwrap(),
            );
        }

        let engine = RecommendationEngine::new(db);
        let recommendations = engine
            .recommend(&RecommendationContext::for_user(user), None)
            .await
            .unwrap();

        assert_eq!(
            recommendations
                .iter()
                .map(|recommendation| recommendation.event.name.as_str())
                .collect::<Vec<_>>(),
            vec!["First", "Second", "Third"]
        );
    }

    #[async_std::test]
    async fn reasons_describe_the_event() {
        let db = test_db("reco_reasons").await;
        let (user, mut event) = scoring_scenario(&db).await;

        event.social_buzz = Some(SocialBuzz {
            friends_attending: 0,
            total_attending: 45,
            trending_score: 8.5,
        });

        let reasons = generate_reasons(&event, &user);
        assert_eq!(
            reasons,
            vec![
                "Matches your interests: music",
                "1 friend attending",
                "Popular event with high attendance",
                "Trending in your network",
            ]
        );

        // Pluralisation kicks in past one friend
        event.attendee_ids.push("f2".to_string());
        let mut user = user;
        user.friend_ids.push("f2".to_string());
        let reasons = generate_reasons(&event, &user);
        assert!(reasons.contains(&"2 friends attending".to_string()));
    }

    #[async_std::test]
    async fn trending_listing_filters_and_sorts() {
        let db = test_db("reco_trending").await;
        let ids = seed_sample_data(&db).await;
        let engine = RecommendationEngine::new(db.clone());

        // Drop the gallery below the floor
        db.update_event(
            &ids["3"],
            &PartialEvent {
                social_buzz: Some(SocialBuzz {
                    friends_attending: 0,
                    total_attending: 28,
                    trending_score: 4.0,
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let trending = engine.trending_events(None).await.unwrap();
        assert_eq!(
            trending
                .iter()
                .map(|event| event.id.as_str())
                .collect::<Vec<_>>(),
            vec![ids["1"].as_str(), ids["2"].as_str()]
        );

        let limited = engine.trending_events(Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, ids["1"]);
    }

    #[async_std::test]
    async fn friend_listing_requires_involvement() {
        let db = test_db("reco_friend_listing").await;
        let ids = seed_sample_data(&db).await;
        let engine = RecommendationEngine::new(db.clone());

        let alice = db.fetch_user("frame_123").await.unwrap();

        // Every sample event involves two of alice's friends; ties keep
        // store order
        let by_friends = engine.events_by_friends(&alice, None).await.unwrap();
        assert_eq!(
            by_friends
                .iter()
                .map(|event| event.id.as_str())
                .collect::<Vec<_>>(),
            vec![ids["1"].as_str(), ids["2"].as_str(), ids["3"].as_str()]
        );

        // A user without friends sees nothing
        let loner = User::create(&db, "lee".to_string(), Some("frame_302".to_string()), None)
            .await
            .unwrap();
        assert!(engine.events_by_friends(&loner, None).await.unwrap().is_empty());
    }
}
