use std::sync::Arc;

use futures::lock::Mutex;
use indexmap::IndexMap;

use crate::{Event, Interest, SocialActivity, User};

database_derived!(
    /// Reference implementation
    ///
    /// Collections keep insertion order so filtered listings and
    /// tie-breaks stay deterministic.
    #[derive(Default)]
    pub struct ReferenceDb {
        pub users: Arc<Mutex<IndexMap<String, User>>>,
        pub events: Arc<Mutex<IndexMap<String, Event>>>,
        pub interests: Arc<Mutex<IndexMap<String, Interest>>>,
        pub social_activities: Arc<Mutex<Vec<SocialActivity>>>,
    }
);
