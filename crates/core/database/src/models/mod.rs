mod events;
mod interests;
mod migrations;
mod social_activities;
mod users;

pub use events::*;
pub use interests::*;
pub use migrations::*;
pub use social_activities::*;
pub use users::*;

use crate::{Database, ReferenceDb};

pub trait AbstractDatabase:
    Sync
    + Send
    + events::AbstractEvents
    + interests::AbstractInterests
    + migrations::AbstractMigrations
    + social_activities::AbstractSocialActivities
    + users::AbstractUsers
{
}

impl AbstractDatabase for ReferenceDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
        }
    }
}
