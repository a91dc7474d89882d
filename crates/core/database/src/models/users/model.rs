use ulid::Ulid;
use vibepulse_result::Result;

use crate::Database;

auto_derived_partial!(
    /// # User
    pub struct User {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Username
        pub username: String,
        /// Display name
        #[serde(skip_serializing_if = "Option::is_none")]
        pub display_name: Option<String>,
        /// Avatar URL
        #[serde(skip_serializing_if = "Option::is_none")]
        pub avatar: Option<String>,

        /// Declared interest tags
        ///
        /// Order is preserved; duplicates carry no meaning.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub interests: Vec<String>,
        /// Ids of events this user has attended
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub attended_event_ids: Vec<String>,
        /// Ids of this user's friends
        ///
        /// Symmetric by convention, not enforced.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub friend_ids: Vec<String>,
    },
    "PartialUser"
);

#[allow(clippy::derivable_impls)]
impl Default for User {
    fn default() -> Self {
        Self {
            id: Default::default(),
            username: Default::default(),
            display_name: Default::default(),
            avatar: Default::default(),
            interests: Default::default(),
            attended_event_ids: Default::default(),
            friend_ids: Default::default(),
        }
    }
}

impl User {
    /// Create a new user
    ///
    /// Callers coming from the frame boundary pass their external id;
    /// otherwise a fresh id is generated.
    pub async fn create<D>(
        db: &Database,
        username: String,
        id: Option<String>,
        data: D,
    ) -> Result<User>
    where
        D: Into<Option<PartialUser>>,
    {
        let mut user = User {
            id: id.unwrap_or_else(|| Ulid::new().to_string()),
            username,
            ..Default::default()
        };

        if let Some(data) = data.into() {
            user.apply_options(data);
        }

        db.insert_user(&user).await?;
        Ok(user)
    }

    /// Update this user's profile
    pub async fn update(&mut self, db: &Database, partial: PartialUser) -> Result<()> {
        db.update_user(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }
}
