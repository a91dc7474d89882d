use vibepulse_result::Result;

use crate::Database;

auto_derived!(
    /// # Interest
    ///
    /// Static reference entry users pick their interest tags from.
    pub struct Interest {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Display name
        pub name: String,
        /// Grouping category
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }
);

impl Interest {
    /// Create a new interest entry
    pub async fn create(
        db: &Database,
        id: String,
        name: String,
        category: Option<String>,
    ) -> Result<Interest> {
        let interest = Interest { id, name, category };
        db.insert_interest(&interest).await?;
        Ok(interest)
    }
}
