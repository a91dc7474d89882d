mod reference;

pub use self::reference::*;

/// Database information to use to create a client
pub enum DatabaseInfo {
    /// Auto-detect the database in use
    Auto,
    /// Auto-detect the database in use and create an empty testing database
    Test(String),
    /// Use the mock database
    Reference,
}

/// Database
#[derive(Clone)]
pub enum Database {
    /// Mock database
    Reference(ReferenceDb),
}

impl DatabaseInfo {
    /// Create a database client from the given database information
    #[async_recursion]
    pub async fn connect(self) -> Result<Database, String> {
        Ok(match self {
            DatabaseInfo::Auto => {
                if std::env::var("TEST_DB").is_ok() {
                    return DatabaseInfo::Test("vibepulse_test".to_string()).connect().await;
                }

                DatabaseInfo::Reference.connect().await?
            }
            DatabaseInfo::Test(name) => {
                info!("Connected to test database {name}.");
                Database::Reference(ReferenceDb::default())
            }
            DatabaseInfo::Reference => Database::Reference(ReferenceDb::default()),
        })
    }
}
