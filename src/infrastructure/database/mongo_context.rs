use std::error::Error;
use serde::{Deserialize, Serialize};
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use regex::Regex;

pub type ContextError = Box<dyn Error + Send + Sync>;

#[derive(Clone, Debug)]
pub struct MongoContext {
    client: Client,
    db: Database
}

impl MongoContext {

    /// Connects to `uri`, pings the server and selects `db_name`.
    pub async fn init(uri: &str, db_name: &str, app_name: &str) -> Result<MongoContext, ContextError> {
        Self::validate_mongo_uri(uri)?;

        log::info!("connecting to MongoDB database '{}'", db_name);

        let mut options = ClientOptions::parse(uri.trim()).await?;
        options.app_name = Some(app_name.to_string());

        let client = Client::with_options(options)?;

        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| format!("Failed to connect to MongoDB: {}", e))?;

        log::info!("connected to MongoDB database '{}'", db_name);

        Ok(MongoContext { client, db })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    /// Rejects URIs the driver would fail on late or with an unclear message.
    fn validate_mongo_uri(uri: &str) -> Result<(), ContextError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err("Invalid MongoDB URI: cannot be empty or whitespace".into());
        }

        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(format!("Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'. Got: {}", uri).into());
        }

        let pattern = Regex::new(r"^mongodb(\+srv)?://[^/\s]+(/\S*)?$")?;
        if !pattern.is_match(uri) {
            return Err(format!("Invalid MongoDB URI: expected mongodb://host[:port][/database]. Got: {}", uri).into());
        }

        Ok(())
    }
}
