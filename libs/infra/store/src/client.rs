//! Connection bootstrap, grounded on `db-turso`'s `TursoClient::connect`:
//! one client, and the URL shape alone picks a local file, a shared
//! in-memory database, or a remote Turso/libSQL endpoint.

use libsql::{Builder, Connection, Database};
use tracing::info;

use crate::errors::StoreError;
use crate::schema::initialize_schema;

pub struct BlockStoreClient {
    database: Database,
}

impl BlockStoreClient {
    /// `database_url` may be `:memory:`, a local file path, or a
    /// `libsql://`/`https://` remote endpoint (in which case `auth_token`
    /// must be set).
    pub async fn connect(database_url: &str, auth_token: Option<&str>) -> Result<Self, StoreError> {
        let database = if database_url == ":memory:" {
            info!(target: "riemann_infra_store", "opening in-memory block store");
            Builder::new_local(":memory:").build().await?
        } else if database_url.starts_with("libsql://") || database_url.starts_with("https://") {
            let token = auth_token
                .ok_or_else(|| StoreError::InvalidArgument("remote database url requires an auth token".into()))?;
            info!(target: "riemann_infra_store", url = %database_url, "opening remote block store");
            Builder::new_remote(database_url.to_string(), token.to_string()).build().await?
        } else {
            info!(target: "riemann_infra_store", path = %database_url, "opening local block store");
            Builder::new_local(database_url).build().await?
        };

        let connection = database.connect()?;
        initialize_schema(&connection).await?;

        Ok(Self { database })
    }

    pub fn connection(&self) -> Result<Connection, StoreError> {
        Ok(self.database.connect()?)
    }
}
