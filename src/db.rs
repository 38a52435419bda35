// connexion BD

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::AppConfig;

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    if let Some(max) = config.db_max_connections {
        options.max_connections(max);
    }
    options.sqlx_logging(false);

    Database::connect(options).await
}
