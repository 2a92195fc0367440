use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use testcontainers_modules::{postgres, testcontainers};

const DB_NAME: &str = "taskman_test";

/// Starts a throwaway postgres container with a dedicated test database and
/// returns it alongside a migrated connection. The container must be kept
/// alive for as long as the connection is used.
pub async fn start_postgres() -> anyhow::Result<(
    testcontainers::ContainerAsync<postgres::Postgres>,
    DatabaseConnection,
)> {
    let container = postgres::Postgres::default()
        .with_db_name(DB_NAME)
        .start()
        .await?;
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;
    let db_url = format!("postgres://postgres:postgres@{host}:{port}/{DB_NAME}");
    let db = Database::connect(&db_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((container, db))
}
