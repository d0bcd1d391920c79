use async_trait::async_trait;
use log::{debug, info};
use sqlx::{migrate::MigrateDatabase, sqlite::{SqlitePool, SqlitePoolOptions}, Sqlite, Row};

use crate::db::PartyDirectory;
use crate::error::Result;
use crate::models::{Party, PartyDirectoryMap, PartyInfo, PartyStatus};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(db_url: &str, max_connections: u32) -> Result<Self> {
        // In-memory databases have nothing to create on disk
        if !db_url.contains(":memory:") && !Sqlite::database_exists(db_url).await? {
            info!("Creating database at {}", db_url);
            Sqlite::create_database(db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await?;

        Self::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS partido_politico (
                id_partido TEXT PRIMARY KEY,
                nombre TEXT NOT NULL,
                sigla TEXT NOT NULL,
                estado TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // Upsert a party row; the seeding process owns this table in production
    pub async fn save_party(&self, party: &Party) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO partido_politico (id_partido, nombre, sigla, estado)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id_partido)
            DO UPDATE SET nombre = excluded.nombre, sigla = excluded.sigla, estado = excluded.estado
            "#,
        )
        .bind(&party.id)
        .bind(&party.name)
        .bind(&party.abbreviation)
        .bind(party.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PartyDirectory for Database {
    async fn active_parties(&self) -> Result<PartyDirectoryMap> {
        let rows = sqlx::query(
            r#"
            SELECT id_partido, nombre, sigla
            FROM partido_politico
            WHERE estado = ?
            "#,
        )
        .bind(PartyStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;

        let parties: PartyDirectoryMap = rows
            .into_iter()
            .map(|row| {
                (
                    row.get::<String, _>("id_partido"),
                    PartyInfo {
                        name: row.get::<String, _>("nombre"),
                        abbreviation: row.get::<String, _>("sigla"),
                    },
                )
            })
            .collect();

        debug!("Loaded {} active parties", parties.len());
        Ok(parties)
    }
}
