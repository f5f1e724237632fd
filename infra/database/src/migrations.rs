use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Schema for the scoreboard slice: one `match` table holding both team
/// names and the running scores.
const SCOREBOARD_SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS match SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS team1_name ON match TYPE string DEFAULT 'Team1';
    DEFINE FIELD IF NOT EXISTS team2_name ON match TYPE string DEFAULT 'Team2';
    DEFINE FIELD IF NOT EXISTS team1_score ON match TYPE int DEFAULT 0 ASSERT $value >= 0;
    DEFINE FIELD IF NOT EXISTS team2_score ON match TYPE int DEFAULT 0 ASSERT $value >= 0;
";

/// Bookkeeping table for applied migrations.
const MIGRATION_TABLE: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS checksum ON migration TYPE string;
    DEFINE INDEX IF NOT EXISTS migration_version ON migration FIELDS version UNIQUE;
";

#[derive(Debug)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    fn checksum(&self) -> String {
        format!("{:016x}", fxhash::hash64(self.script))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration { version: self.version.to_owned(), checksum: self.checksum() }
    }
}

/// The built-in migration set, applied in order on every startup.
pub(crate) const fn builtin_migrations() -> &'static [Migration] {
    &[Migration { version: "0001_scoreboard_schema", script: SCOREBOARD_SCHEMA }]
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();

        self.db.query(MIGRATION_TABLE).await.context("Preparing migration bookkeeping")?;

        let applied_migrations = self.get_migrations_map().await?;

        for migration in builtin_migrations() {
            if let Some(applied) = applied_migrations.get(migration.version) {
                ensure_checksum_match(migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration SET version = $version, checksum = $checksum;
            COMMIT TRANSACTION;",
            migration.script,
        );

        let _ = self
            .db
            .query(&query)
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}", migration.version))?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migrations map")?;

        Ok(entries.into_iter().map(|entry| (entry.version.clone(), entry)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (expected {expected}, got {existing})",
                migration.version
            )
            .into(),
            context: Some("Migration already applied with different checksum".into()),
        });
    }
    Ok(())
}
