use sqlx::Row;

use shopwise_core::domain::session::{SessionId, SessionProfile};

use super::{RepositoryError, SessionRepository};
use crate::DbPool;

pub struct SqlSessionRepository {
    pool: DbPool,
}

impl SqlSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn find(&self, id: &SessionId) -> Result<Option<SessionProfile>, RepositoryError> {
        let row = sqlx::query("SELECT profile_json FROM session_profile WHERE session_id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let json: String = row
                    .try_get("profile_json")
                    .map_err(|e| RepositoryError::Decode(e.to_string()))?;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, profile: SessionProfile) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(&profile)?;

        sqlx::query(
            "INSERT INTO session_profile (session_id, profile_json, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(session_id) DO UPDATE SET
                 profile_json = excluded.profile_json,
                 updated_at = excluded.updated_at",
        )
        .bind(profile.session_id.as_str())
        .bind(json)
        .bind(profile.started_at)
        .bind(profile.last_interaction_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM session_profile WHERE session_id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use shopwise_core::catalog::Catalog;
    use shopwise_core::domain::product::CategoryId;
    use shopwise_core::domain::session::{BehaviorEvent, SessionId, SessionProfile};
    use shopwise_core::learner::track_event;

    use super::SqlSessionRepository;
    use crate::repositories::SessionRepository;
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn learned_profile_survives_a_round_trip() {
        let repo = SqlSessionRepository::new(setup().await);
        let catalog = Catalog::seeded();
        let id = SessionId("S-1".to_string());
        let profile = track_event(
            &SessionProfile::empty(id.clone(), 1_000),
            &BehaviorEvent::view("elec-001", 2_000),
            &catalog,
        );

        repo.save(profile.clone()).await.expect("save");
        let found = repo.find(&id).await.expect("find").expect("should exist");

        assert_eq!(found, profile);
        assert_eq!(found.category_views(CategoryId::Electronics), 1);
    }

    #[tokio::test]
    async fn save_upserts_and_delete_reports_presence() {
        let repo = SqlSessionRepository::new(setup().await);
        let id = SessionId("S-2".to_string());
        let mut profile = SessionProfile::empty(id.clone(), 10);

        repo.save(profile.clone()).await.expect("save");
        profile.interaction_count = 7;
        profile.last_interaction_at = 20;
        repo.save(profile).await.expect("upsert");

        let found = repo.find(&id).await.expect("find").expect("should exist");
        assert_eq!(found.interaction_count, 7);

        assert!(repo.delete(&id).await.expect("delete"));
        assert!(!repo.delete(&id).await.expect("second delete"));
        assert!(repo.find(&id).await.expect("find").is_none());
    }
}
