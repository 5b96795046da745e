//! SQLite implementation of the `LlmConfigRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use chatgate_core::domain::llm_config::{LlmConfig, NewLlmConfig};
use chatgate_core::ports::llm_config::{LlmConfigError, LlmConfigRepository};

/// SQLite implementation of the `LlmConfigRepository` trait.
pub struct SqliteLlmConfigRepository {
    pool: SqlitePool,
}

impl SqliteLlmConfigRepository {
    /// Create a new SQLite preset repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_config_row(row: &sqlx::sqlite::SqliteRow) -> LlmConfig {
    LlmConfig {
        id: row.get("id"),
        name: row.get("name"),
        model_name: row.get("model_name"),
        system_prompt: row.get("system_prompt"),
        temperature: row.get("temperature"),
        max_tokens: row.get("max_tokens"),
        top_p: row.get("top_p"),
        is_default: row.get::<i64, _>("is_default") != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_COLUMNS: &str = "id, name, model_name, system_prompt, temperature, max_tokens, \
                              top_p, is_default, created_at, updated_at";

#[async_trait]
impl LlmConfigRepository for SqliteLlmConfigRepository {
    async fn create(&self, config: NewLlmConfig) -> Result<LlmConfig, LlmConfigError> {
        let result = sqlx::query(
            "INSERT INTO llm_configs
                (name, model_name, system_prompt, temperature, max_tokens, top_p, is_default)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&config.name)
        .bind(&config.model_name)
        .bind(&config.system_prompt)
        .bind(config.temperature)
        .bind(config.max_tokens)
        .bind(config.top_p)
        .bind(i64::from(config.is_default))
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                LlmConfigError::DuplicateName(config.name.clone())
            }
            _ => LlmConfigError::Database(e.to_string()),
        })?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| LlmConfigError::Database("inserted config row missing".into()))
    }

    async fn list(&self) -> Result<Vec<LlmConfig>, LlmConfigError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM llm_configs ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LlmConfigError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_config_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<LlmConfig>, LlmConfigError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM llm_configs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LlmConfigError::Database(e.to_string()))?;

        Ok(row.map(|r| map_config_row(&r)))
    }

    async fn delete(&self, id: i64) -> Result<bool, LlmConfigError> {
        let result = sqlx::query("DELETE FROM llm_configs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LlmConfigError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    fn preset(name: &str) -> NewLlmConfig {
        NewLlmConfig {
            name: name.into(),
            model_name: "llama3-8b".into(),
            system_prompt: None,
            temperature: 0.7,
            max_tokens: 512,
            top_p: 0.9,
            is_default: false,
        }
    }

    async fn repo() -> SqliteLlmConfigRepository {
        let pool = setup_test_database().await.unwrap();
        SqliteLlmConfigRepository::new(pool)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = repo().await;
        let created = repo.create(preset("alpha")).await.unwrap();
        assert_eq!(created.name, "alpha");
        assert!(!created.is_default);

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.model_name, "llama3-8b");
        assert!((fetched.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = repo().await;
        repo.create(preset("dup")).await.unwrap();

        let err = repo.create(preset("dup")).await.unwrap_err();
        assert!(matches!(err, LlmConfigError::DuplicateName(name) if name == "dup"));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let repo = repo().await;
        repo.create(preset("zeta")).await.unwrap();
        repo.create(preset("alpha")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let repo = repo().await;
        let created = repo.create(preset("gone")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn multiple_defaults_are_allowed() {
        // The schema deliberately does not enforce a single default row.
        let repo = repo().await;
        let mut first = preset("one");
        first.is_default = true;
        let mut second = preset("two");
        second.is_default = true;

        repo.create(first).await.unwrap();
        repo.create(second).await.unwrap();

        let defaults = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.is_default)
            .count();
        assert_eq!(defaults, 2);
    }
}
