use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: String,
    pub owner_id: i64,
    pub name: String,
    pub content: Option<String>,
    pub preference: i32,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewProject {
    pub id: String,
    pub name: String,
    pub content: Option<String>,
    pub preference: i32,
}

// Every statement binds the authenticated owner id; there is no owner-free
// way to reach a row. The primary key is (owner_id, id), so two owners may
// reuse the same client-generated id without colliding.
impl Project {
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> Result<Vec<Project>, ApiError> {
        let rows = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, name, content, preference, completed, created_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, owner_id: i64, new: NewProject) -> Result<Project, ApiError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, owner_id, name, content, preference)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, content, preference, completed, created_at
            "#,
        )
        .bind(&new.id)
        .bind(owner_id)
        .bind(&new.name)
        .bind(&new.content)
        .bind(new.preference)
        .fetch_one(db)
        .await?;
        Ok(project)
    }

    /// Only `preference` and `completed` are mutable after creation. A miss
    /// (unknown id, or a row owned by someone else) affects zero rows and is
    /// not an error.
    pub async fn update(
        db: &PgPool,
        owner_id: i64,
        id: &str,
        preference: i32,
        completed: bool,
    ) -> Result<u64, ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET preference = $1, completed = $2
            WHERE id = $3 AND owner_id = $4
            "#,
        )
        .bind(preference)
        .bind(completed)
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Zero rows affected is a successful no-op, including repeat deletes.
    pub async fn delete(db: &PgPool, owner_id: i64, id: &str) -> Result<u64, ApiError> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_serializes_all_wire_fields() {
        let project = Project {
            id: "p1".into(),
            owner_id: 1,
            name: "Build site".into(),
            content: None,
            preference: 0,
            completed: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["name"], "Build site");
        assert_eq!(json["preference"], 0);
        assert_eq!(json["completed"], false);
        assert_eq!(json["content"], serde_json::Value::Null);
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }
}
