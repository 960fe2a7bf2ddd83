use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, JobUpdate, RepositoryError};
use crate::domain::{Job, JobId, JobStatus, Row};

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRecord {
    id: Uuid,
    status: String,
    message: String,
    callback_url: String,
    data: Json<Vec<Row>>,
    report: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRecord> for Job {
    type Error = RepositoryError;

    fn try_from(r: JobRecord) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(Job {
            id: JobId::from_uuid(r.id),
            status,
            message: r.message,
            callback_url: r.callback_url,
            rows: r.data.0,
            report: r.report,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, status, message, callback_url, data, report, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(job.status.as_str())
        .bind(&job.message)
        .bind(&job.callback_url)
        .bind(Json(&job.rows))
        .bind(&job.report)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::ConstraintViolation(format!("job {} already exists", job.id))
            }
            other => query_failed(other),
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let record = sqlx::query_as::<_, JobRecord>(
            r#"
            SELECT id, status, message, callback_url, data, report, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        record.map(Job::try_from).transpose()
    }

    #[instrument(skip(self, update), fields(job_id = %id, status = ?update.status))]
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM jobs WHERE id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_failed)?;

        let Some(current) = current else {
            tracing::warn!("Update for unknown job ignored");
            return Ok(());
        };

        if let Some(next) = update.status {
            let current = current
                .parse::<JobStatus>()
                .map_err(RepositoryError::QueryFailed)?;
            if !current.can_transition_to(next) {
                return Err(RepositoryError::InvalidTransition(format!(
                    "{} -> {}",
                    current, next
                )));
            }
        }

        sqlx::query(
            r#"
            UPDATE jobs
            SET status = COALESCE($2, status),
                message = COALESCE($3, message),
                data = COALESCE($4, data),
                report = COALESCE($5, report),
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.message)
        .bind(update.rows.map(Json))
        .bind(update.report)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(query_failed)?;

        tx.commit().await.map_err(query_failed)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}
