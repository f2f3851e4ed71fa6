//! X-ray repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{PatientId, XrayId};
use domain_patient::PatientXray;

use crate::error::DatabaseError;

/// Repository for uploaded x-ray metadata
///
/// Stores file metadata only; the image bytes live on disk at `file_path`.
#[derive(Debug, Clone)]
pub struct XrayRepository {
    pool: PgPool,
}

impl XrayRepository {
    /// Creates a new XrayRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an upload
    pub async fn create(&self, xray: &PatientXray) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO patient_xrays (
                id, patient_id, file_path, original_name, content_type, uploaded_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(xray.id))
        .bind(Uuid::from(xray.patient_id))
        .bind(&xray.file_path)
        .bind(&xray.original_name)
        .bind(&xray.content_type)
        .bind(xray.uploaded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves an x-ray by identifier
    pub async fn get_by_id(&self, xray_id: XrayId) -> Result<PatientXray, DatabaseError> {
        let row = sqlx::query_as::<_, XrayRow>(
            r#"
            SELECT id, patient_id, file_path, original_name, content_type, uploaded_at
            FROM patient_xrays
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(xray_id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Xray", xray_id))?;

        Ok(row.into())
    }

    /// Retrieves all x-rays for a patient, newest first
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<PatientXray>, DatabaseError> {
        let rows = sqlx::query_as::<_, XrayRow>(
            r#"
            SELECT id, patient_id, file_path, original_name, content_type, uploaded_at
            FROM patient_xrays
            WHERE patient_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PatientXray::from).collect())
    }

    /// Retrieves the most recent x-ray for a patient, if any
    ///
    /// This is "the x-ray" that claim documents and the classifier use.
    pub async fn latest_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<PatientXray>, DatabaseError> {
        let row = sqlx::query_as::<_, XrayRow>(
            r#"
            SELECT id, patient_id, file_path, original_name, content_type, uploaded_at
            FROM patient_xrays
            WHERE patient_id = $1
            ORDER BY uploaded_at DESC
            LIMIT 1
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PatientXray::from))
    }
}

/// Database row for x-ray
#[derive(Debug, Clone, sqlx::FromRow)]
struct XrayRow {
    id: Uuid,
    patient_id: Uuid,
    file_path: String,
    original_name: String,
    content_type: String,
    uploaded_at: DateTime<Utc>,
}

impl From<XrayRow> for PatientXray {
    fn from(row: XrayRow) -> Self {
        PatientXray {
            id: XrayId::from(row.id),
            patient_id: PatientId::from(row.patient_id),
            file_path: row.file_path,
            original_name: row.original_name,
            content_type: row.content_type,
            uploaded_at: row.uploaded_at,
        }
    }
}
