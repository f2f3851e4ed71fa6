//! Tooth record repository implementation
//!
//! A patient has at most one row per tooth; recording a later observation
//! for the same tooth updates the existing row (the schema enforces the
//! uniqueness).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{PatientId, ToothRecordId, XrayId};
use domain_patient::ToothRecord;

use crate::error::DatabaseError;
use crate::repositories::tooth_number_from_db;

/// Repository for per-tooth observation records
#[derive(Debug, Clone)]
pub struct ToothRepository {
    pool: PgPool,
}

impl ToothRepository {
    /// Creates a new ToothRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a tooth record, or overwrites the diagnosis and x-ray of the
    /// existing record for the same patient and tooth
    pub async fn upsert(&self, record: &ToothRecord) -> Result<ToothRecord, DatabaseError> {
        let row = sqlx::query_as::<_, ToothRow>(
            r#"
            INSERT INTO tooth_records (
                id, patient_id, tooth_number, diagnosis, xray_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (patient_id, tooth_number) DO UPDATE
            SET diagnosis = EXCLUDED.diagnosis,
                xray_id = COALESCE(EXCLUDED.xray_id, tooth_records.xray_id),
                updated_at = EXCLUDED.updated_at
            RETURNING id, patient_id, tooth_number, diagnosis, xray_id,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::from(record.id))
        .bind(Uuid::from(record.patient_id))
        .bind(i16::from(record.tooth_number.get()))
        .bind(&record.diagnosis)
        .bind(record.xray_id.map(Uuid::from))
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Retrieves a tooth record by identifier
    pub async fn get_by_id(&self, record_id: ToothRecordId) -> Result<ToothRecord, DatabaseError> {
        let row = sqlx::query_as::<_, ToothRow>(
            r#"
            SELECT id, patient_id, tooth_number, diagnosis, xray_id,
                   created_at, updated_at
            FROM tooth_records
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(record_id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("ToothRecord", record_id))?;

        row.try_into()
    }

    /// Retrieves all tooth records for a patient, in tooth order
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<ToothRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, ToothRow>(
            r#"
            SELECT id, patient_id, tooth_number, diagnosis, xray_id,
                   created_at, updated_at
            FROM tooth_records
            WHERE patient_id = $1
            ORDER BY tooth_number
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

/// Database row for tooth record
#[derive(Debug, Clone, sqlx::FromRow)]
struct ToothRow {
    id: Uuid,
    patient_id: Uuid,
    tooth_number: i16,
    diagnosis: String,
    xray_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ToothRow> for ToothRecord {
    type Error = DatabaseError;

    fn try_from(row: ToothRow) -> Result<Self, Self::Error> {
        Ok(ToothRecord {
            id: ToothRecordId::from(row.id),
            patient_id: PatientId::from(row.patient_id),
            tooth_number: tooth_number_from_db(row.tooth_number)?,
            diagnosis: row.diagnosis,
            xray_id: row.xray_id.map(XrayId::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
