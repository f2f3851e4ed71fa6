//! Treatment record repository implementation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{PatientId, ToothRecordId, TreatmentId};
use domain_claims::TreatmentRecord;

use crate::error::DatabaseError;
use crate::repositories::{
    cdt_code_from_db, claim_reference_from_db, quadrant_from_db, tooth_number_from_db,
    ClaimStatusRow, StatusCount,
};

/// Repository for treatment records
#[derive(Debug, Clone)]
pub struct TreatmentRepository {
    pool: PgPool,
}

impl TreatmentRepository {
    /// Creates a new TreatmentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new treatment record
    pub async fn create(&self, treatment: &TreatmentRecord) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO treatment_records (
                id, patient_id, tooth_record_id, tooth_number, cdt_code,
                quadrant, fee, status, claim_reference, created_at, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::from(treatment.id))
        .bind(Uuid::from(treatment.patient_id))
        .bind(treatment.tooth_record_id.map(Uuid::from))
        .bind(treatment.tooth_number.map(|t| i16::from(t.get())))
        .bind(treatment.cdt_code.as_str())
        .bind(treatment.quadrant.map(|q| q.abbreviation()))
        .bind(treatment.fee)
        .bind(ClaimStatusRow::from(treatment.status))
        .bind(
            treatment
                .claim_reference
                .as_ref()
                .map(|r| r.as_str().to_string()),
        )
        .bind(treatment.created_at)
        .bind(treatment.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a treatment by identifier
    pub async fn get_by_id(
        &self,
        treatment_id: TreatmentId,
    ) -> Result<TreatmentRecord, DatabaseError> {
        let row = sqlx::query_as::<_, TreatmentRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   quadrant, fee, status, claim_reference, created_at, submitted_at
            FROM treatment_records
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(treatment_id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("TreatmentRecord", treatment_id))?;

        row.try_into()
    }

    /// Retrieves all treatments for a patient, newest first
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, TreatmentRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   quadrant, fee, status, claim_reference, created_at, submitted_at
            FROM treatment_records
            WHERE patient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Lists all treatments, newest first
    pub async fn list(&self) -> Result<Vec<TreatmentRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, TreatmentRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   quadrant, fee, status, claim_reference, created_at, submitted_at
            FROM treatment_records
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Most recently submitted treatments, for the dashboard
    pub async fn recent_submissions(
        &self,
        limit: i64,
    ) -> Result<Vec<TreatmentRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, TreatmentRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   quadrant, fee, status, claim_reference, created_at, submitted_at
            FROM treatment_records
            WHERE submitted_at IS NOT NULL
            ORDER BY submitted_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Writes back the mutable claim fields after a workflow step
    pub async fn save(&self, treatment: &TreatmentRecord) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE treatment_records
            SET status = $2, claim_reference = $3, submitted_at = $4
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(treatment.id))
        .bind(ClaimStatusRow::from(treatment.status))
        .bind(
            treatment
                .claim_reference
                .as_ref()
                .map(|r| r.as_str().to_string()),
        )
        .bind(treatment.submitted_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("TreatmentRecord", treatment.id));
        }
        Ok(())
    }

    /// Per-status counts for the dashboard summary
    pub async fn counts_by_status(&self) -> Result<Vec<StatusCount>, DatabaseError> {
        let rows = sqlx::query_as::<_, (ClaimStatusRow, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM treatment_records
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.into(),
                count,
            })
            .collect())
    }
}

/// Database row for treatment record
#[derive(Debug, Clone, sqlx::FromRow)]
struct TreatmentRow {
    id: Uuid,
    patient_id: Uuid,
    tooth_record_id: Option<Uuid>,
    tooth_number: Option<i16>,
    cdt_code: String,
    quadrant: Option<String>,
    fee: Option<Decimal>,
    status: ClaimStatusRow,
    claim_reference: Option<String>,
    created_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<TreatmentRow> for TreatmentRecord {
    type Error = DatabaseError;

    fn try_from(row: TreatmentRow) -> Result<Self, Self::Error> {
        Ok(TreatmentRecord {
            id: TreatmentId::from(row.id),
            patient_id: PatientId::from(row.patient_id),
            tooth_record_id: row.tooth_record_id.map(ToothRecordId::from),
            tooth_number: row.tooth_number.map(tooth_number_from_db).transpose()?,
            cdt_code: cdt_code_from_db(&row.cdt_code)?,
            quadrant: row.quadrant.as_deref().map(quadrant_from_db).transpose()?,
            fee: row.fee,
            status: row.status.into(),
            claim_reference: row
                .claim_reference
                .as_deref()
                .map(claim_reference_from_db)
                .transpose()?,
            created_at: row.created_at,
            submitted_at: row.submitted_at,
        })
    }
}
