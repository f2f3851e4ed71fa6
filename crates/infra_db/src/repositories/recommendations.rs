//! Crown recommendation repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{PatientId, RecommendationId, ToothRecordId, XrayId};
use domain_claims::CrownRecommendation;

use crate::error::DatabaseError;
use crate::repositories::{
    cdt_code_from_db, claim_reference_from_db, tooth_number_from_db, ClaimStatusRow, StatusCount,
};

/// Repository for crown recommendations
///
/// The `(tooth_record_id, patient_id)` composite foreign key in the schema
/// backs the domain rule that a recommendation's tooth belongs to its
/// patient; an insert that violates it surfaces as a
/// [`DatabaseError::ForeignKeyViolation`].
#[derive(Debug, Clone)]
pub struct RecommendationRepository {
    pool: PgPool,
}

impl RecommendationRepository {
    /// Creates a new RecommendationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new recommendation
    pub async fn create(&self, rec: &CrownRecommendation) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO crown_recommendations (
                id, patient_id, tooth_record_id, tooth_number, cdt_code,
                reason, clinical_note, xray_id, status, claim_reference,
                submitted_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(Uuid::from(rec.id))
        .bind(Uuid::from(rec.patient_id))
        .bind(Uuid::from(rec.tooth_record_id))
        .bind(i16::from(rec.tooth_number.get()))
        .bind(rec.cdt_code.as_str())
        .bind(&rec.reason)
        .bind(&rec.clinical_note)
        .bind(rec.xray_id.map(Uuid::from))
        .bind(ClaimStatusRow::from(rec.status))
        .bind(rec.claim_reference.as_ref().map(|r| r.as_str().to_string()))
        .bind(rec.submitted_at)
        .bind(rec.created_at)
        .bind(rec.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a recommendation by identifier
    pub async fn get_by_id(
        &self,
        rec_id: RecommendationId,
    ) -> Result<CrownRecommendation, DatabaseError> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   reason, clinical_note, xray_id, status, claim_reference,
                   submitted_at, created_at, updated_at
            FROM crown_recommendations
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(rec_id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("CrownRecommendation", rec_id))?;

        row.try_into()
    }

    /// Retrieves all recommendations for a patient, newest first
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<CrownRecommendation>, DatabaseError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   reason, clinical_note, xray_id, status, claim_reference,
                   submitted_at, created_at, updated_at
            FROM crown_recommendations
            WHERE patient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Lists all recommendations, newest first
    pub async fn list(&self) -> Result<Vec<CrownRecommendation>, DatabaseError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, patient_id, tooth_record_id, tooth_number, cdt_code,
                   reason, clinical_note, xray_id, status, claim_reference,
                   submitted_at, created_at, updated_at
            FROM crown_recommendations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Writes back the mutable claim fields after a workflow step
    pub async fn save(&self, rec: &CrownRecommendation) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE crown_recommendations
            SET status = $2, claim_reference = $3, submitted_at = $4,
                clinical_note = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(rec.id))
        .bind(ClaimStatusRow::from(rec.status))
        .bind(rec.claim_reference.as_ref().map(|r| r.as_str().to_string()))
        .bind(rec.submitted_at)
        .bind(&rec.clinical_note)
        .bind(rec.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CrownRecommendation", rec.id));
        }
        Ok(())
    }

    /// Per-status counts for the dashboard summary
    pub async fn counts_by_status(&self) -> Result<Vec<StatusCount>, DatabaseError> {
        let rows = sqlx::query_as::<_, (ClaimStatusRow, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM crown_recommendations
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

/// Database row for crown recommendation
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecommendationRow {
    id: Uuid,
    patient_id: Uuid,
    tooth_record_id: Uuid,
    tooth_number: i16,
    cdt_code: String,
    reason: String,
    clinical_note: String,
    xray_id: Option<Uuid>,
    status: ClaimStatusRow,
    claim_reference: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecommendationRow> for CrownRecommendation {
    type Error = DatabaseError;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        Ok(CrownRecommendation {
            id: RecommendationId::from(row.id),
            patient_id: PatientId::from(row.patient_id),
            tooth_record_id: ToothRecordId::from(row.tooth_record_id),
            tooth_number: tooth_number_from_db(row.tooth_number)?,
            cdt_code: cdt_code_from_db(&row.cdt_code)?,
            reason: row.reason,
            clinical_note: row.clinical_note,
            xray_id: row.xray_id.map(XrayId::from),
            status: row.status.into(),
            claim_reference: row
                .claim_reference
                .as_deref()
                .map(claim_reference_from_db)
                .transpose()?,
            submitted_at: row.submitted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
