//! Patient repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::PatientId;
use domain_patient::Patient;

use crate::error::DatabaseError;

/// Repository for patient records
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    /// Creates a new PatientRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new patient
    pub async fn create(&self, patient: &Patient) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO patients (
                id, name, date_of_birth, insurance_provider, policy_number,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(patient.id))
        .bind(&patient.name)
        .bind(patient.date_of_birth)
        .bind(&patient.insurance_provider)
        .bind(&patient.policy_number)
        .bind(patient.created_at)
        .bind(patient.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a patient by identifier
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no patient matches.
    pub async fn get_by_id(&self, patient_id: PatientId) -> Result<Patient, DatabaseError> {
        let row = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT id, name, date_of_birth, insurance_provider, policy_number,
                   created_at, updated_at
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(patient_id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Patient", patient_id))?;

        Ok(row.into())
    }

    /// Lists all patients, most recently updated first
    pub async fn list(&self) -> Result<Vec<Patient>, DatabaseError> {
        let rows = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT id, name, date_of_birth, insurance_provider, policy_number,
                   created_at, updated_at
            FROM patients
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    /// Updates a patient's mutable attributes
    pub async fn update(&self, patient: &Patient) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE patients
            SET name = $2, date_of_birth = $3, insurance_provider = $4,
                policy_number = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(patient.id))
        .bind(&patient.name)
        .bind(patient.date_of_birth)
        .bind(&patient.insurance_provider)
        .bind(&patient.policy_number)
        .bind(patient.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Patient", patient.id));
        }
        Ok(())
    }

    /// Deletes a patient; teeth, x-rays, and claims cascade in the schema
    pub async fn delete(&self, patient_id: PatientId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(Uuid::from(patient_id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Patient", patient_id));
        }
        Ok(())
    }
}

/// Database row for patient
#[derive(Debug, Clone, sqlx::FromRow)]
struct PatientRow {
    id: Uuid,
    name: String,
    date_of_birth: NaiveDate,
    insurance_provider: String,
    policy_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: PatientId::from(row.id),
            name: row.name,
            date_of_birth: row.date_of_birth,
            insurance_provider: row.insurance_provider,
            policy_number: row.policy_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
