//! PostgreSQL meter reading store
//!
//! Tuple uniqueness is enforced by the `meter_reading_tuple_unique`
//! constraint, so a create that loses a race still reports the conflict.

use async_trait::async_trait;
use meter_core::{
    models::{CalendarMonth, MeterReading},
    traits::{duplicate_reading_message, MeterReadingStore},
    AppError, AppResult,
};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

/// Database row representation of a meter reading
#[derive(Debug, FromRow)]
struct MeterReadingRow {
    id: i64,
    meter_id: i64,
    year: i32,
    month: i32,
    energy_consumed: i32,
}

impl From<MeterReadingRow> for MeterReading {
    fn from(row: MeterReadingRow) -> Self {
        MeterReading {
            id: Some(row.id),
            meter_id: row.meter_id,
            year: row.year,
            month: row.month,
            energy_consumed: row.energy_consumed,
        }
    }
}

/// PostgreSQL implementation of the storage port
#[derive(Clone)]
pub struct PgMeterReadingStore {
    pool: PgPool,
}

impl PgMeterReadingStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map insert/update failures, turning constraint hits into bad input
    fn map_write_error(reading: &MeterReading, e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let month = CalendarMonth::new(reading.month)
                    .map(|m| m.name().to_string())
                    .unwrap_or_else(|| reading.month.to_string());
                return AppError::Validation(duplicate_reading_message(
                    reading.meter_id,
                    reading.year,
                    &month,
                ));
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Validation(format!(
                    "Meter with id {} does not exist",
                    reading.meter_id
                ));
            }
        }

        error!("Database error saving meter reading: {}", e);
        AppError::Database(format!("Failed to save meter reading: {}", e))
    }
}

#[async_trait]
impl MeterReadingStore for PgMeterReadingStore {
    #[instrument(skip(self))]
    async fn exists_meter(&self, id: i64) -> AppResult<bool> {
        debug!("Checking meter exists: {}", id);

        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM meter WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error checking meter {}: {}", id, e);
                AppError::Database(format!("Failed to check meter: {}", e))
            })
    }

    #[instrument(skip(self))]
    async fn exists_reading(&self, id: i64) -> AppResult<bool> {
        debug!("Checking meter reading exists: {}", id);

        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM meter_reading WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error checking meter reading {}: {}", id, e);
                AppError::Database(format!("Failed to check meter reading: {}", e))
            })
    }

    #[instrument(skip(self))]
    async fn sum_consumption(&self, meter_id: i64, year: i32) -> AppResult<Option<i64>> {
        debug!("Summing consumption for meter {} in {}", meter_id, year);

        // SUM over zero rows is NULL
        sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT SUM(energy_consumed)::BIGINT
            FROM meter_reading
            WHERE meter_id = $1 AND year = $2
            "#,
        )
        .bind(meter_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error summing consumption for meter {}: {}", meter_id, e);
            AppError::Database(format!("Failed to aggregate consumption: {}", e))
        })
    }

    #[instrument(skip(self))]
    async fn find_readings(&self, meter_id: i64, year: i32) -> AppResult<Vec<MeterReading>> {
        debug!("Finding readings for meter {} in {}", meter_id, year);

        let rows = sqlx::query_as::<sqlx::Postgres, MeterReadingRow>(
            r#"
            SELECT id, meter_id, year, month, energy_consumed
            FROM meter_reading
            WHERE meter_id = $1 AND year = $2
            ORDER BY month, id
            "#,
        )
        .bind(meter_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding readings for meter {}: {}", meter_id, e);
            AppError::Database(format!("Failed to find meter readings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn find_reading(
        &self,
        meter_id: i64,
        year: i32,
        month: i32,
    ) -> AppResult<Option<MeterReading>> {
        debug!("Finding reading for meter {} in {}-{}", meter_id, year, month);

        let row = sqlx::query_as::<sqlx::Postgres, MeterReadingRow>(
            r#"
            SELECT id, meter_id, year, month, energy_consumed
            FROM meter_reading
            WHERE meter_id = $1 AND year = $2 AND month = $3
            "#,
        )
        .bind(meter_id)
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding reading for meter {}: {}", meter_id, e);
            AppError::Database(format!("Failed to find meter reading: {}", e))
        })?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn save(&self, reading: MeterReading) -> AppResult<MeterReading> {
        let row = match reading.id {
            None => {
                debug!("Inserting meter reading {:?}", reading.tuple());

                sqlx::query_as::<sqlx::Postgres, MeterReadingRow>(
                    r#"
                    INSERT INTO meter_reading (meter_id, year, month, energy_consumed)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, meter_id, year, month, energy_consumed
                    "#,
                )
                .bind(reading.meter_id)
                .bind(reading.year)
                .bind(reading.month)
                .bind(reading.energy_consumed)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| Self::map_write_error(&reading, e))?
            }
            Some(id) => {
                debug!("Updating meter reading {}", id);

                sqlx::query_as::<sqlx::Postgres, MeterReadingRow>(
                    r#"
                    UPDATE meter_reading
                    SET meter_id = $2, year = $3, month = $4, energy_consumed = $5
                    WHERE id = $1
                    RETURNING id, meter_id, year, month, energy_consumed
                    "#,
                )
                .bind(id)
                .bind(reading.meter_id)
                .bind(reading.year)
                .bind(reading.month)
                .bind(reading.energy_consumed)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Self::map_write_error(&reading, e))?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Meter reading with id {} does not exist", id))
                })?
            }
        };

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<()> {
        debug!("Deleting meter reading: {}", id);

        let result = sqlx::query("DELETE FROM meter_reading WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting meter reading {}: {}", id, e);
                AppError::Database(format!("Failed to delete meter reading: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Meter reading with id {} does not exist",
                id
            )));
        }

        Ok(())
    }
}
