// src/payments/services.rs
//! Payment rows and the single terminal-transition operation shared by the
//! verify endpoint and the webhook.

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{PaymentRecord, PaymentStatus, PaymentType, SettleOutcome};
use crate::common::{generate_payment_id, generate_payment_reference, ApiError};
use crate::profile::ProfileService;

const PAYMENT_COLUMNS: &str = "id, user_id, amount, payment_type, payment_status, \
                               payment_reference, created_at, updated_at";

pub struct PaymentService {
    db: SqlitePool,
}

impl PaymentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a `pending` record with a fresh reference
    pub async fn create_pending(
        &self,
        owner_id: &str,
        amount: f64,
        payment_type: PaymentType,
    ) -> Result<PaymentRecord, ApiError> {
        let id = generate_payment_id();
        let reference = generate_payment_reference();

        sqlx::query(
            r#"
            INSERT INTO payments (id, user_id, amount, payment_type, payment_status, payment_reference)
            VALUES (?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(amount)
        .bind(payment_type)
        .bind(&reference)
        .execute(&self.db)
        .await?;

        info!(
            payment_id = %id,
            reference = %reference,
            user_id = %owner_id,
            payment_type = %payment_type.as_str(),
            "Pending payment created"
        );

        self.find_by_reference(&reference, Some(owner_id))
            .await?
            .ok_or_else(|| ApiError::InternalServer("Payment vanished after insert".into()))
    }

    /// Look up by reference, optionally scoped to an owner
    pub async fn find_by_reference(
        &self,
        reference: &str,
        owner_id: Option<&str>,
    ) -> Result<Option<PaymentRecord>, ApiError> {
        let record = sqlx::query_as::<_, PaymentRecord>(&format!(
            "SELECT {} FROM payments WHERE payment_reference = ? AND (? IS NULL OR user_id = ?)",
            PAYMENT_COLUMNS
        ))
        .bind(reference)
        .bind(owner_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// Owner's payments, newest first
    pub async fn list(&self, owner_id: &str) -> Result<Vec<PaymentRecord>, ApiError> {
        let rows = sqlx::query_as::<_, PaymentRecord>(&format!(
            "SELECT {} FROM payments WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            PAYMENT_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Move a payment out of `pending` exactly once.
    ///
    /// The write only applies while the row is still `pending`; a second
    /// writer observes the stored terminal status and changes nothing. The
    /// writer that performs a successful `pro_upgrade` transition promotes
    /// the record owner's profile, stamped with `now`.
    pub async fn settle(
        &self,
        reference: &str,
        owner_id: Option<&str>,
        status: PaymentStatus,
        now: &str,
    ) -> Result<SettleOutcome, ApiError> {
        if !status.is_terminal() {
            return Err(ApiError::BadRequest("Status must be terminal".into()));
        }

        let transitioned = sqlx::query(
            r#"
            UPDATE payments
            SET payment_status = ?, updated_at = ?
            WHERE payment_reference = ?
              AND payment_status = 'pending'
              AND (? IS NULL OR user_id = ?)
            "#,
        )
        .bind(status)
        .bind(now)
        .bind(reference)
        .bind(owner_id)
        .bind(owner_id)
        .execute(&self.db)
        .await?
        .rows_affected()
            > 0;

        let record = self
            .find_by_reference(reference, owner_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Payment not found".into()))?;

        if !transitioned {
            info!(
                reference = %reference,
                stored_status = %record.payment_status.as_str(),
                attempted_status = %status.as_str(),
                "Payment already terminal, leaving it unchanged"
            );
            return Ok(SettleOutcome {
                record,
                transitioned: false,
                promoted: false,
            });
        }

        info!(
            reference = %reference,
            status = %status.as_str(),
            user_id = %record.user_id,
            "Payment reached terminal status"
        );

        let promoted =
            status == PaymentStatus::Success && record.payment_type == PaymentType::ProUpgrade;

        if promoted {
            if let Err(e) = ProfileService::new(self.db.clone())
                .promote_to_pro(&record.user_id, now)
                .await
            {
                warn!(
                    error = %e,
                    user_id = %record.user_id,
                    reference = %reference,
                    "Payment settled but profile promotion failed"
                );
                return Err(e);
            }
        }

        Ok(SettleOutcome {
            record,
            transitioned: true,
            promoted,
        })
    }
}
