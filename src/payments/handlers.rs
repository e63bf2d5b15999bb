// src/payments/handlers.rs

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Extension, Json, Path},
    http::{HeaderMap, StatusCode},
};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::models::{
    to_minor_units, InitiatePaymentRequest, MockInitiateResponse, PaymentRecord, PaymentStatus,
    PaymentType, VerifyResponse, DEFAULT_PUBLIC_KEY, MOCK_AUTHORIZATION_BASE, PRO_UPGRADE_AMOUNT,
};
use super::services::PaymentService;
use super::webhook::{verify_signature, WebhookEvent, SIGNATURE_HEADER};
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, utc_timestamp, ApiError, SharedState, ValidationResult};
use crate::services::{monitoring, InitializeTransaction};

const FALLBACK_PAYER_EMAIL: &str = "user@example.com";

/// Resolve the payment type and amount, rejecting unusable donation amounts
fn resolve_amount(request: &InitiatePaymentRequest) -> Result<(PaymentType, f64), ApiError> {
    let payment_type = PaymentType::from_request(request.payment_type.as_deref());

    if payment_type == PaymentType::ProUpgrade {
        return Ok((payment_type, PRO_UPGRADE_AMOUNT));
    }

    let mut validation = ValidationResult::new();
    match request.amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => {
            return Ok((payment_type, amount));
        }
        Some(_) => validation.add_error("amount", "Amount must be greater than zero"),
        None => validation.add_error("amount", "Amount is required"),
    }

    Err(ApiError::from(validation))
}

/// GET /api/payments - Caller's payments, newest first
pub async fn list_payments(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Vec<PaymentRecord>>, ApiError> {
    let state = state_lock.read().await.clone();
    let rows = PaymentService::new(state.db).list(&authed.id).await?;

    Ok(Json(rows))
}

/// POST /api/payments/initiate
///
/// The pending record is written before the gateway is contacted.
pub async fn initiate_payment(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<InitiatePaymentRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let state = state_lock.read().await.clone();
    let (payment_type, amount) = resolve_amount(&request)?;

    let payment = PaymentService::new(state.db.clone())
        .create_pending(&authed.id, amount, payment_type)
        .await?;

    let Some(gateway) = state.gateway.clone() else {
        monitoring::record_payment_event(
            "initiated",
            json!({ "reference": payment.payment_reference, "mock": true }),
        );

        let response = MockInitiateResponse {
            mock: true,
            authorization_url: format!(
                "{}/{}",
                MOCK_AUTHORIZATION_BASE, payment.payment_reference
            ),
            reference: payment.payment_reference.clone(),
            public_key: state
                .paystack_public_key
                .clone()
                .unwrap_or_else(|| DEFAULT_PUBLIC_KEY.to_string()),
        };

        return serde_json::to_value(response)
            .map(Json)
            .map_err(|e| ApiError::InternalServer(e.to_string()));
    };

    let email = if authed.email.is_empty() {
        FALLBACK_PAYER_EMAIL.to_string()
    } else {
        authed.email.clone()
    };

    let transaction = InitializeTransaction {
        amount: to_minor_units(amount),
        email,
        reference: payment.payment_reference.clone(),
        metadata: json!({
            "user_id": authed.id,
            "type": payment_type.as_str(),
            "local_id": payment.id,
        }),
    };

    match gateway.initialize(&transaction).await {
        Ok(payload) => {
            info!(
                reference = %payment.payment_reference,
                email = %safe_email_log(&transaction.email),
                "Gateway transaction initialized"
            );
            monitoring::record_payment_event(
                "initiated",
                json!({ "reference": payment.payment_reference, "mock": false }),
            );
            Ok(Json(payload))
        }
        Err(e) => {
            monitoring::capture_upstream_error("payments", &e);
            Err(ApiError::PaymentInitError(
                "Failed to initialize payment".into(),
            ))
        }
    }
}

/// GET /api/payments/verify/:ref
pub async fn verify_payment(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(reference): Path<String>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = PaymentService::new(state.db.clone());

    if service
        .find_by_reference(&reference, Some(&authed.id))
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Payment not found".into()));
    }

    let (status, mock) = match state.gateway.clone() {
        None => (PaymentStatus::Success, Some(true)),
        Some(gateway) => match gateway.verify(&reference).await {
            Ok(reported) => (PaymentStatus::from_verification(&reported), None),
            Err(e) => {
                monitoring::capture_upstream_error("payments", &e);
                return Err(ApiError::BadRequest("Verification failed".into()));
            }
        },
    };

    let now = utc_timestamp();
    let outcome = service
        .settle(&reference, Some(&authed.id), status, &now)
        .await?;

    monitoring::record_payment_event(
        "verified",
        json!({
            "reference": reference,
            "status": outcome.record.payment_status.as_str(),
            "transitioned": outcome.transitioned,
            "promoted": outcome.promoted,
        }),
    );

    Ok(Json(VerifyResponse {
        status: outcome.record.payment_status,
        reference,
        mock,
    }))
}

/// POST /api/payments/webhook
///
/// Signed with HMAC-SHA512 of the raw body. Without a configured secret
/// every delivery is acknowledged and ignored.
pub async fn payment_webhook(
    Extension(state_lock): Extension<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let state = state_lock.read().await.clone();

    let Some(secret) = state.webhook_secret.as_deref() else {
        return Ok((StatusCode::OK, "ok"));
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    if !verify_signature(secret, &body, signature) {
        warn!("Webhook rejected: signature mismatch");
        return Err(ApiError::InvalidSignature);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid event payload".into()))?;

    let (Some(reference), Some(raw_status)) = (event.reference(), event.status()) else {
        info!(event = ?event.event, "Webhook without reference/status ignored");
        return Ok((StatusCode::OK, "ok"));
    };

    let Some(status) = PaymentStatus::from_webhook(raw_status) else {
        info!(reference = %reference, status = %raw_status, "Non-terminal webhook status ignored");
        return Ok((StatusCode::OK, "ok"));
    };

    let now = utc_timestamp();
    match PaymentService::new(state.db)
        .settle(reference, None, status, &now)
        .await
    {
        Ok(outcome) => {
            if let Some(meta_user) = event.metadata_user_id() {
                if meta_user != outcome.record.user_id {
                    warn!(
                        reference = %reference,
                        metadata_user_id = %meta_user,
                        owner_id = %outcome.record.user_id,
                        "Webhook metadata user differs from payment owner"
                    );
                }
            }
            monitoring::record_payment_event(
                "webhook",
                json!({
                    "reference": reference,
                    "status": outcome.record.payment_status.as_str(),
                    "transitioned": outcome.transitioned,
                    "promoted": outcome.promoted,
                }),
            );
        }
        Err(ApiError::NotFound(_)) => {
            warn!(reference = %reference, "Webhook for unknown payment reference");
        }
        Err(e) => return Err(e),
    }

    Ok((StatusCode::OK, "ok"))
}
