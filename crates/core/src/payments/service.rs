//! Payment registration flow
//!
//! A registration moves `Draft -> Submitting -> Settled | Rejected`.
//! Rejection keeps the draft so the user can correct and resubmit; while a
//! submission is in flight further submits are refused, which guarantees a
//! single request per user action.

use std::sync::Arc;

use tracing::{info, warn};
use tropeiro_domain::constants::{
    MSG_ENVIO_EM_ANDAMENTO, MSG_JA_REGISTRADO, MSG_PAGAMENTO_REGISTRADO,
};
use tropeiro_domain::{
    ClientId, ErpError, Money, OrderId, PaymentDraft, PaymentReceipt, Result,
};

use super::ports::{CacheInvalidator, Notification, Notifier, PaymentGateway};
use super::validate::validate_draft;

/// Cache scopes affected by a settled payment.
///
/// `order_id` is `None` for titles without an order link; those still clear
/// the client and dashboard scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentScope {
    pub order_id: Option<OrderId>,
    pub client_id: ClientId,
}

/// Where a payment registration currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Draft,
    Submitting,
    Settled,
    Rejected,
}

/// Validates drafts, submits them and fans out the side effects.
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    cache: Arc<dyn CacheInvalidator>,
    notifier: Arc<dyn Notifier>,
}

impl PaymentService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        cache: Arc<dyn CacheInvalidator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    /// Validate and submit a draft against the backend.
    ///
    /// On success the affected cache scopes are cleared before the receipt
    /// is returned, so no later read can observe pre-payment amounts. On
    /// rejection the backend message travels back verbatim; nothing is
    /// retried in either case.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::Validation`] for client-side rule violations
    /// (no request is made) and the gateway error for backend rejections.
    pub async fn register(
        &self,
        draft: &PaymentDraft,
        valor_em_aberto: Money,
        scope: PaymentScope,
    ) -> Result<PaymentReceipt> {
        validate_draft(draft, valor_em_aberto)?;

        match self.gateway.register(draft).await {
            Ok(receipt) => {
                if let Some(order_id) = scope.order_id {
                    self.cache.invalidate_order(order_id);
                }
                self.cache.invalidate_client(scope.client_id);
                self.cache.invalidate_dashboards();
                info!(
                    titulo_id = draft.titulo_id,
                    pagamento_id = receipt.pagamento_id,
                    correlacao = %draft.correlacao,
                    "payment settled"
                );
                let message = receipt
                    .mensagem
                    .clone()
                    .unwrap_or_else(|| MSG_PAGAMENTO_REGISTRADO.to_string());
                self.notifier.notify(Notification::success(message));
                Ok(receipt)
            }
            Err(err) => {
                warn!(
                    titulo_id = draft.titulo_id,
                    correlacao = %draft.correlacao,
                    error = %err,
                    "payment rejected"
                );
                self.notifier.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }
}

/// Client-side state machine for one payment form.
///
/// Shells hold one flow per open form. The flow refuses concurrent submits,
/// preserves the draft through rejections and pins the correlation id, so a
/// retried submission lands as the same operation on the backend.
#[derive(Debug)]
pub struct PaymentFlow {
    draft: PaymentDraft,
    state: PaymentState,
    last_error: Option<String>,
}

impl PaymentFlow {
    #[must_use]
    pub fn new(draft: PaymentDraft) -> Self {
        Self {
            draft,
            state: PaymentState::Draft,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PaymentState {
        self.state
    }

    #[must_use]
    pub const fn draft(&self) -> &PaymentDraft {
        &self.draft
    }

    /// Message of the last validation failure or backend rejection.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the draft after an edit.
    ///
    /// Allowed before submission and after a rejection; a rejected flow
    /// returns to `Draft`. The correlation id of the incoming draft is kept,
    /// which means an edited resubmission is a new operation only if the
    /// caller built a fresh draft.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::Validation`] when a submission is in flight or
    /// the payment has already settled.
    pub fn update_draft(&mut self, draft: PaymentDraft) -> Result<()> {
        match self.state {
            PaymentState::Draft | PaymentState::Rejected => {
                self.draft = draft;
                self.state = PaymentState::Draft;
                self.last_error = None;
                Ok(())
            }
            PaymentState::Submitting => {
                Err(ErpError::Validation(MSG_ENVIO_EM_ANDAMENTO.to_string()))
            }
            PaymentState::Settled => Err(ErpError::Validation(MSG_JA_REGISTRADO.to_string())),
        }
    }

    /// Drive the flow through one submission.
    ///
    /// # Errors
    ///
    /// Refuses with [`ErpError::Validation`] when a submission is already in
    /// flight or settled; otherwise propagates what
    /// [`PaymentService::register`] returns.
    pub async fn submit(
        &mut self,
        service: &PaymentService,
        valor_em_aberto: Money,
        scope: PaymentScope,
    ) -> Result<PaymentReceipt> {
        match self.state {
            PaymentState::Submitting => {
                return Err(ErpError::Validation(MSG_ENVIO_EM_ANDAMENTO.to_string()));
            }
            PaymentState::Settled => {
                return Err(ErpError::Validation(MSG_JA_REGISTRADO.to_string()));
            }
            PaymentState::Draft | PaymentState::Rejected => {}
        }

        // Client-side rules fail fast and keep the draft editable.
        if let Err(err) = validate_draft(&self.draft, valor_em_aberto) {
            self.state = PaymentState::Draft;
            self.last_error = Some(err.user_message());
            return Err(err);
        }

        self.state = PaymentState::Submitting;
        match service.register(&self.draft, valor_em_aberto, scope).await {
            Ok(receipt) => {
                self.state = PaymentState::Settled;
                self.last_error = None;
                Ok(receipt)
            }
            Err(err) => {
                self.state = PaymentState::Rejected;
                self.last_error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
