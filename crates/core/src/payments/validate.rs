//! Client-side validation of payment drafts
//!
//! These rules run before anything touches the wire; a violation never
//! produces an HTTP request. Messages are the exact pt-BR strings the
//! shells display next to the form fields.

use tropeiro_domain::constants::{
    MSG_CHEQUES_DIVERGEM, MSG_DESCONTO_EXCEDE, MSG_LIQUIDO_EXCEDE, MSG_VALOR_PAGO_EXCEDE,
    MSG_VALOR_PAGO_ZERO,
};
use tropeiro_domain::{ErpError, Money, PaymentDraft, PaymentMethod, Result};

/// Validate a draft against the title's current open amount.
///
/// Rules are checked in display order and the first violation wins, so the
/// shell always highlights a single field.
///
/// # Errors
///
/// Returns [`ErpError::Validation`] carrying the violated rule's message.
pub fn validate_draft(draft: &PaymentDraft, valor_em_aberto: Money) -> Result<()> {
    if !draft.valor_pago.is_positive() {
        return Err(ErpError::Validation(MSG_VALOR_PAGO_ZERO.to_string()));
    }
    if draft.valor_pago > valor_em_aberto {
        return Err(ErpError::Validation(MSG_VALOR_PAGO_EXCEDE.to_string()));
    }

    let liquido = draft.valor_liquido();
    if liquido.is_negative() {
        return Err(ErpError::Validation(MSG_DESCONTO_EXCEDE.to_string()));
    }
    if liquido > valor_em_aberto {
        return Err(ErpError::Validation(MSG_LIQUIDO_EXCEDE.to_string()));
    }

    if draft.metodo == PaymentMethod::Cheque
        && (draft.cheques.is_empty() || draft.total_cheques() != draft.valor_pago)
    {
        return Err(ErpError::Validation(MSG_CHEQUES_DIVERGEM.to_string()));
    }

    Ok(())
}
