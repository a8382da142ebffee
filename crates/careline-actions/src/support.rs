// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support tickets. A ticket is an audit row tagged `support_ticket`.

use careline_core::{CarelineError, DomainStore, NewLogEntry};
use tracing::info;

use crate::context::{ActionContext, ActionOutcome, SlotEvent, filled, slot};
use crate::outage::describe;
use crate::phone::{INVALID_PHONE_MESSAGE, is_valid_phone};

/// Raises a support ticket for the customer's phone.
///
/// The phone comes from `phone`, else `support_phone`. On rejection only
/// `support_phone` is cleared; `phone` belongs to other flows.
pub async fn support_ticket(
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    let phone = filled(&ctx.slots.phone)
        .or_else(|| filled(&ctx.slots.support_phone))
        .filter(|p| is_valid_phone(p));
    let Some(phone) = phone else {
        return Ok(ActionOutcome::reply(INVALID_PHONE_MESSAGE)
            .with_event(SlotEvent::clear(slot::SUPPORT_PHONE)));
    };

    let description = describe(&ctx.slots.ticket_description, ctx);
    let entry = NewLogEntry::info(format!("Support ticket for {phone}: {description}"))
        .with_service("support_ticket")
        .with_phone(phone);

    let id = store.append_log(&entry).await?;
    info!(sender = %ctx.sender_id, ticket_id = id, "support ticket raised");

    Ok(ActionOutcome::reply(format!(
        "Support ticket raised for {description}. Our team will contact you at {phone} soon!"
    )))
}
