// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging transports (WhatsApp via a carrier gateway).

use std::collections::HashMap;

use crate::error::CarelineError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundMessage, OutboundReply, ReplyFragment};

/// Translates between a messaging channel's webhook format and Careline's
/// internal request/reply types.
///
/// Parsing and formatting are synchronous and side-effect free; the gateway
/// owns all I/O.
pub trait ChannelAdapter: PluginAdapter {
    /// Media type of the documents produced by [`format_outbound`](Self::format_outbound).
    fn content_type(&self) -> &'static str;

    /// Extracts the sender and message text from a decoded webhook payload.
    ///
    /// Fails with [`CarelineError::MalformedPayload`] when a required field is absent.
    fn parse_inbound(
        &self,
        fields: &HashMap<String, String>,
    ) -> Result<InboundMessage, CarelineError>;

    /// Renders reply fragments into the channel's wire document, returning
    /// the displayed text alongside it.
    ///
    /// An empty fragment list is rendered as the fallback reply, never as an
    /// empty document.
    fn format_outbound(&self, fragments: &[ReplyFragment]) -> OutboundReply;

    /// The canned reply used when the intent engine returns nothing usable.
    fn fallback_fragment(&self, recipient_id: &str) -> ReplyFragment;
}
