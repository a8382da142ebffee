// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP mediation layer for the Careline chat bridge.
//!
//! Routes:
//! - `POST /chat` direct JSON chat against the intent engine
//! - `POST /whatsapp` carrier webhook, answered with a TwiML document
//! - `POST /webhook` action server called back by the intent engine
//! - `GET /`, `POST /add-user`, `GET /health` admin and liveness

pub mod error;
pub mod handlers;
pub mod server;
pub mod trail;

pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
pub use trail::AuditTrail;
