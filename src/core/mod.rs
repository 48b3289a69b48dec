//! # Core Application Logic
//!
//! The request lifecycle and the dashboard's business logic.
//! It knows nothing about terminals or HTTP clients.
//!
//! ```text
//!     ActionRequest ──→ AsyncActionController ──→ Transport (api)
//!                              │
//!                    PresentationHooks calls
//!                              │
//!            ┌─────────────────┴─────────────────┐
//!            ▼                                   ▼
//!     ┌────────────┐                      ┌────────────┐
//!     │    CLI     │                      │    TUI     │
//!     │  (stdout)  │                      │ Action →   │
//!     │            │                      │ update()   │
//!     └────────────┘                      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`request`]: What to send and how to read the reply
//! - [`outcome`]: Lifecycle states, payloads and failure kinds
//! - [`controller`]: One-in-flight-at-a-time triggering with hooks
//! - [`confirm`]: Confirmation gates for destructive actions
//! - [`config`]: Settings with defaults → file → env → CLI override
//! - [`validate`]: Required, email and password rules for form input
//! - [`state`]: The `Dashboard` struct, all dashboard state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod outcome;
pub mod request;
pub mod state;
pub mod validate;
