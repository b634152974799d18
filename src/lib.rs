//! # Mediator Pattern: Order Form Coordinator
//!
//! Field components of a delivery order form never call each other. Each one
//! reports a [`mediator::FormEvent`] to a single coordinator, which applies
//! the cross-field rules:
//!
//! - picking a date refreshes the available time slots
//! - "recipient is another person" shows or hides the name and phone fields
//! - "pickup" clears the slots and hides the recipient fields
//!
//! Run the built-in demonstration with:
//! ```bash
//! cargo run --bin order_form
//! cargo run --bin order_form -- scenario.toml --json
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod mediator;
pub mod scenario;
pub mod trace;

pub use components::ComponentId;
pub use config::SlotRules;
pub use error::{ConfigError, FormError};
pub use mediator::{EventKind, FormEvent, FormState, Mediator, OrderFormMediator};
pub use scenario::{OrderForm, Scenario, Step};
pub use trace::{ConsoleTrace, RecordingTrace, TraceLine, TraceSink, TraceSource};
