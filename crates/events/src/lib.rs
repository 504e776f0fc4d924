//! `isoforge-events` — domain-agnostic event plumbing.
//!
//! Events describe facts about organizations (registered, profile updated,
//! deleted). This crate carries the mechanics only: the `Event` contract, the
//! envelope that wraps a payload with stream metadata, and a lightweight
//! pub/sub bus for distributing envelopes to consumers.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
