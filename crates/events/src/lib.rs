//! Change notifications.
//!
//! Mechanics only: the `Event` trait, a synchronous pub/sub `EventBus`, and
//! an in-memory implementation. Concrete event types live with the code that
//! emits them (see `pharmademand-inventory`).

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
