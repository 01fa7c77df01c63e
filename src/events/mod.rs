//! Lifecycle notifications fired by the executor.
//!
//! The executor always goes through an [`EventDispatcher`]. Without listeners
//! the [`NoopDispatcher`] hands every event straight back.

mod dispatcher;
mod event;

pub use dispatcher::{EventDispatcher, Listener, ListenerDispatcher, NoopDispatcher};
pub use event::LifecycleEvent;
