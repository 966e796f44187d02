//! Flux: path-addressed UI state with synchronous pub/sub.
//!
//! The client keeps every piece of view state (session, current route,
//! notices, page lists) at a path in one [`StateStore`]. Front-ends render
//! from it and learn about changes by subscribing.
//!
//! # Path Addressing
//!
//! Paths use `/` as separator: `auth/state`, `app/route`, `app/notice`,
//! `page/collections`.
//!
//! # Patterns
//!
//! Subscriptions use MQTT-style wildcards:
//! - Exact: `auth/state`
//! - Single-level: `app/+` matches `app/route`, `app/notice`
//! - Multi-level: `page/#` matches everything under `page/`
//! - All: `#`
//!
//! # Example
//!
//! ```ignore
//! let store = StateStore::new();
//! store.subscribe("app/notice", |_, value| {
//!     if let Some(n) = value.downcast_ref::<Notice>() {
//!         println!("{}", n.message);
//!     }
//! });
//! store.put(Notice::success("saved"));
//! ```

pub mod pattern;
pub mod store;
pub mod value;

pub use store::{ChangeHandler, State, StateStore};
pub use value::{StateValue, SubscriptionId};
