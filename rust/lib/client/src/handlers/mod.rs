//! Page controllers.
//!
//! Each handler is a free async function over the [`App`](crate::App)
//! context. Handlers never return gateway errors: failures end up in the
//! page's view state (inline) or as a [`Notice`](crate::route::Notice).

pub mod add_novel;
pub mod auth;
pub mod categories;
pub mod collections;
pub mod home;
pub mod novels;
