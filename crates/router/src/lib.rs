//! Background notification router for Kopro push delivery.
//!
//! Runs independently of any application window: receives opaque push
//! payloads, renders OS notifications through a [`NotificationShelf`],
//! and routes notification clicks to an open application window (or a
//! new one) through a [`WindowRegistry`]. The host feeds events over a
//! queue and waits on the worker's task tracker, so no unit of work is
//! reclaimed mid-flight.

mod router;
mod shelf;
mod windows;
mod worker;

pub use router::{ClickEvent, NotificationRouter, RouterPhase};
pub use shelf::{NotificationShelf, ShelfError};
pub use windows::{RegistryError, WindowHandle, WindowId, WindowRegistry};
pub use worker::{RouterEvent, RouterWorker};

use std::future::Future;
use std::pin::Pin;

/// A boxed future returned by shelf and registry trait methods.
pub type RouterFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[cfg(test)]
pub(crate) mod support;
