//! Completion provider abstractions for Parlance.
//!
//! This module defines the `CompletionProvider` trait that backend
//! adapters implement, and the type-erased `BoxCompletionProvider`
//! wrapper used wherever runtime provider selection is needed.

pub mod box_provider;
pub mod provider;
