#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Daily long/short portfolio construction for sotavento.
//!
//! Two stages run once per simulated trading day:
//!
//! 1. the [`Selector`] ranks the day's predictions into a top-K long bucket
//!    and a bottom-K short bucket, partitioned by score sign;
//! 2. the [`Allocator`] converts the buckets into equal-weight target
//!    allocations behind a minimum-position gate, flattening previously
//!    held assets that dropped out of selection.
//!
//! Both stages are pure functions of their inputs; the only state threaded
//! between days — the previously-held asset set — is owned by the caller
//! and passed in explicitly.

pub mod allocator;
pub mod selector;

pub use allocator::{Allocator, AllocatorConfig, TargetAllocation};
pub use selector::{DailySelection, Selector, SelectorConfig};
