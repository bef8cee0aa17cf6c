//! `memberhub-core`: shared primitives for the MemberHub dashboard core.
//!
//! This crate contains **pure** building blocks (no IO, no UI concerns):
//! identifiers, the error vocabulary and a clock seam for time-driven logic.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, DomainError, DomainResult};
pub use id::MemberId;
