//! Execution pipeline building blocks.
//!
//! validate ([`ValidationChain`]) → pay ([`CostCalculator`]) → apply effects
//! ([`EffectHandlerRegistry`]) → post-process ([`CooldownLedger`],
//! [`UsageLedger`], [`ExecutionHistory`]).
//!
//! The engine façade in [`crate::engine`] wires these together; each piece is
//! usable and testable on its own.

mod context;
mod cooldown;
mod cost;
mod executor;
pub mod handlers;
mod history;
mod result;
mod usage;
pub mod validation;

pub use context::{ExecuteOptions, ExecutionContext, Timestamp};
pub use cooldown::{CooldownEntry, CooldownLedger};
pub use cost::{CostCalculator, CostError, PaymentReceipt};
pub use executor::{ExecutionError, ExecutionOutcome, ExecutionScope, Executor};
pub use handlers::{
    EffectContext, EffectError, EffectHandler, EffectHandlerRegistry, EffectOutcome,
    EffectSchedule, ScheduledEffect,
};
pub use history::{ExecutionHistory, ExecutionRecord};
pub use result::{EffectResult, EffectStatus, ExecutionResult, ReasonCode, ValidationOutcome};
pub use usage::{UsageEntry, UsageLedger};
pub use validation::{ValidationChain, ValidationContext, Validator};
