//! heatpump-registry: voice-command catalog and register-level actions
//! for a Kronoterm heat pump
//!
//! The [`ActionRegistry`] owns the template-to-action table; executing an
//! action goes through the [`RegisterAccess`] trait so the Modbus (or any
//! other) transport stays outside this crate.

mod actions;
mod error;
mod registers;
mod registry;
mod traits;

pub use actions::{
    degrees_accusative, degrees_nominative, DhwMode, HeatPumpAction, LoopMode, Regime,
};
pub use error::{RegisterError, RegistryError};
pub use registers::{sign_extend, HeatingLoop, RegisterAddress};
pub use registry::ActionRegistry;
pub use traits::RegisterAccess;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockRegisters;
