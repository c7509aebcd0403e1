//! Deterministic simulation module
//!
//! All widget logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The wasm shell in `main.rs` owns the timing (settle delay, animation
//! frames); everything here advances only when called.

pub mod confetti;
pub mod spin;

pub use confetti::{ConfettiColor, ConfettiParticle, ConfettiSim};
pub use spin::{SpinPlan, WheelPhase, WheelState, resolve_prize};
