//! Infrastructure wiring: state assembly from configuration.

pub mod state;
