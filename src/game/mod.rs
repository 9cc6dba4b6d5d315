// Game module - screen lifecycle and the main loop
//
// This module contains:
// - types.rs: StateId and the GameInfo shared between screens
// - state_machine.rs: the State trait and the machine that switches screens
// - control.rs: the frame loop driving the machine

pub mod control;
pub mod state_machine;
pub mod types;

pub use control::Control;
pub use state_machine::{State, StateCore, StateMachine};
pub use types::*;
