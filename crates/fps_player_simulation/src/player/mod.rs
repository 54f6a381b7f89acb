//! Player domain — состояние и контроллер first-person игрока
//!
//! Содержит:
//! - Player (marker component)
//! - ControllerState (velocity, vertical velocity, yaw, pitch)
//! - MovementController (look, movement, shooting, pointer capture)

pub mod controller;
pub mod state;


pub use controller::*;
pub use state::*;
