//! Godot bridge для FPS player controller
//!
//! `FpsPlayer` (CharacterBody3D) владеет `MovementController` из simulation crate
//! и реализует `PlayerHost` поверх Godot scene tree.

use godot::prelude::*;

mod convert;
mod host;
mod logger;
mod player;

/// GDExtension entry point
struct FpsPlayerExtension;

#[gdextension]
unsafe impl ExtensionLibrary for FpsPlayerExtension {}
