//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation time in seconds
pub type Seconds = f32;

/// Behavior priority. Lower values are more urgent.
pub type Priority = i32;

/// 2D position in screen space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Display colors used by transient effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Yellow,
}
