//! Transient text effects drawn over the creature
//!
//! Effects are computed as plain glyph lists so hosts without a screen can
//! inspect them; `Renderer` is the seam a display driver implements.

use crate::behaviors::behavior::Behavior;
use crate::behaviors::catalog::BehaviorKind;
use crate::core::types::{Color, Vec2};

/// One piece of text at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Glyph {
    fn new(text: &'static str, x: i32, y: i32, color: Color) -> Self {
        Self { text, x, y, color }
    }
}

/// Anything that can put text on screen
pub trait Renderer {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

/// Glyphs for `behavior` around a creature centered at `center`
pub fn effect_glyphs(behavior: &Behavior, center: Vec2, mirrored: bool) -> Vec<Glyph> {
    if !behavior.is_active() {
        return Vec::new();
    }
    let cx = center.x as i32;
    let cy = center.y as i32;
    let side = |toward: i32, away: i32| if mirrored { toward } else { away };
    let t = behavior.phase_timer();
    let phase = behavior.phase().unwrap_or_default();

    match behavior.kind() {
        BehaviorKind::Sleeping if phase == "sleeping" => (0..4)
            .map(|i| {
                let wave = (t * 3.0 - i as f32 * 0.8).sin() * 3.0;
                let x = cx + side(20, -20) + i * 8;
                let y = ((cy - 35 - 2 * i) as f32 + wave) as i32;
                Glyph::new("z", x, y, Color::White)
            })
            .collect(),
        BehaviorKind::Napping if phase == "napping" => {
            let i = (t * 1.5) as i32 % 3;
            let wave = (t * 2.5).sin() * 2.5;
            let x = cx + side(15, -15) + i * 6;
            let y = ((cy - 25) as f32 + wave) as i32;
            vec![Glyph::new("z", x, y, Color::White)]
        }
        BehaviorKind::Vocalizing if phase == "vocalizing" => {
            vec![Glyph::new("~", cx + side(15, -15), cy - 30, Color::White)]
        }
        BehaviorKind::Playing if behavior.has_bubble() => {
            vec![Glyph::new("!", cx + side(10, -12), cy - 28, Color::Yellow)]
        }
        BehaviorKind::Chattering if phase == "chattering" => {
            // Blinks at 4 Hz
            if (t * 8.0) as i32 % 2 == 0 {
                vec![Glyph::new("...", cx + side(5, -20), cy - 20, Color::White)]
            } else {
                Vec::new()
            }
        }
        BehaviorKind::BeingGroomed if phase == "enjoying" => {
            vec![Glyph::new("<3", cx + side(10, -20), cy - 28, Color::Red)]
        }
        BehaviorKind::Affection => {
            vec![Glyph::new("<3", cx + side(10, -20), cy - 30, Color::Red)]
        }
        BehaviorKind::Attention => {
            vec![Glyph::new("?", cx + side(10, -12), cy - 30, Color::Yellow)]
        }
        _ => Vec::new(),
    }
}

/// Draw `behavior`'s effects through `renderer`
pub fn draw_effects(behavior: &Behavior, renderer: &mut dyn Renderer, center: Vec2, mirrored: bool) {
    for glyph in effect_glyphs(behavior, center, mirrored) {
        renderer.draw_text(glyph.text, glyph.x, glyph.y, glyph.color);
    }
}
