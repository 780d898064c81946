#![allow(dead_code)]

use crate::{map::Vec2, ports::ToneRequest};

/// What the systems may read about the frame being simulated.
#[derive(Clone, Debug, Default)]
pub struct FrameContext {
    pub dt: f32,
    pub time: f64,
    pub sanity: f32,
    pub player: Vec2,
}

/// Everything the systems want the game to do, collected during a dispatch.
#[derive(Clone, Debug, Default)]
pub struct FrameEvents {
    pub sanity_loss: f32,
    pub thoughts: Vec<&'static str>,
    pub shakes: Vec<f32>,
    pub tones: Vec<ToneRequest>,
    pub shadow_touch: bool,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        self.sanity_loss == 0.0
            && self.thoughts.is_empty()
            && self.shakes.is_empty()
            && self.tones.is_empty()
            && !self.shadow_touch
    }
}
