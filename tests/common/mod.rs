//! Shared helpers for the integration tests.
//!
//! `RecordingSurface` stands in for a real screen: it keeps every draw call
//! so tests can inspect what a frame rendered.

#![allow(dead_code)]

use std::convert::Infallible;

use grid_shooter::config::GameConfig;
use grid_shooter::entities::{Rect, World};
use grid_shooter::render::{Color, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Fill(Rect, Color),
    Text(String, Color),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn fills(&self, color: Color) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fill(_, col) if *col == color))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Infallible> {
        self.calls.push(DrawCall::Fill(rect, color));
        Ok(())
    }

    fn draw_text(&mut self, _x: f32, _y: f32, text: &str, color: Color) -> Result<(), Infallible> {
        self.calls.push(DrawCall::Text(text.to_string(), color));
        Ok(())
    }
}

pub fn default_world() -> World {
    World::new(&GameConfig::default())
}

/// Default world with the formation frozen in place, so tests can aim
/// without chasing a moving grid.
pub fn still_world() -> World {
    let mut config = GameConfig::default();
    config.enemies.speed = 0.0;
    World::new(&config)
}
