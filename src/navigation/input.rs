//! Input adapters
//!
//! Each adapter turns one kind of raw input into an [`Intent`]. None of them
//! hold navigation state; the [`InputRouter`] applies intents to a
//! [`SectionNavigator`] after gating them on the viewport width.

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use super::SectionNavigator;
use super::clock::Clock;

/// A navigation request produced by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
}

impl Intent {
    /// Apply this intent, returning whether a transition was accepted
    pub fn apply<C: Clock>(self, navigator: &mut SectionNavigator<C>) -> bool {
        match self {
            Intent::Next => navigator.next(),
            Intent::Previous => navigator.prev(),
            Intent::First => navigator.first(),
            Intent::Last => navigator.last(),
            Intent::GoTo(index) => navigator.go_to(index),
        }
    }
}

/// Viewport dimensions in CSS-pixel-like units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Thresholds that decide which adapters are live
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputThresholds {
    /// Widths at or above this count as desktop (wheel on, swipe off)
    pub desktop_min_width: u32,
    /// Minimum vertical travel, exclusive, for a touch to count as a swipe
    pub swipe_min_distance: f32,
}

impl Default for InputThresholds {
    fn default() -> Self {
        Self { desktop_min_width: 768, swipe_min_distance: 50.0 }
    }
}

impl InputThresholds {
    pub fn is_desktop(&self, viewport: Viewport) -> bool {
        viewport.width >= self.desktop_min_width
    }
}

/// Map a wheel delta to an intent (positive = scrolling down)
pub fn wheel_to_intent(delta_y: f32) -> Option<Intent> {
    if delta_y > 0.0 {
        Some(Intent::Next)
    } else if delta_y < 0.0 {
        Some(Intent::Previous)
    } else {
        None
    }
}

/// Map a navigation key to an intent
pub fn key_to_intent(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::Down | KeyCode::PageDown | KeyCode::Char(' ') => Some(Intent::Next),
        KeyCode::Up | KeyCode::PageUp => Some(Intent::Previous),
        KeyCode::Home => Some(Intent::First),
        KeyCode::End => Some(Intent::Last),
        _ => None,
    }
}

/// Tracks a single touch from start to end
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_y: Option<f32>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, y: f32) {
        self.start_y = Some(y);
    }

    /// Finish the touch and classify it
    ///
    /// Finger moving up (start below end on screen) advances. A touch end
    /// without a recorded start yields nothing.
    pub fn touch_end(&mut self, y: f32, min_distance: f32) -> Option<Intent> {
        let start = self.start_y.take()?;
        let delta = start - y;
        if delta.abs() <= min_distance {
            return None;
        }
        Some(if delta > 0.0 { Intent::Next } else { Intent::Previous })
    }

    /// Drop any pending touch (e.g. when swipes get disabled mid-gesture)
    pub fn cancel(&mut self) {
        self.start_y = None;
    }
}

/// Routes raw input to a navigator according to the viewport
#[derive(Debug, Clone)]
pub struct InputRouter {
    thresholds: InputThresholds,
    viewport: Viewport,
    swipe: SwipeTracker,
}

impl InputRouter {
    pub fn new(thresholds: InputThresholds, viewport: Viewport) -> Self {
        Self { thresholds, viewport, swipe: SwipeTracker::default() }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn thresholds(&self) -> &InputThresholds {
        &self.thresholds
    }

    /// Update the viewport after a resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.wheel_enabled() {
            self.swipe.cancel();
        }
    }

    pub fn wheel_enabled(&self) -> bool {
        self.thresholds.is_desktop(self.viewport)
    }

    pub fn swipe_enabled(&self) -> bool {
        !self.thresholds.is_desktop(self.viewport)
    }

    pub fn wheel<C: Clock>(&mut self, delta_y: f32, navigator: &mut SectionNavigator<C>) -> bool {
        if !self.wheel_enabled() {
            return false;
        }
        wheel_to_intent(delta_y).is_some_and(|intent| intent.apply(navigator))
    }

    pub fn touch_start(&mut self, y: f32) {
        if self.swipe_enabled() {
            self.swipe.touch_start(y);
        }
    }

    pub fn touch_end<C: Clock>(&mut self, y: f32, navigator: &mut SectionNavigator<C>) -> bool {
        if !self.swipe_enabled() {
            return false;
        }
        self.swipe
            .touch_end(y, self.thresholds.swipe_min_distance)
            .is_some_and(|intent| intent.apply(navigator))
    }

    pub fn key<C: Clock>(&mut self, key: KeyCode, navigator: &mut SectionNavigator<C>) -> bool {
        key_to_intent(key).is_some_and(|intent| intent.apply(navigator))
    }

    /// Explicit jump from an indicator; always active
    pub fn indicator<C: Clock>(&mut self, index: usize, navigator: &mut SectionNavigator<C>) -> bool {
        Intent::GoTo(index).apply(navigator)
    }
}
