//! Pointer input state tracking

use std::collections::HashSet;

use crate::core::types::Vec2;

/// Pointer buttons the views react to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw pointer event in surface pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Moved { x: f32, y: f32 },
    Pressed { x: f32, y: f32, button: PointerButton },
    Released { x: f32, y: f32, button: PointerButton },
    /// Positive values zoom out
    Wheel { delta: f32 },
    /// Pointer left the surface
    Left,
}

/// Tracks pointer position and buttons for one view
#[derive(Debug, Default)]
pub struct PointerState {
    /// Current position, `None` while outside the surface
    position: Option<Vec2>,
    /// Currently pressed buttons
    buttons: HashSet<PointerButton>,
    /// Buttons pressed this frame
    just_pressed: HashSet<PointerButton>,
    /// Buttons released this frame
    just_released: HashSet<PointerButton>,
    /// Movement since last frame
    delta: Vec2,
    /// Wheel movement since last frame
    wheel: f32,
    /// Events are dropped once detached
    detached: bool,
}

impl PointerState {
    /// Create new pointer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event
    pub fn process_event(&mut self, event: &PointerEvent) {
        if self.detached {
            return;
        }
        match *event {
            PointerEvent::Moved { x, y } => self.move_to(x, y),
            PointerEvent::Pressed { x, y, button } => {
                self.move_to(x, y);
                if self.buttons.insert(button) {
                    self.just_pressed.insert(button);
                }
            }
            PointerEvent::Released { x, y, button } => {
                self.move_to(x, y);
                if self.buttons.remove(&button) {
                    self.just_released.insert(button);
                }
            }
            PointerEvent::Wheel { delta } => self.wheel += delta,
            PointerEvent::Left => {
                self.position = None;
                for button in self.buttons.drain() {
                    self.just_released.insert(button);
                }
            }
        }
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let next = Vec2::new(x, y);
        if let Some(prev) = self.position {
            self.delta += next - prev;
        }
        self.position = Some(next);
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.delta = Vec2::ZERO;
        self.wheel = 0.0;
    }

    /// Stop listening: forget everything and ignore further events
    pub fn detach(&mut self) {
        *self = Self { detached: true, ..Self::default() };
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn any_pressed(&self) -> bool {
        !self.buttons.is_empty()
    }

    pub fn just_pressed(&self, button: PointerButton) -> bool {
        self.just_pressed.contains(&button)
    }

    pub fn just_released(&self, button: PointerButton) -> bool {
        self.just_released.contains(&button)
    }

    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn wheel_delta(&self) -> f32 {
        self.wheel
    }
}
