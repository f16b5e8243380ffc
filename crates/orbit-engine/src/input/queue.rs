/// Pointer events in world coordinates, already translated by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
}

impl InputEvent {
    /// World position carried by the event.
    pub fn position(&self) -> glam::Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => glam::Vec2::new(x, y),
        }
    }
}

/// A queue of input events.
/// The host pushes events between frames; the runner drains them into
/// exactly one game step.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move all pending events into a fresh queue.
    pub fn take(&mut self) -> InputQueue {
        InputQueue {
            events: self.drain(),
        }
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerUp { x: 12.0, y: 22.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn take_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 200.0, y: 300.0 });
        q.push(InputEvent::PointerMove { x: 250.0, y: 320.0 });
        let taken = q.take();
        assert!(q.is_empty());
        let positions: Vec<_> = taken.iter().map(|e| e.position()).collect();
        assert_eq!(positions, vec![glam::Vec2::new(200.0, 300.0), glam::Vec2::new(250.0, 320.0)]);
    }
}
