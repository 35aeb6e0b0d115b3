use crate::coords::{Rect, Transform};
use crate::paint::Color;

/// Everything `save`/`restore` captures.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    pub transform: Transform,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Clip rect in device space; `None` draws unclipped.
    pub scissor: Option<Rect>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: Color::WHITE,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            scissor: None,
        }
    }
}

/// The active draw state plus the saved ones beneath it.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    #[inline]
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved state. No-op on an empty stack.
    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    /// Back to the default state with nothing saved.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutate(s: &mut DrawState, k: f32) {
        s.transform.translate(k, -k);
        s.transform.rotate(k * 0.1);
        s.fill = Color::rgb(k, 0.0, 0.0);
        s.stroke_width = k;
        s.scissor = Some(Rect::new(k, k, 10.0, 10.0));
    }

    #[test]
    fn matched_save_restore_round_trips() {
        let mut stack = StateStack::default();
        mutate(stack.current_mut(), 0.5);
        let before = *stack.current();

        for k in 1..6 {
            stack.save();
            mutate(stack.current_mut(), k as f32);
        }
        for _ in 1..6 {
            stack.restore();
        }

        assert_eq!(*stack.current(), before);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn excess_restore_is_a_no_op() {
        let mut stack = StateStack::default();
        stack.save();
        mutate(stack.current_mut(), 2.0);
        stack.restore();
        let settled = *stack.current();

        stack.restore();
        stack.restore();
        assert_eq!(*stack.current(), settled);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn reset_drops_saved_states() {
        let mut stack = StateStack::default();
        stack.save();
        stack.save();
        mutate(stack.current_mut(), 3.0);
        stack.reset();
        assert_eq!(*stack.current(), DrawState::default());
        assert_eq!(stack.depth(), 0);
    }
}
