//! Four-level RPN operand stack
//!
//! Slots are X (index 0), Y, Z and T (index 3). The stack never grows or
//! shrinks: a push drops T, a pop duplicates T.

use serde::Serialize;

use crate::value::Value;

pub const STACK_DEPTH: usize = 4;

/// X/Y/Z/T operand stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    slots: [Value; STACK_DEPTH],
}

/// Read-only copy of the stack for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackSnapshot {
    pub x: Value,
    pub y: Value,
    pub z: Value,
    pub t: Value,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> Value {
        self.slots[0]
    }

    pub fn y(&self) -> Value {
        self.slots[1]
    }

    /// Overwrite X without lifting
    pub fn set_x(&mut self, value: Value) {
        self.slots[0] = value;
    }

    /// Lift: T is lost, every other slot moves up, `value` becomes X
    pub fn push(&mut self, value: Value) {
        self.slots.rotate_right(1);
        self.slots[0] = value;
    }

    /// Drop: returns X, shifts Y/Z/T down and leaves a copy of T in T
    pub fn pop(&mut self) -> Value {
        let x = self.slots[0];
        self.slots.rotate_left(1);
        self.slots[STACK_DEPTH - 1] = self.slots[STACK_DEPTH - 2];
        x
    }

    /// R↓: `[x, y, z, t]` becomes `[y, z, t, x]`
    pub fn roll_down(&mut self) {
        self.slots.rotate_left(1);
    }

    /// x<>y
    pub fn swap_xy(&mut self) {
        self.slots.swap(0, 1);
    }

    pub fn clear(&mut self) {
        self.slots = [Value::ZERO; STACK_DEPTH];
    }

    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            x: self.slots[0],
            y: self.slots[1],
            z: self.slots[2],
            t: self.slots[3],
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn v(n: i64) -> Value {
        Value::from(n)
    }

    fn stack_of(values: [i64; 4]) -> Stack {
        let mut stack = Stack::new();
        for n in values.iter().rev() {
            stack.push(v(*n));
        }
        stack
    }

    fn values(stack: &Stack) -> [Value; 4] {
        let s = stack.snapshot();
        [s.x, s.y, s.z, s.t]
    }

    #[test]
    fn test_push_drops_t() {
        let mut stack = stack_of([1, 2, 3, 4]);
        stack.push(v(9));
        assert_eq!(values(&stack), [9, 1, 2, 3].map(v));
    }

    #[test]
    fn test_pop_duplicates_t() {
        let mut stack = stack_of([1, 2, 3, 4]);
        assert_eq!(stack.pop(), v(1));
        assert_eq!(values(&stack), [2, 3, 4, 4].map(v));
    }

    #[test]
    fn test_push_then_pop_round_trip() {
        let mut stack = stack_of([1, 2, 3, 4]);
        stack.push(v(9));
        assert_eq!(stack.pop(), v(9));
        // T was lost on the push and the old Z is duplicated in its place
        assert_eq!(values(&stack), [1, 2, 3, 3].map(v));
    }

    #[test]
    fn test_roll_down_rotates() {
        let mut stack = stack_of([1, 2, 3, 4]);
        stack.roll_down();
        assert_eq!(values(&stack), [2, 3, 4, 1].map(v));
        for _ in 0..3 {
            stack.roll_down();
        }
        assert_eq!(values(&stack), [1, 2, 3, 4].map(v));
    }

    #[test]
    fn test_swap_touches_only_x_and_y() {
        let mut stack = stack_of([1, 2, 3, 4]);
        stack.swap_xy();
        assert_eq!(values(&stack), [2, 1, 3, 4].map(v));
    }

    #[test]
    fn test_clear() {
        let mut stack = stack_of([1, 2, 3, 4]);
        stack.clear();
        assert_eq!(values(&stack), [Value::ZERO; 4]);
    }
}
