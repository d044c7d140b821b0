//! Core domain: the timed state machine shared by every actor.

/// A single active state, the time spent in it, and a sticky facing flag.
///
/// The timer counts up in milliseconds and is zeroed together with every
/// state change, so `timer_ms` always means "time since entering `state`".
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState<S> {
    state: S,
    timer_ms: f32,
    facing_right: bool,
}

impl<S: Copy + PartialEq> ActorState<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            timer_ms: 0.0,
            facing_right: true,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn is(&self, state: S) -> bool {
        self.state == state
    }

    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Enter `next`, resetting the timer. Re-entering the current state also resets it.
    pub fn transition(&mut self, next: S) {
        self.state = next;
        self.timer_ms = 0.0;
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.timer_ms += dt_ms.max(0.0);
    }

    /// Jump the timer forward without leaving the state.
    pub fn skip_to(&mut self, timer_ms: f32) {
        self.timer_ms = self.timer_ms.max(timer_ms);
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// +1.0 when facing right, -1.0 when facing left.
    pub fn facing_sign(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }

    /// Derive facing from horizontal velocity; zero keeps the previous facing.
    pub fn update_facing(&mut self, vx: f32) {
        if vx > 0.0 {
            self.facing_right = true;
        } else if vx < 0.0 {
            self.facing_right = false;
        }
    }
}

/// Sign of `delta` with zero treated as positive.
pub fn direction_of(delta: f32) -> f32 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}
