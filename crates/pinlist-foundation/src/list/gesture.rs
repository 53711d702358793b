//! Touch arbitration between the list and its gesture handlers.
//!
//! Script-side handlers can force the list to consume or to intercept the
//! current gesture. Both flags are tri-state: `None` leaves the decision to
//! the platform's default behaviour. They only take effect when the new
//! gesture system is enabled.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// Result of a touch hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchDecision {
    /// Answer the platform with this value without running the default path.
    Handled(bool),
    /// Fall through to the platform's default handling.
    Default,
}

/// What to do with an event arriving at `dispatch_touch_event`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Dispatch the event, possibly rewritten, along the default path.
    Dispatch(TouchAction),
    /// Report the event as handled without dispatching it.
    Absorb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchOutcome {
    pub decision: TouchDecision,
    /// A request to the parent about intercepting, when one should be made.
    pub disallow_parent_intercept: Option<bool>,
}

impl TouchOutcome {
    const DEFAULT: TouchOutcome = TouchOutcome {
        decision: TouchDecision::Default,
        disallow_parent_intercept: None,
    };

    fn handled(value: bool) -> Self {
        TouchOutcome {
            decision: TouchDecision::Handled(value),
            disallow_parent_intercept: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GestureGate {
    enable_new_gesture: bool,
    include_native_gesture: bool,
    consume_gesture: Option<bool>,
    intercept_gesture: Option<bool>,
    down_event_handled: bool,
}

impl Default for GestureGate {
    fn default() -> Self {
        Self {
            enable_new_gesture: false,
            include_native_gesture: true,
            consume_gesture: None,
            intercept_gesture: None,
            down_event_handled: false,
        }
    }
}

impl GestureGate {
    pub fn new(enable_new_gesture: bool, include_native_gesture: bool) -> Self {
        Self {
            enable_new_gesture,
            include_native_gesture,
            ..Self::default()
        }
    }

    pub fn configure(&mut self, enable_new_gesture: bool, include_native_gesture: bool) {
        self.enable_new_gesture = enable_new_gesture;
        self.include_native_gesture = include_native_gesture;
    }

    pub fn is_enabled(&self) -> bool {
        self.enable_new_gesture
    }

    /// `Some(true)` hands the gesture to the list, `Some(false)` keeps the
    /// list out of it.
    pub fn set_consume_gesture(&mut self, consume: bool) {
        self.consume_gesture = Some(consume);
        if consume {
            self.down_event_handled = false;
        }
    }

    pub fn set_intercept_gesture(&mut self, intercept: bool) {
        self.intercept_gesture = Some(intercept);
    }

    pub fn consume_gesture(&self) -> Option<bool> {
        self.consume_gesture
    }

    pub fn intercept_gesture(&self) -> Option<bool> {
        self.intercept_gesture
    }

    fn not_include_native(&self) -> bool {
        self.enable_new_gesture && !self.include_native_gesture
    }

    /// The list stays out of everything but the DOWN that starts a gesture
    /// it was told not to consume.
    fn rejects(&self, action: TouchAction) -> bool {
        self.enable_new_gesture
            && self.consume_gesture == Some(false)
            && action != TouchAction::Down
    }

    pub fn on_intercept_touch_event(&self, action: TouchAction) -> TouchDecision {
        if self.not_include_native() || self.rejects(action) {
            return TouchDecision::Handled(false);
        }
        if self.enable_new_gesture && self.intercept_gesture == Some(true) {
            return TouchDecision::Handled(true);
        }
        TouchDecision::Default
    }

    pub fn dispatch_touch_event(&mut self, action: TouchAction) -> DispatchOutcome {
        if !self.enable_new_gesture {
            return DispatchOutcome::Dispatch(action);
        }
        if self.consume_gesture == Some(false) {
            return DispatchOutcome::Absorb;
        }
        if action == TouchAction::Move && self.consume_gesture.is_some() && !self.down_event_handled {
            // The list never saw the DOWN of a gesture it now consumes.
            self.down_event_handled = true;
            return DispatchOutcome::Dispatch(TouchAction::Down);
        }
        DispatchOutcome::Dispatch(action)
    }

    pub fn on_touch_event(&mut self, action: TouchAction) -> TouchOutcome {
        if self.not_include_native() || self.rejects(action) {
            return TouchOutcome::handled(false);
        }
        if !self.enable_new_gesture {
            return TouchOutcome::DEFAULT;
        }
        let Some(intercept) = self.intercept_gesture else {
            return TouchOutcome::DEFAULT;
        };
        match action {
            TouchAction::Down => TouchOutcome {
                decision: TouchDecision::Default,
                disallow_parent_intercept: Some(true),
            },
            TouchAction::Move => TouchOutcome {
                decision: if intercept {
                    TouchDecision::Handled(true)
                } else {
                    TouchDecision::Default
                },
                disallow_parent_intercept: Some(intercept),
            },
            TouchAction::Up | TouchAction::Cancel => {
                self.intercept_gesture = None;
                TouchOutcome::DEFAULT
            }
        }
    }
}
