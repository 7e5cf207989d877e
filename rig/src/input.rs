//! Logical input actions, trigger phases and bindings.
//!
//! Device mapping is the host's job. The host samples each logical action once
//! per frame, runs the sample through a [`TriggerTracker`] to obtain a phased
//! [`InputEvent`], and hands it to [`InputBindings::dispatch`], which forwards
//! only the (action, phase) pairs the pawn subscribed to.

use nalgebra::Vector2;

use crate::{
    host::{Frame, Pawn},
    utils::{is_nearly_zero, is_nearly_zero2},
};

/// The four logical controls of a motion rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RigAction {
    /// 2D: x = strafe right, y = forward.
    Move,
    /// 2D: x = yaw rate, y = pitch rate.
    Look,
    /// 1D: lean left (-1) / lean right (+1).
    Tilt,
    /// 1D: descend (-1) / ascend (+1).
    Ascend,
}

impl RigAction {
    pub const ALL: [RigAction; 4] = [
        RigAction::Move,
        RigAction::Look,
        RigAction::Tilt,
        RigAction::Ascend,
    ];

    #[inline]
    const fn index(self) -> usize {
        match self {
            RigAction::Move => 0,
            RigAction::Look => 1,
            RigAction::Tilt => 2,
            RigAction::Ascend => 3,
        }
    }
}

/// Phase of an action's trigger lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    /// First frame the action left its dead-zone.
    Started,
    /// Every following frame it stays outside the dead-zone.
    Ongoing,
    /// The action returned to rest (or was cancelled). Carries a zero value.
    Completed,
}

impl TriggerPhase {
    pub const ALL: [TriggerPhase; 3] = [
        TriggerPhase::Started,
        TriggerPhase::Ongoing,
        TriggerPhase::Completed,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            TriggerPhase::Started => 1 << 0,
            TriggerPhase::Ongoing => 1 << 1,
            TriggerPhase::Completed => 1 << 2,
        }
    }
}

/// A sampled axis value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisValue {
    Axis1(f32),
    Axis2(Vector2<f32>),
}

impl AxisValue {
    #[inline]
    pub fn is_rest(&self) -> bool {
        match *self {
            AxisValue::Axis1(v) => is_nearly_zero(v),
            AxisValue::Axis2(v) => is_nearly_zero2(v),
        }
    }

    /// Same shape, zero magnitude.
    #[inline]
    pub fn zeroed(&self) -> Self {
        match self {
            AxisValue::Axis1(_) => AxisValue::Axis1(0.0),
            AxisValue::Axis2(_) => AxisValue::Axis2(Vector2::zeros()),
        }
    }

    /// Scalar view; 2D values collapse to their y component.
    #[inline]
    pub fn as_axis1(&self) -> f32 {
        match *self {
            AxisValue::Axis1(v) => v,
            AxisValue::Axis2(v) => v.y,
        }
    }

    /// 2D view; scalars land on the y component.
    #[inline]
    pub fn as_axis2(&self) -> Vector2<f32> {
        match *self {
            AxisValue::Axis1(v) => Vector2::new(0.0, v),
            AxisValue::Axis2(v) => v,
        }
    }
}

/// One phased input sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub action: RigAction,
    pub phase: TriggerPhase,
    pub value: AxisValue,
}

/// Turns raw per-frame samples of one action into phased events.
#[derive(Clone, Copy, Debug)]
pub struct TriggerTracker {
    action: RigAction,
    active: Option<AxisValue>,
}

impl TriggerTracker {
    pub fn new(action: RigAction) -> Self {
        Self {
            action,
            active: None,
        }
    }

    pub fn action(&self) -> RigAction {
        self.action
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Feed this frame's sample. Returns an event unless the action is idle and stays idle.
    pub fn update(&mut self, value: AxisValue) -> Option<InputEvent> {
        let phase = match (self.active.is_some(), value.is_rest()) {
            (false, true) => return None,
            (false, false) => TriggerPhase::Started,
            (true, false) => TriggerPhase::Ongoing,
            (true, true) => TriggerPhase::Completed,
        };

        let value = if phase == TriggerPhase::Completed {
            self.active = None;
            value.zeroed()
        } else {
            self.active = Some(value);
            value
        };

        Some(InputEvent {
            action: self.action,
            phase,
            value,
        })
    }

    /// Force an active action back to rest, e.g. when the window loses focus.
    pub fn cancel(&mut self) -> Option<InputEvent> {
        let last = self.active.take()?;
        Some(InputEvent {
            action: self.action,
            phase: TriggerPhase::Completed,
            value: last.zeroed(),
        })
    }
}

/// The (action, phase) pairs a pawn subscribed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputBindings {
    phases: [u8; 4],
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `action` to each phase in `phases`.
    pub fn bind(&mut self, action: RigAction, phases: &[TriggerPhase]) -> &mut Self {
        for phase in phases {
            self.phases[action.index()] |= phase.bit();
        }
        self
    }

    pub fn is_bound(&self, action: RigAction, phase: TriggerPhase) -> bool {
        self.phases[action.index()] & phase.bit() != 0
    }

    /// Forward `event` to `pawn` if it is bound. Returns whether it was delivered.
    pub fn dispatch<P: Pawn + ?Sized>(
        &self,
        pawn: &mut P,
        event: InputEvent,
        frame: Frame<'_>,
    ) -> bool {
        if !self.is_bound(event.action, event.phase) {
            return false;
        }
        pawn.on_input(event, frame);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        seen: Vec<InputEvent>,
    }

    impl Pawn for Recorder {
        fn on_spawn(&mut self) {}
        fn on_bind_inputs(&mut self, binder: &mut InputBindings) {
            binder.bind(RigAction::Tilt, &[TriggerPhase::Started]);
        }
        fn on_input(&mut self, event: InputEvent, _frame: Frame<'_>) {
            self.seen.push(event);
        }
        fn on_tick(&mut self, _frame: Frame<'_>) {}
    }

    #[test]
    fn tracker_walks_through_phases() {
        let mut tracker = TriggerTracker::new(RigAction::Ascend);

        assert_eq!(tracker.update(AxisValue::Axis1(0.0)), None);

        let started = tracker.update(AxisValue::Axis1(1.0)).expect("started");
        assert_eq!(started.phase, TriggerPhase::Started);
        assert_eq!(started.value, AxisValue::Axis1(1.0));

        let ongoing = tracker.update(AxisValue::Axis1(0.5)).expect("ongoing");
        assert_eq!(ongoing.phase, TriggerPhase::Ongoing);
        assert_eq!(ongoing.value, AxisValue::Axis1(0.5));

        let completed = tracker.update(AxisValue::Axis1(0.0)).expect("completed");
        assert_eq!(completed.phase, TriggerPhase::Completed);
        assert_eq!(completed.value, AxisValue::Axis1(0.0));
        assert!(!tracker.is_active());

        assert_eq!(tracker.update(AxisValue::Axis1(0.0)), None);
    }

    #[test]
    fn tracker_treats_dead_zone_as_rest() {
        let mut tracker = TriggerTracker::new(RigAction::Move);
        assert_eq!(tracker.update(AxisValue::Axis2(Vector2::new(5.0e-5, -5.0e-5))), None);
    }

    #[test]
    fn cancel_completes_only_active_actions() {
        let mut tracker = TriggerTracker::new(RigAction::Move);
        assert_eq!(tracker.cancel(), None);

        tracker.update(AxisValue::Axis2(Vector2::new(0.0, 1.0)));
        let cancelled = tracker.cancel().expect("was active");
        assert_eq!(cancelled.phase, TriggerPhase::Completed);
        assert_eq!(cancelled.value, AxisValue::Axis2(Vector2::zeros()));
        assert!(!tracker.is_active());
    }

    #[test]
    fn dispatch_only_forwards_bound_pairs() {
        let mut pawn = Recorder { seen: Vec::new() };
        let mut bindings = InputBindings::new();
        pawn.on_bind_inputs(&mut bindings);

        let started = InputEvent {
            action: RigAction::Tilt,
            phase: TriggerPhase::Started,
            value: AxisValue::Axis1(1.0),
        };
        let ongoing = InputEvent {
            phase: TriggerPhase::Ongoing,
            ..started
        };
        let other = InputEvent {
            action: RigAction::Look,
            ..started
        };

        assert!(bindings.dispatch(&mut pawn, started, Frame::new(0.016)));
        assert!(!bindings.dispatch(&mut pawn, ongoing, Frame::new(0.016)));
        assert!(!bindings.dispatch(&mut pawn, other, Frame::new(0.016)));
        assert_eq!(pawn.seen, vec![started]);
    }

    #[test]
    fn axis_views() {
        assert_eq!(AxisValue::Axis1(0.5).as_axis2(), Vector2::new(0.0, 0.5));
        assert_eq!(AxisValue::Axis2(Vector2::new(0.2, 0.7)).as_axis1(), 0.7);
        assert!(AxisValue::Axis1(0.0).is_rest());
    }
}
