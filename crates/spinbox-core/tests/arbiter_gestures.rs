//! End-to-end gesture scripts against the arbiter.
//!
//! A small in-test executor applies the arbiter's effects to a value with the
//! stepping engine and keeps a virtual timer table, so whole gestures can be
//! replayed without a clock.

use std::collections::BTreeSet;

use spinbox_core::effect::{Effect, TimerHandle, TimerKind};
use spinbox_core::event::{
    KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerTarget, SpinEvent,
};
use spinbox_core::repeat::RepeatConfig;
use spinbox_core::stepping::{self, SpinRange};
use spinbox_core::SpinArbiter;

struct Harness {
    arbiter: SpinArbiter,
    range: SpinRange,
    value: Option<f64>,
    armed: BTreeSet<TimerHandle>,
    subscribed: bool,
    commits: Vec<Option<f64>>,
    inputs: usize,
    consumed: usize,
}

impl Harness {
    fn new(range: SpinRange, value: Option<f64>) -> Self {
        Self {
            arbiter: SpinArbiter::new(RepeatConfig::default()),
            range,
            value,
            armed: BTreeSet::new(),
            subscribed: false,
            commits: Vec::new(),
            inputs: 0,
            consumed: 0,
        }
    }

    fn send(&mut self, event: SpinEvent) {
        let effects = self.arbiter.handle(&event);
        for effect in effects {
            match effect {
                Effect::Step {
                    direction,
                    magnitude,
                } => {
                    let next = stepping::step(self.value, direction, magnitude, &self.range);
                    if self.value != Some(next) {
                        self.inputs += 1;
                    }
                    self.value = Some(next);
                }
                Effect::Jump(bound) => {
                    self.value = Some(stepping::jump(bound, &self.range));
                    self.inputs += 1;
                }
                Effect::ArmTimer { handle, .. } => {
                    assert!(self.armed.insert(handle), "handle armed twice");
                }
                Effect::CancelTimer(handle) => {
                    assert!(self.armed.remove(&handle), "cancelled unknown handle");
                }
                Effect::SubscribeRelease => {
                    assert!(!self.subscribed, "double subscription");
                    self.subscribed = true;
                }
                Effect::UnsubscribeRelease => {
                    assert!(self.subscribed, "unsubscribe without subscription");
                    self.subscribed = false;
                }
                Effect::Commit => self.commits.push(self.value),
                Effect::Consume => self.consumed += 1,
            }
        }
    }

    /// Fire the live timer of `kind`, the way a host loop would.
    fn fire(&mut self, kind: TimerKind) {
        let handle = self
            .armed
            .iter()
            .copied()
            .find(|h| h.kind() == kind)
            .expect("timer of requested kind is armed");
        if kind == TimerKind::Delay {
            self.armed.remove(&handle);
        }
        self.send(SpinEvent::Timer(handle));
    }

    fn hold(&mut self, ticks: usize) {
        self.fire(TimerKind::Delay);
        for _ in 0..ticks {
            self.fire(TimerKind::Interval);
        }
    }
}

fn key(code: KeyCode) -> SpinEvent {
    SpinEvent::Key(KeyEvent::new(code))
}

fn key_up(code: KeyCode) -> SpinEvent {
    SpinEvent::Key(KeyEvent::release(code))
}

#[test]
fn held_arrow_commits_once_with_settled_value() {
    let mut h = Harness::new(SpinRange::new(0.0, 100.0, 1.0), Some(10.0));
    h.send(key(KeyCode::Up));
    h.hold(5);
    for _ in 0..8 {
        h.send(SpinEvent::Key(
            KeyEvent::new(KeyCode::Up).with_kind(KeyEventKind::Repeat),
        ));
    }
    h.send(key_up(KeyCode::Up));

    assert_eq!(h.value, Some(16.0));
    assert_eq!(h.commits, vec![Some(16.0)]);
    assert!(h.armed.is_empty());
}

#[test]
fn tap_steps_once() {
    let mut h = Harness::new(SpinRange::new(1.0, 10.0, 1.0), Some(5.0));
    h.send(key(KeyCode::Down));
    h.send(key_up(KeyCode::Down));
    assert_eq!(h.value, Some(4.0));
    assert_eq!(h.commits.len(), 1);
    assert_eq!(h.consumed, 2);
}

#[test]
fn held_button_accelerates_after_threshold() {
    let mut h = Harness::new(SpinRange::new(0.0, 100.0, 1.0), Some(1.0));
    h.send(SpinEvent::Pointer(PointerEvent::press(PointerTarget::Increment)));
    assert_eq!(h.value, Some(2.0));

    h.hold(10);
    assert_eq!(h.value, Some(12.0));

    h.fire(TimerKind::Interval);
    assert_eq!(h.value, Some(16.0));
    h.fire(TimerKind::Interval);
    assert_eq!(h.value, Some(20.0));

    h.send(SpinEvent::Pointer(PointerEvent::release(PointerTarget::Elsewhere)));
    assert_eq!(h.commits, vec![Some(20.0)]);
    assert!(!h.subscribed);
    assert!(h.armed.is_empty());
}

#[test]
fn page_and_home_end_commit_on_release() {
    let mut h = Harness::new(SpinRange::new(0.0, 100.0, 1.0), Some(40.0));
    h.send(key(KeyCode::PageUp));
    assert_eq!(h.value, Some(44.0));
    h.send(key(KeyCode::PageUp));
    assert_eq!(h.value, Some(48.0));
    h.send(key_up(KeyCode::PageUp));

    h.send(key(KeyCode::End));
    h.send(key_up(KeyCode::End));
    h.send(key(KeyCode::Home));
    h.send(key_up(KeyCode::Home));

    assert_eq!(h.commits, vec![Some(48.0), Some(100.0), Some(0.0)]);
    assert!(h.armed.is_empty());
}

#[test]
fn disabling_mid_repeat_halts_without_commit() {
    let mut h = Harness::new(SpinRange::new(0.0, 100.0, 1.0), Some(50.0));
    h.send(key(KeyCode::Down));
    h.hold(3);
    assert_eq!(h.value, Some(46.0));

    let stale: Vec<TimerHandle> = h.armed.iter().copied().collect();
    h.send(SpinEvent::SetDisabled(true));
    assert!(h.armed.is_empty());

    for handle in stale {
        h.send(SpinEvent::Timer(handle));
    }
    h.send(key_up(KeyCode::Down));

    assert_eq!(h.value, Some(46.0));
    assert!(h.commits.is_empty());
}

#[test]
fn pointer_release_outside_after_blur_is_ignored() {
    let mut h = Harness::new(SpinRange::default(), None);
    h.send(SpinEvent::Focus(true));
    h.send(SpinEvent::Pointer(PointerEvent::press(PointerTarget::Decrement)));
    assert_eq!(h.value, Some(1.0));
    assert!(h.subscribed);

    h.send(SpinEvent::Focus(false));
    assert!(!h.subscribed);
    h.send(SpinEvent::Pointer(PointerEvent::release(PointerTarget::Elsewhere)));
    assert!(h.commits.is_empty());
}

#[test]
fn shortcuts_pass_through_untouched() {
    let mut h = Harness::new(SpinRange::default(), Some(3.0));
    h.send(SpinEvent::Key(
        KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::CTRL),
    ));
    h.send(SpinEvent::Key(
        KeyEvent::release(KeyCode::Up).with_modifiers(Modifiers::CTRL),
    ));
    assert_eq!(h.value, Some(3.0));
    assert_eq!(h.consumed, 0);
    assert!(h.commits.is_empty());
}

#[test]
fn wrap_cycles_through_bounds() {
    let mut h = Harness::new(SpinRange::new(1.0, 10.0, 1.0).with_wrap(true), Some(10.0));
    h.send(key(KeyCode::Up));
    h.send(key_up(KeyCode::Up));
    assert_eq!(h.value, Some(1.0));
    h.send(key(KeyCode::Down));
    h.send(key_up(KeyCode::Down));
    assert_eq!(h.value, Some(10.0));
    assert_eq!(h.commits, vec![Some(1.0), Some(10.0)]);
}

#[test]
fn teardown_leaves_nothing_armed() {
    let mut h = Harness::new(SpinRange::default(), Some(5.0));
    h.send(SpinEvent::Pointer(PointerEvent::press(PointerTarget::Increment)));
    h.hold(2);
    h.send(SpinEvent::Teardown);
    assert!(h.armed.is_empty());
    assert!(!h.subscribed);
    assert!(h.commits.is_empty());
    assert!(h.inputs > 0);
}
