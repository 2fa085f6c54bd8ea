#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use spinbox_core::{
    Effect, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerTarget, RepeatConfig,
    SpinArbiter, SpinEvent, TimerHandle,
};

const KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::Left,
    KeyCode::Char('a'),
];

const TARGETS: [PointerTarget; 3] = [
    PointerTarget::Increment,
    PointerTarget::Decrement,
    PointerTarget::Elsewhere,
];

fuzz_target!(|data: &[u8]| {
    if data.len() > 2048 {
        return;
    }

    let mut arbiter = SpinArbiter::new(RepeatConfig::default());
    let mut armed: BTreeSet<TimerHandle> = BTreeSet::new();
    let mut subscribed = false;

    for pair in data.chunks(2) {
        let op = pair[0];
        let arg = pair.get(1).copied().unwrap_or(0) as usize;

        let event = match op % 9 {
            0 => SpinEvent::Key(KeyEvent::new(KEYS[arg % KEYS.len()])),
            1 => SpinEvent::Key(KeyEvent::release(KEYS[arg % KEYS.len()])),
            2 => SpinEvent::Key(
                KeyEvent::new(KEYS[arg % KEYS.len()])
                    .with_kind(KeyEventKind::Repeat)
                    .with_modifiers(Modifiers::from_bits_truncate(arg as u8)),
            ),
            3 => SpinEvent::Pointer(PointerEvent::press(TARGETS[arg % TARGETS.len()])),
            4 => SpinEvent::Pointer(PointerEvent::release(TARGETS[arg % TARGETS.len()])),
            5 => match armed.iter().nth(arg % armed.len().max(1)) {
                Some(handle) => SpinEvent::Timer(*handle),
                None => continue,
            },
            6 => SpinEvent::Focus(arg % 2 == 0),
            7 => SpinEvent::SetDisabled(arg % 3 == 0),
            _ => SpinEvent::SetReadonly(arg % 3 == 0),
        };

        for effect in arbiter.handle(&event) {
            match effect {
                Effect::ArmTimer { handle, .. } => {
                    assert!(armed.insert(handle), "timer armed twice");
                }
                Effect::CancelTimer(handle) => {
                    assert!(armed.remove(&handle), "cancel of unknown timer");
                }
                Effect::SubscribeRelease => {
                    assert!(!subscribed, "release subscribed twice");
                    subscribed = true;
                }
                Effect::UnsubscribeRelease => {
                    assert!(subscribed, "unsubscribe without subscription");
                    subscribed = false;
                }
                _ => {}
            }
        }

        // Timers that fired as one-shots drop out of the armed set.
        let (delay, interval) = arbiter.timer().live_handles();
        armed.retain(|h| Some(*h) == delay || Some(*h) == interval);

        assert!(armed.len() <= 1, "more than one timer live");
        assert_eq!(subscribed, arbiter.release_subscribed());
        if !arbiter.is_interactive() {
            assert!(armed.is_empty(), "timer live while not interactive");
            assert!(!subscribed, "release subscription while not interactive");
        }
    }

    for effect in arbiter.handle(&SpinEvent::Teardown) {
        if let Effect::CancelTimer(handle) = effect {
            armed.remove(&handle);
        }
    }
    assert!(armed.is_empty(), "teardown left a timer");
});
