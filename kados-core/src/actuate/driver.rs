//! Actuator driver implementation
//!
//! Per-target serialization and dwell tracking over a raw actuator port.
//! The driver never blocks: `execute` starts an action, `poll` reports
//! completions once the dwell has elapsed.

use heapless::Vec;

use crate::config::ActuatorConfig;
use crate::time::Instant;
use crate::traits::ActuatorIo;

use super::{ActuatorAction, ActuatorError, ActuatorIntent, ActuatorTarget};

/// An intent currently holding its mechanism
#[derive(Debug, Clone, Copy)]
struct ActiveAction {
    intent: ActuatorIntent,
    started: Instant,
}

/// How a polled action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorStatus {
    /// Dwell elapsed and the mechanism settled
    Done,
    /// Mechanism still unsettled past duration + margin
    TimedOut,
    /// The completing hardware write failed
    Faulted,
}

/// Completion report for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorOutcome {
    pub target: ActuatorTarget,
    pub status: ActuatorStatus,
}

/// Executes intents against the raw actuator port
pub struct ActuatorDriver<A> {
    io: A,
    config: ActuatorConfig,
    active: [Option<ActiveAction>; ActuatorTarget::COUNT],
}

impl<A: ActuatorIo> ActuatorDriver<A> {
    /// Create a driver over an actuator port
    pub fn new(io: A, config: ActuatorConfig) -> Self {
        Self {
            io,
            config,
            active: [None; ActuatorTarget::COUNT],
        }
    }

    /// Get access to the underlying port
    pub fn io(&self) -> &A {
        &self.io
    }

    /// Get mutable access to the underlying port
    pub fn io_mut(&mut self) -> &mut A {
        &mut self.io
    }

    /// Start executing an intent
    ///
    /// Rejects the intent with [`ActuatorError::Busy`] if the target
    /// already has an action in flight; the mechanism cannot honor two
    /// commands at once.
    pub fn execute(&mut self, intent: ActuatorIntent, now: Instant) -> Result<(), ActuatorError> {
        let slot = intent.target.index();
        if self.active[slot].is_some() {
            return Err(ActuatorError::Busy);
        }

        match intent.action {
            ActuatorAction::Hold { angle } | ActuatorAction::Sweep { angle } => {
                self.io.set_servo_angle(intent.target, angle)?;
            }
            ActuatorAction::Energize => {
                self.io.set_relay(intent.target, true)?;
            }
        }

        self.active[slot] = Some(ActiveAction {
            intent,
            started: now,
        });
        Ok(())
    }

    /// Report every action that finished since the last poll
    ///
    /// An action never completes before its full duration has elapsed. On
    /// completion, sweeps return their servo to neutral and energized
    /// relays are released.
    pub fn poll(&mut self, now: Instant) -> Vec<ActuatorOutcome, { ActuatorTarget::COUNT }> {
        let mut outcomes = Vec::new();

        for slot in 0..ActuatorTarget::COUNT {
            let Some(active) = self.active[slot] else {
                continue;
            };

            let elapsed = now.since(active.started);
            if elapsed < active.intent.duration {
                continue;
            }

            let target = active.intent.target;
            let status = if self.io.is_settled(target) {
                match self.release(active) {
                    Ok(()) => ActuatorStatus::Done,
                    Err(_) => ActuatorStatus::Faulted,
                }
            } else if elapsed >= active.intent.duration + self.config.settle_margin {
                // Give up on the mechanism but still try to park it
                let _ = self.release(active);
                ActuatorStatus::TimedOut
            } else {
                // Dwell done, still settling within the margin
                continue;
            };

            self.active[slot] = None;
            // Slot count bounds the loop; push cannot fail
            let _ = outcomes.push(ActuatorOutcome { target, status });
        }

        outcomes
    }

    /// Whether a target has an action in flight
    pub fn is_busy(&self, target: ActuatorTarget) -> bool {
        self.active[target.index()].is_some()
    }

    /// Number of actions currently in flight
    pub fn busy_count(&self) -> usize {
        self.active.iter().filter(|slot| slot.is_some()).count()
    }

    /// Drop every in-flight action and park its mechanism
    ///
    /// Only an abort may supersede running intents; completions for the
    /// cancelled actions are never reported.
    pub fn cancel_all(&mut self) {
        for slot in 0..ActuatorTarget::COUNT {
            if let Some(active) = self.active[slot].take() {
                let _ = self.release(active);
            }
        }
    }

    /// Park the mechanism at the end of an action
    fn release(&mut self, active: ActiveAction) -> Result<(), ActuatorError> {
        match active.intent.action {
            ActuatorAction::Sweep { .. } => self
                .io
                .set_servo_angle(active.intent.target, self.config.angles.sort_neutral),
            ActuatorAction::Energize => self.io.set_relay(active.intent.target, false),
            // Held positions (the door) stay where they are
            ActuatorAction::Hold { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuate::ActuatorKind;
    use crate::time::Duration;

    /// Recording actuator port
    struct FakeIo {
        /// (target, angle) servo writes in order
        servo_writes: Vec<(ActuatorTarget, u8), 16>,
        /// (target, on) relay writes in order
        relay_writes: Vec<(ActuatorTarget, bool), 16>,
        /// Targets that refuse to settle
        stuck: Option<ActuatorTarget>,
        /// Fail every write
        fail_writes: bool,
    }

    impl FakeIo {
        fn new() -> Self {
            Self {
                servo_writes: Vec::new(),
                relay_writes: Vec::new(),
                stuck: None,
                fail_writes: false,
            }
        }
    }

    impl ActuatorIo for FakeIo {
        fn set_servo_angle(
            &mut self,
            target: ActuatorTarget,
            degrees: u8,
        ) -> Result<(), ActuatorError> {
            if self.fail_writes {
                return Err(ActuatorError::Hardware);
            }
            let _ = self.servo_writes.push((target, degrees));
            Ok(())
        }

        fn set_relay(&mut self, target: ActuatorTarget, on: bool) -> Result<(), ActuatorError> {
            if self.fail_writes {
                return Err(ActuatorError::Hardware);
            }
            let _ = self.relay_writes.push((target, on));
            Ok(())
        }

        fn is_settled(&self, target: ActuatorTarget) -> bool {
            self.stuck != Some(target)
        }
    }

    fn driver() -> ActuatorDriver<FakeIo> {
        ActuatorDriver::new(FakeIo::new(), ActuatorConfig::default())
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn sweep(target: ActuatorTarget, angle: u8, ms: u64) -> ActuatorIntent {
        ActuatorIntent {
            target,
            action: ActuatorAction::Sweep { angle },
            duration: Duration::from_millis(ms),
        }
    }

    fn energize(target: ActuatorTarget, ms: u64) -> ActuatorIntent {
        ActuatorIntent {
            target,
            action: ActuatorAction::Energize,
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_busy_target_rejects_second_intent() {
        let mut d = driver();

        d.execute(sweep(ActuatorTarget::SortWet, 0, 1000), at(0)).unwrap();
        assert!(d.is_busy(ActuatorTarget::SortWet));

        let err = d.execute(sweep(ActuatorTarget::SortWet, 45, 1000), at(10));
        assert_eq!(err, Err(ActuatorError::Busy));

        // A different target is still free
        d.execute(sweep(ActuatorTarget::SortDry, 45, 1000), at(10)).unwrap();
    }

    #[test]
    fn test_done_never_reported_before_dwell() {
        let mut d = driver();
        d.execute(energize(ActuatorTarget::Sanitizer, 500), at(0)).unwrap();

        // Poll every target's dwell edge short of 500ms
        for ms in [0, 100, 250, 499] {
            assert!(d.poll(at(ms)).is_empty(), "completed early at {}ms", ms);
        }

        let outcomes = d.poll(at(500));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].target, ActuatorTarget::Sanitizer);
        assert_eq!(outcomes[0].status, ActuatorStatus::Done);
    }

    #[test]
    fn test_dwell_invariant_for_all_targets() {
        for target in ActuatorTarget::ALL {
            let mut d = driver();
            let intent = match target.kind() {
                ActuatorKind::Servo => sweep(target, 90, 300),
                ActuatorKind::Relay => energize(target, 300),
            };
            d.execute(intent, at(0)).unwrap();

            assert!(d.poll(at(299)).is_empty());
            let outcomes = d.poll(at(300));
            assert_eq!(outcomes.len(), 1);
            assert_eq!(outcomes[0].status, ActuatorStatus::Done);
        }
    }

    #[test]
    fn test_sweep_returns_to_neutral() {
        let mut d = driver();
        d.execute(sweep(ActuatorTarget::SortCovers, 135, 1000), at(0)).unwrap();
        d.poll(at(1000));

        assert_eq!(
            d.io.servo_writes.as_slice(),
            // Sweep out, then back to the configured neutral
            &[(ActuatorTarget::SortCovers, 135), (ActuatorTarget::SortCovers, 90)]
        );
        assert!(!d.is_busy(ActuatorTarget::SortCovers));
    }

    #[test]
    fn test_energize_releases_relay() {
        let mut d = driver();
        d.execute(energize(ActuatorTarget::Reward, 1000), at(0)).unwrap();
        d.poll(at(1000));

        assert_eq!(
            d.io.relay_writes.as_slice(),
            &[(ActuatorTarget::Reward, true), (ActuatorTarget::Reward, false)]
        );
    }

    #[test]
    fn test_unsettled_mechanism_times_out() {
        let mut d = driver();
        d.io.stuck = Some(ActuatorTarget::Door);

        d.execute(
            ActuatorIntent {
                target: ActuatorTarget::Door,
                action: ActuatorAction::Hold { angle: 90 },
                duration: Duration::from_millis(200),
            },
            at(0),
        )
        .unwrap();

        // Dwell elapsed but still unsettled: stays pending within the margin
        assert!(d.poll(at(250)).is_empty());

        // Past duration + margin (100ms default): reported as timed out
        let outcomes = d.poll(at(300));
        assert_eq!(outcomes[0].status, ActuatorStatus::TimedOut);
        assert!(!d.is_busy(ActuatorTarget::Door));
    }

    #[test]
    fn test_hardware_write_failure_surfaces() {
        let mut d = driver();
        d.io.fail_writes = true;

        let err = d.execute(sweep(ActuatorTarget::SortWet, 0, 1000), at(0));
        assert_eq!(err, Err(ActuatorError::Hardware));
        assert!(!d.is_busy(ActuatorTarget::SortWet));
    }

    #[test]
    fn test_cancel_all_parks_mechanisms() {
        let mut d = driver();
        d.execute(sweep(ActuatorTarget::SortWet, 0, 1000), at(0)).unwrap();
        d.execute(energize(ActuatorTarget::Sanitizer, 500), at(0)).unwrap();

        d.cancel_all();

        assert_eq!(d.busy_count(), 0);
        // Sweep parked at neutral, relay released
        assert_eq!(d.io.servo_writes.last(), Some(&(ActuatorTarget::SortWet, 90)));
        assert_eq!(d.io.relay_writes.last(), Some(&(ActuatorTarget::Sanitizer, false)));
        // Cancelled actions report no completion
        assert!(d.poll(at(2000)).is_empty());
    }
}
