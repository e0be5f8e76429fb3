//! Deposit-cycle controller
//!
//! The controller is the central brain that:
//! - Watches debounced sensor readings for presence and deposits
//! - Drives the state machine, one transition per tick at most
//! - Owns every cycle timer (deposit deadline, settling window)
//! - Issues actuator intents and reacts to their completions
//! - Emits cycle events to the feedback sink
//!
//! Waiting for a mechanism is always a state plus a non-blocking poll,
//! never a blocking delay, so the loop stays responsive mid-cycle.

use crate::actuate::{
    ActuatorDriver, ActuatorError, ActuatorOutcome, ActuatorStatus, ActuatorTarget,
};
use crate::classify::Classifier;
use crate::config::BinConfig;
use crate::sensing::SensorReading;
use crate::time::Instant;
use crate::traits::{ActuatorIo, FeedbackSink};

use super::context::CycleContext;
use super::events::{CycleEvent, Event};
use super::machine::{AbortReason, BinState};

/// Controller state for one bin
pub struct BinController {
    /// Immutable machine configuration
    config: BinConfig,
    /// Threshold classifier
    classifier: Classifier,
    /// Current cycle state
    state: BinState,
    /// Transient record for the cycle in progress, if any
    ctx: Option<CycleContext>,
}

impl BinController {
    /// Create a controller with the given configuration
    pub fn new(config: BinConfig) -> Self {
        Self {
            config,
            classifier: Classifier::new(config.classifier),
            state: BinState::Idle,
            ctx: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> BinState {
        self.state
    }

    /// Get the cycle in progress
    pub fn context(&self) -> Option<&CycleContext> {
        self.ctx.as_ref()
    }

    /// Check if a deposit cycle is running
    pub fn in_cycle(&self) -> bool {
        self.state.in_cycle()
    }

    /// Force an immediate abort regardless of the current state
    ///
    /// The next tick performs the best-effort door close.
    pub fn emergency_stop(&mut self) {
        self.state = self.state.transition(Event::EmergencyStop);
    }

    /// Advance the cycle by one control tick
    ///
    /// Polls in-flight actuators, then applies at most one sensor- or
    /// timer-driven transition against the supplied reading.
    pub fn tick<A: ActuatorIo, F: FeedbackSink>(
        &mut self,
        reading: &SensorReading,
        actuators: &mut ActuatorDriver<A>,
        sink: &mut F,
        now: Instant,
    ) {
        let state_before = self.state;

        // Completions first: most waiting states are blocked on one
        for outcome in actuators.poll(now) {
            self.handle_outcome(outcome, sink, now);
        }

        // One transition per tick: if a completion already advanced the
        // machine, sensor- and timer-driven work waits for the next tick
        if self.state != state_before {
            return;
        }

        match self.state {
            BinState::Idle => {
                if reading.door_presence {
                    self.begin_cycle(actuators, sink, now);
                }
            }
            BinState::AwaitingDeposit => self.await_deposit(reading, sink, now),
            BinState::Classifying => self.classify_when_settled(reading, actuators, sink, now),
            BinState::PostAction => self.run_post_actions(actuators, sink, now),
            BinState::Aborted(_) => self.recover(actuators, sink, now),
            // DoorOpening, Sorting, and DoorClosing wait on completions
            _ => {}
        }
    }

    /// React to one actuator completion report
    fn handle_outcome<F: FeedbackSink>(
        &mut self,
        outcome: ActuatorOutcome,
        sink: &mut F,
        now: Instant,
    ) {
        match outcome.status {
            ActuatorStatus::Done => self.handle_done(outcome.target, sink, now),
            ActuatorStatus::TimedOut => self.fault(AbortReason::ActuatorTimeout, sink),
            ActuatorStatus::Faulted => self.fault(AbortReason::ActuatorFault, sink),
        }
    }

    /// React to a successfully completed intent
    fn handle_done<F: FeedbackSink>(
        &mut self,
        target: ActuatorTarget,
        sink: &mut F,
        now: Instant,
    ) {
        match (self.state, target) {
            (BinState::DoorOpening, ActuatorTarget::Door) => {
                self.state = self.state.transition(Event::DoorOpened);
                sink.on_event(CycleEvent::DoorOpened);
                if let Some(ctx) = self.ctx.as_mut() {
                    ctx.deposit_deadline = Some(now + self.config.cycle.door_timeout);
                }
            }
            (BinState::Sorting, t) if t.is_sorter() => {
                self.state = self.state.transition(Event::SortCompleted);
                sink.on_event(CycleEvent::Sorted);
                self.queue_post_actions();
            }
            (BinState::PostAction, ActuatorTarget::Sanitizer) => {
                sink.on_event(CycleEvent::Sanitized);
            }
            (BinState::PostAction, ActuatorTarget::Reward) => {
                sink.on_event(CycleEvent::Rewarded);
            }
            (BinState::DoorClosing, ActuatorTarget::Door) => {
                self.state = self.state.transition(Event::DoorClosed);
                sink.on_event(CycleEvent::DoorClosed);
                self.ctx = None;
            }
            // Stale completion from a superseded flow
            _ => {}
        }
    }

    /// Presence detected: open the door and start a cycle
    fn begin_cycle<A: ActuatorIo, F: FeedbackSink>(
        &mut self,
        actuators: &mut ActuatorDriver<A>,
        sink: &mut F,
        now: Instant,
    ) {
        self.ctx = Some(CycleContext::begin(now));

        match actuators.execute(self.config.actuators.door_open_intent(), now) {
            Ok(()) => {
                self.state = self.state.transition(Event::PresenceDetected);
            }
            Err(_) => {
                // Door never moved: report it and stay idle for the next
                // visitor rather than entering a cycle we cannot finish
                sink.on_event(CycleEvent::Fault(AbortReason::ActuatorFault));
                self.ctx = None;
            }
        }
    }

    /// Door is open: watch the chute and the give-up deadline
    fn await_deposit<F: FeedbackSink>(
        &mut self,
        reading: &SensorReading,
        sink: &mut F,
        now: Instant,
    ) {
        if reading.waste_presence {
            self.state = self.state.transition(Event::DepositDetected);
            sink.on_event(CycleEvent::DepositDetected);
            if let Some(ctx) = self.ctx.as_mut() {
                ctx.deposit_confirmed = true;
                ctx.settle_deadline = Some(now + self.config.cycle.sorting_delay);
            }
            return;
        }

        let deadline = self.ctx.as_ref().and_then(|c| c.deposit_deadline);
        if CycleContext::deadline_reached(deadline, now) {
            // Nobody deposited anything; close up without fuss
            self.state = self.state.transition(Event::DepositTimedOut);
        }
    }

    /// Settling window over: classify once and pick the sorting sweep
    fn classify_when_settled<A: ActuatorIo, F: FeedbackSink>(
        &mut self,
        reading: &SensorReading,
        actuators: &mut ActuatorDriver<A>,
        sink: &mut F,
        now: Instant,
    ) {
        let deadline = self.ctx.as_ref().and_then(|c| c.settle_deadline);
        if !CycleContext::deadline_reached(deadline, now) {
            return;
        }

        let category = self.classifier.classify(reading);
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.category = Some(category);
        }
        sink.on_event(CycleEvent::Classified(category));

        match self.config.actuators.sort_intent(category) {
            Some(intent) => match actuators.execute(intent, now) {
                Ok(()) => {
                    self.state = self.state.transition(Event::SortStarted);
                }
                Err(e) => self.fault(abort_reason(e), sink),
            },
            None => {
                // Unclassified waste stays in the default compartment
                self.state = self.state.transition(Event::SortSkipped);
                self.queue_post_actions();
            }
        }
    }

    /// Build the post-sort queue from the configured policy
    fn queue_post_actions(&mut self) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        let Some(category) = ctx.category else {
            return;
        };

        if self.config.post_action.sanitize_after(category) {
            let _ = ctx
                .post_queue
                .push_back(self.config.actuators.sanitize_intent());
        }
        if self.config.post_action.reward_after(category) {
            let _ = ctx
                .post_queue
                .push_back(self.config.actuators.reward_intent());
        }
    }

    /// Issue queued post actions one at a time, then close the door
    fn run_post_actions<A: ActuatorIo, F: FeedbackSink>(
        &mut self,
        actuators: &mut ActuatorDriver<A>,
        sink: &mut F,
        now: Instant,
    ) {
        // Wait out the action in flight before touching the queue
        if actuators.busy_count() > 0 {
            return;
        }

        let next = self.ctx.as_mut().and_then(|c| c.post_queue.pop_front());
        match next {
            Some(intent) => {
                if let Err(e) = actuators.execute(intent, now) {
                    self.fault(abort_reason(e), sink);
                }
            }
            None => {
                self.state = self.state.transition(Event::PostActionsCompleted);
                if let Err(e) = actuators.execute(self.config.actuators.door_close_intent(), now) {
                    self.fault(abort_reason(e), sink);
                }
            }
        }
    }

    /// Best-effort abort recovery: park everything and close the door
    fn recover<A: ActuatorIo, F: FeedbackSink>(
        &mut self,
        actuators: &mut ActuatorDriver<A>,
        sink: &mut F,
        now: Instant,
    ) {
        let BinState::Aborted(reason) = self.state else {
            return;
        };

        // The abort owns the hardware now; drop whatever was mid-flight
        actuators.cancel_all();

        // Actuator faults already reported themselves when they happened
        if reason == AbortReason::EmergencyStop {
            sink.on_event(CycleEvent::Fault(reason));
        }

        match actuators.execute(self.config.actuators.door_close_intent(), now) {
            Ok(()) => {
                self.state = self.state.transition(Event::CloseStarted);
            }
            Err(_) => {
                // Even the close failed; nothing left to drive
                sink.on_event(CycleEvent::Fault(AbortReason::ActuatorFault));
                self.state = self.state.transition(Event::CycleReset);
                self.ctx = None;
            }
        }
    }

    /// Record a fault and move the machine toward recovery
    fn fault<F: FeedbackSink>(&mut self, reason: AbortReason, sink: &mut F) {
        if reason.is_fault() {
            sink.on_event(CycleEvent::Fault(reason));
        }

        self.state = self.state.transition(Event::FaultDetected(reason));
        if self.state == BinState::Idle {
            self.ctx = None;
        }
    }
}

/// Map a driver error onto the abort it causes
fn abort_reason(error: ActuatorError) -> AbortReason {
    match error {
        ActuatorError::Timeout => AbortReason::ActuatorTimeout,
        // A busy rejection here means the controller broke its own
        // serialization invariant; treat it as a fault
        ActuatorError::Busy | ActuatorError::Hardware => AbortReason::ActuatorFault,
    }
}
