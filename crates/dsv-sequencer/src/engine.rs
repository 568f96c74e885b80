//! Operation sequencer implementation

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, trace};

use crate::animated::Animated;
use crate::config::SequencerConfig;
use crate::error::OperationError;
use crate::phase::{Phase, PhaseContext, PhasePlan};
use crate::subscriber::PhaseSubscriber;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTarget {
    Mutate,
    Confirm,
    Finish,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: Duration,
    generation: u64,
    target: TimerTarget,
}

struct ActiveOperation<Op> {
    op: Op,
    plan: PhasePlan,
}

/// Sequencer state stored internally
struct SequencerState<S: Animated> {
    generation: u64,
    /// Virtual clock, advanced by the owner every frame
    clock: Duration,
    phase: Phase,
    active: Option<ActiveOperation<S::Op>>,
    timers: Vec<PendingTimer>,
    last_output: Option<S::Output>,
}

impl<S: Animated> SequencerState<S> {
    fn context(&self) -> PhaseContext {
        match &self.active {
            Some(active) => {
                PhaseContext::from_plan(S::FAMILY, self.generation, self.phase, &active.plan)
            }
            None => PhaseContext::idle(S::FAMILY, self.generation),
        }
    }

    fn schedule(&mut self, due: Duration, target: TimerTarget) {
        let generation = self.generation;
        self.timers.push(PendingTimer {
            due,
            generation,
            target,
        });
    }

    /// Remove the earliest timer, optionally only if it is due by `limit`
    fn take_next_timer(&mut self, limit: Option<Duration>) -> Option<PendingTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| limit.map_or(true, |limit| timer.due <= limit))
            .min_by_key(|(_, timer)| timer.due)
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }

    /// Drop everything belonging to the current operation and start a new generation
    fn reset(&mut self) {
        self.timers.clear();
        self.generation += 1;
        self.active = None;
        self.phase = Phase::Idle;
    }
}

enum Notification {
    Change(PhaseContext),
    End(PhaseContext),
}

/// Drives one structure through the prepare / mutate / confirm phases.
///
/// At most one operation is in flight. Invoking a new one discards every
/// pending timer of the previous operation and starts over from Prepare.
/// Time only moves when the owner calls [`Sequencer::advance`], normally
/// once per frame with the frame delta.
pub struct Sequencer<S: Animated> {
    structure: Arc<RwLock<S>>,
    state: Arc<RwLock<SequencerState<S>>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn PhaseSubscriber>>>>,
    config: SequencerConfig,
}

impl<S: Animated> Sequencer<S> {
    /// Create a sequencer with default timings
    pub fn new(structure: S) -> Self {
        Self::with_config(structure, SequencerConfig::default())
    }

    /// Create a sequencer with custom timings
    pub fn with_config(structure: S, config: SequencerConfig) -> Self {
        Self::from_shared(Arc::new(RwLock::new(structure)), config)
    }

    /// Animate a structure the visual component already holds
    pub fn from_shared(structure: Arc<RwLock<S>>, mut config: SequencerConfig) -> Self {
        if config.validate().is_err() {
            config.speed = 1.0;
        }

        let state = SequencerState {
            generation: 0,
            clock: Duration::ZERO,
            phase: Phase::Idle,
            active: None,
            timers: Vec::new(),
            last_output: None,
        };

        Self {
            structure,
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }

    /// Shared handle to the animated structure, for rendering.
    ///
    /// Release any guard taken from it before calling `advance` or
    /// `run_to_idle`; the mutation step needs the write lock.
    pub fn structure(&self) -> Arc<RwLock<S>> {
        self.structure.clone()
    }

    /// Active timings (speed already validated)
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Run the structure's precondition check for `op`
    pub fn check(&self, op: &S::Op) -> Result<(), OperationError> {
        self.structure.read().check(op)
    }

    /// Start animating `op`, superseding anything in flight.
    ///
    /// Publishes the Prepare phase immediately and returns the new
    /// generation. The operation is assumed to be executable; see
    /// [`Sequencer::try_invoke`].
    pub fn invoke(&self, op: S::Op) -> u64 {
        let plan = self.structure.read().plan(&op);

        let mut state = self.state.write();
        if state.active.is_some() {
            debug!(
                "Superseding {} operation (generation {})",
                S::FAMILY,
                state.generation
            );
        }
        state.reset();
        state.last_output = None;

        let next = if plan.is_read_only() {
            TimerTarget::Confirm
        } else {
            TimerTarget::Mutate
        };
        let due = state.clock.saturating_add(self.config.prepare_delay());
        debug!("Invoking {} operation {:?} (generation {})", S::FAMILY, op, state.generation);

        state.phase = Phase::Prepare;
        state.active = Some(ActiveOperation { op, plan });
        state.schedule(due, next);

        let generation = state.generation;
        let context = state.context();
        drop(state);

        self.notify(vec![Notification::Change(context)]);
        generation
    }

    /// Check preconditions, then invoke
    pub fn try_invoke(&self, op: S::Op) -> Result<u64, OperationError> {
        self.check(&op)?;
        Ok(self.invoke(op))
    }

    /// Abandon the in-flight operation, if any, and return to Idle
    pub fn cancel(&self) -> bool {
        let mut state = self.state.write();
        if state.active.is_none() {
            return false;
        }
        debug!("Cancelling {} operation (generation {})", S::FAMILY, state.generation);
        state.reset();
        let context = state.context();
        drop(state);

        self.notify(vec![Notification::Change(context)]);
        true
    }

    /// Move the clock forward by `dt` (scaled by the playback speed) and
    /// fire every timer that became due, in order
    pub fn advance(&self, dt: Duration) {
        let now = {
            let mut state = self.state.write();
            state.clock = state.clock.saturating_add(self.config.scaled(dt));
            state.clock
        };

        loop {
            let timer = self.state.write().take_next_timer(Some(now));
            match timer {
                Some(timer) => self.fire(timer),
                None => break,
            }
        }
    }

    /// Fire all remaining timers immediately, skipping the animation
    pub fn run_to_idle(&self) {
        loop {
            let timer = {
                let mut state = self.state.write();
                let timer = state.take_next_timer(None);
                if let Some(timer) = &timer {
                    state.clock = state.clock.max(timer.due);
                }
                timer
            };
            match timer {
                Some(timer) => self.fire(timer),
                None => break,
            }
        }
    }

    fn fire(&self, timer: PendingTimer) {
        let mut state = self.state.write();
        if timer.generation != state.generation || state.active.is_none() {
            trace!(
                "Dropping stale {} timer (generation {}, current {})",
                S::FAMILY,
                timer.generation,
                state.generation
            );
            return;
        }

        let mut notifications = Vec::with_capacity(2);
        match timer.target {
            TimerTarget::Mutate => {
                let Some(op) = state.active.as_ref().map(|active| active.op.clone()) else {
                    return;
                };
                drop(state);

                // The structure lock is taken without the state lock held
                let output = self.structure.write().apply(&op);
                debug!("{} mutated: {:?}", S::FAMILY, output);

                state = self.state.write();
                if timer.generation != state.generation {
                    debug!(
                        "{} operation superseded during its mutation (generation {})",
                        S::FAMILY,
                        timer.generation
                    );
                    return;
                }
                state.last_output = Some(output);
                state.phase = Phase::Mutate;
                let due = timer.due.saturating_add(self.config.mutate_delay());
                state.schedule(due, TimerTarget::Confirm);
                notifications.push(Notification::Change(state.context()));
            }
            TimerTarget::Confirm => {
                state.phase = Phase::Confirm;
                let due = timer.due.saturating_add(self.config.confirm_delay());
                state.schedule(due, TimerTarget::Finish);
                notifications.push(Notification::Change(state.context()));
            }
            TimerTarget::Finish => {
                let finished = state.context();
                state.active = None;
                state.phase = Phase::Idle;
                info!("{} operation complete (generation {})", S::FAMILY, state.generation);
                notifications.push(Notification::End(finished));
                notifications.push(Notification::Change(state.context()));
            }
        }
        drop(state);

        self.notify(notifications);
    }

    /// Snapshot of the currently published state
    pub fn context(&self) -> PhaseContext {
        self.state.read().context()
    }

    /// Phase currently on screen
    pub fn phase(&self) -> Phase {
        self.state.read().phase
    }

    /// Whether no operation is in flight
    pub fn is_idle(&self) -> bool {
        self.state.read().active.is_none()
    }

    /// Generation of the latest invoked operation
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Output of the most recent mutation of the current or last operation
    pub fn last_output(&self) -> Option<S::Output> {
        self.state.read().last_output.clone()
    }

    /// Wall time until the next phase change at the current speed
    pub fn time_until_next_phase(&self) -> Option<Duration> {
        let state = self.state.read();
        state
            .timers
            .iter()
            .map(|timer| timer.due)
            .min()
            .map(|due| self.config.unscaled(due.saturating_sub(state.clock)))
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn PhaseSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    /// Deliver notifications outside of every lock so subscribers may call
    /// back into the sequencer. A notification whose generation is no longer
    /// current has been superseded and is skipped.
    fn notify(&self, notifications: Vec<Notification>) {
        let live: Vec<Arc<dyn PhaseSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for notification in &notifications {
            for subscriber in &live {
                let (context, is_end) = match notification {
                    Notification::Change(context) => (context, false),
                    Notification::End(context) => (context, true),
                };
                if context.generation != self.generation() {
                    continue;
                }
                if is_end {
                    subscriber.on_phase_end(context);
                } else {
                    subscriber.on_phase_change(context);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SPEED, MIN_SPEED};
    use crate::phase::{Highlight, StructureFamily};
    use crate::plans::StackOp;
    use dsv_core::Stack;
    use parking_lot::Mutex;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[derive(Default)]
    struct Recorder {
        changes: Mutex<Vec<PhaseContext>>,
        ends: Mutex<Vec<PhaseContext>>,
    }

    impl Recorder {
        fn phases(&self, generation: u64) -> Vec<Phase> {
            self.changes
                .lock()
                .iter()
                .filter(|context| context.generation == generation)
                .map(|context| context.phase)
                .collect()
        }
    }

    impl PhaseSubscriber for Recorder {
        fn on_phase_change(&self, context: &PhaseContext) {
            self.changes.lock().push(context.clone());
        }

        fn on_phase_end(&self, context: &PhaseContext) {
            self.ends.lock().push(context.clone());
        }
    }

    fn setup(stack: Stack<i64>) -> (Sequencer<Stack<i64>>, Arc<Recorder>) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let sequencer = Sequencer::new(stack);
        let recorder = Arc::new(Recorder::default());
        sequencer.add_subscriber(recorder.clone());
        (sequencer, recorder)
    }

    fn contents(sequencer: &Sequencer<Stack<i64>>) -> Vec<i64> {
        sequencer.structure().read().iter().copied().collect()
    }

    #[test]
    fn test_full_lifecycle() {
        let (sequencer, recorder) = setup(Stack::new());

        let generation = sequencer.invoke(StackOp::Push(42));
        assert_eq!(sequencer.phase(), Phase::Prepare);
        assert!(contents(&sequencer).is_empty());
        assert!(sequencer.context().code().is_some());

        sequencer.advance(ms(999));
        assert_eq!(sequencer.phase(), Phase::Prepare);
        assert!(contents(&sequencer).is_empty());

        sequencer.advance(ms(1));
        assert_eq!(sequencer.phase(), Phase::Mutate);
        assert_eq!(contents(&sequencer), vec![42]);
        assert_eq!(sequencer.context().highlight, Some(Highlight::Slot(0)));

        sequencer.advance(ms(1000));
        assert_eq!(sequencer.phase(), Phase::Confirm);

        sequencer.advance(ms(1500));
        assert!(sequencer.is_idle());
        let context = sequencer.context();
        assert!(context.description.is_none());
        assert!(context.highlight.is_none());
        assert!(context.snippet.is_none());

        assert_eq!(
            recorder.phases(generation),
            vec![Phase::Prepare, Phase::Mutate, Phase::Confirm, Phase::Idle]
        );
        let ends = recorder.ends.lock();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].phase, Phase::Confirm);
        assert_eq!(ends[0].family, StructureFamily::Stack);
    }

    #[test]
    fn test_read_only_operation_skips_mutate() {
        let (sequencer, recorder) = setup([1, 2].into_iter().collect());

        let generation = sequencer.invoke(StackOp::Peek);
        sequencer.advance(ms(1000));
        assert_eq!(sequencer.phase(), Phase::Confirm);
        sequencer.advance(ms(1500));

        assert_eq!(recorder.phases(generation), vec![Phase::Prepare, Phase::Confirm, Phase::Idle]);
        assert_eq!(contents(&sequencer), vec![1, 2]);
        assert!(sequencer.last_output().is_none());
    }

    #[test]
    fn test_new_operation_supersedes_pending_one() {
        let (sequencer, recorder) = setup(Stack::new());

        let first = sequencer.invoke(StackOp::Push(1));
        sequencer.advance(ms(500));
        let second = sequencer.invoke(StackOp::Push(2));

        // The first operation's mutation would have fired here
        sequencer.advance(ms(600));
        assert_eq!(sequencer.phase(), Phase::Prepare);
        assert!(contents(&sequencer).is_empty());

        sequencer.advance(ms(10_000));
        assert_eq!(contents(&sequencer), vec![2]);
        assert_eq!(recorder.phases(first), vec![Phase::Prepare]);
        assert_eq!(
            recorder.phases(second),
            vec![Phase::Prepare, Phase::Mutate, Phase::Confirm, Phase::Idle]
        );

        let ends = recorder.ends.lock();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].generation, second);
    }

    #[test]
    fn test_supersede_after_mutation_drops_confirm() {
        let (sequencer, recorder) = setup(Stack::new());

        let first = sequencer.invoke(StackOp::Push(1));
        sequencer.advance(ms(1000));
        assert_eq!(contents(&sequencer), vec![1]);

        sequencer.invoke(StackOp::Pop);
        sequencer.run_to_idle();

        assert!(contents(&sequencer).is_empty());
        assert_eq!(sequencer.last_output(), Some(Some(1)));
        assert_eq!(recorder.phases(first), vec![Phase::Prepare, Phase::Mutate]);
        assert!(recorder.ends.lock().iter().all(|context| context.generation != first));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let (sequencer, _recorder) = setup(Stack::new());

        let first = sequencer.invoke(StackOp::Push(1));
        sequencer.invoke(StackOp::Push(2));
        sequencer.fire(PendingTimer {
            due: Duration::ZERO,
            generation: first,
            target: TimerTarget::Mutate,
        });

        assert_eq!(sequencer.phase(), Phase::Prepare);
        assert!(contents(&sequencer).is_empty());
    }

    #[test]
    fn test_cancel() {
        let (sequencer, recorder) = setup(Stack::new());

        let generation = sequencer.invoke(StackOp::Push(5));
        assert!(sequencer.cancel());
        assert!(sequencer.is_idle());

        sequencer.advance(ms(10_000));
        assert!(contents(&sequencer).is_empty());
        assert_eq!(recorder.phases(generation), vec![Phase::Prepare]);
        assert!(recorder.ends.lock().is_empty());
        assert!(!sequencer.cancel());
    }

    #[test]
    fn test_run_to_idle() {
        let (sequencer, recorder) = setup(Stack::new());
        sequencer.invoke(StackOp::Push(7));
        sequencer.run_to_idle();

        assert!(sequencer.is_idle());
        assert_eq!(contents(&sequencer), vec![7]);
        assert_eq!(recorder.ends.lock().len(), 1);
        assert!(sequencer.time_until_next_phase().is_none());
    }

    #[test]
    fn test_speed_multiplier() {
        let config = SequencerConfig {
            speed: 2.0,
            ..SequencerConfig::default()
        };
        let sequencer = Sequencer::with_config(Stack::new(), config);

        sequencer.invoke(StackOp::Push(3));
        assert_eq!(sequencer.time_until_next_phase(), Some(ms(500)));
        sequencer.advance(ms(500));
        assert_eq!(sequencer.phase(), Phase::Mutate);
    }

    #[test]
    fn test_one_large_step_crosses_phases() {
        let (sequencer, recorder) = setup(Stack::new());
        let generation = sequencer.invoke(StackOp::Push(9));

        sequencer.advance(ms(2500));
        assert_eq!(sequencer.phase(), Phase::Confirm);
        assert_eq!(
            recorder.phases(generation),
            vec![Phase::Prepare, Phase::Mutate, Phase::Confirm]
        );
    }

    #[test]
    fn test_try_invoke_rejects_failed_precondition() {
        let (sequencer, recorder) = setup(Stack::new());

        let err = sequencer.try_invoke(StackOp::Pop).unwrap_err();
        assert_eq!(err, OperationError::EmptyStructure(StructureFamily::Stack));
        assert!(sequencer.is_idle());
        assert!(recorder.changes.lock().is_empty());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let (sequencer, recorder) = setup(Stack::new());
        let transient = Arc::new(Recorder::default());
        sequencer.add_subscriber(transient.clone());
        drop(transient);

        sequencer.invoke(StackOp::Push(1));
        assert_eq!(recorder.changes.lock().len(), 1);
        assert_eq!(sequencer.subscribers.read().len(), 1);
    }

    /// Starts a follow-up push from inside the end notification
    struct Chainer {
        sequencer: Mutex<Option<Weak<Sequencer<Stack<i64>>>>>,
    }

    impl PhaseSubscriber for Chainer {
        fn on_phase_change(&self, _context: &PhaseContext) {}

        fn on_phase_end(&self, _context: &PhaseContext) {
            let target = self.sequencer.lock().take();
            if let Some(sequencer) = target.and_then(|weak| weak.upgrade()) {
                sequencer.invoke(StackOp::Push(2));
            }
        }
    }

    #[test]
    fn test_subscriber_can_invoke_from_callback() {
        let sequencer = Arc::new(Sequencer::new(Stack::new()));
        let recorder = Arc::new(Recorder::default());
        let chainer = Arc::new(Chainer {
            sequencer: Mutex::new(Some(Arc::downgrade(&sequencer))),
        });
        sequencer.add_subscriber(recorder.clone());
        sequencer.add_subscriber(chainer.clone());

        let first = sequencer.invoke(StackOp::Push(1));
        sequencer.run_to_idle();

        assert_eq!(contents(&sequencer), vec![1, 2]);
        // The idle notification of the first push was superseded by the chained push
        assert_eq!(recorder.phases(first), vec![Phase::Prepare, Phase::Mutate, Phase::Confirm]);
        assert_eq!(recorder.ends.lock().len(), 2);
    }

    #[test]
    fn test_out_of_range_speed_falls_back() {
        for speed in [1e-20, 1e300, f64::NAN] {
            let config = SequencerConfig {
                speed,
                ..SequencerConfig::default()
            };
            let sequencer = Sequencer::with_config(Stack::new(), config);
            assert_eq!(sequencer.config().speed, 1.0);

            sequencer.invoke(StackOp::Push(1));
            assert_eq!(sequencer.time_until_next_phase(), Some(ms(1000)));
            sequencer.advance(ms(16));
            assert_eq!(sequencer.phase(), Phase::Prepare);
        }
    }

    #[test]
    fn test_extreme_speeds_saturate() {
        for speed in [MIN_SPEED, MAX_SPEED] {
            let config = SequencerConfig {
                speed,
                ..SequencerConfig::default()
            };
            let sequencer = Sequencer::with_config(Stack::new(), config);

            sequencer.invoke(StackOp::Push(1));
            assert!(sequencer.time_until_next_phase().is_some());
            sequencer.advance(Duration::MAX);
            sequencer.advance(Duration::MAX);
            assert!(sequencer.is_idle());
            assert_eq!(contents(&sequencer), vec![1]);

            sequencer.invoke(StackOp::Push(2));
            assert!(sequencer.time_until_next_phase().is_some());
            sequencer.run_to_idle();
            assert_eq!(contents(&sequencer), vec![1, 2]);
        }
    }

    #[test]
    fn test_state_readable_while_structure_is_borrowed() {
        let sequencer = Sequencer::new(Stack::new());
        sequencer.invoke(StackOp::Push(5));

        let structure = sequencer.structure();
        let guard = structure.read();
        std::thread::scope(|scope| {
            let handle = scope.spawn(|| sequencer.advance(ms(1000)));
            // The mutation waits on the structure lock, not on the state lock
            std::thread::sleep(ms(50));
            assert_eq!(sequencer.phase(), Phase::Prepare);
            assert!(!sequencer.is_idle());
            drop(guard);
            handle.join().unwrap();
        });

        assert_eq!(sequencer.phase(), Phase::Mutate);
        assert_eq!(contents(&sequencer), vec![5]);
        assert_eq!(sequencer.last_output(), Some(None));
    }
}
