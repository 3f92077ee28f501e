//! # Transition Manager
//!
//! Owns the current transform of every entity and the set of tasks moving
//! them towards a layout.
//!
//! ## Frame lifecycle
//!
//! ```text
//! tick(now):
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. ADVANCE   position + orientation tasks, write eased values │
//! │ 2. RENDER    sink.render() if the render driver is active     │
//! │ 3. RETIRE    drop every task whose progress reached 1.0       │
//! │ 4. APPLY     latest deferred request -> transform_to()        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! `transform_to` replaces the whole active set. Nothing blends with a
//! cancelled transition: the new tasks start from wherever each entity was
//! left by the last tick.

use periodic_shared::{EulerAngles, Transform, Vec3};

use crate::easing::Easing;
use crate::error::{TweenError, TweenResult};
use crate::random::RandomSource;
use crate::render::{RenderFrame, RenderSink, Viewport};
use crate::request::{RequestQueue, TransitionRequests};
use crate::tween::{Lerp, Tween};

/// One task bound to the entity it writes to.
#[derive(Clone, Copy, Debug)]
struct EntityTween<T> {
    entity: usize,
    tween: Tween<T>,
}

/// Every in-flight task plus the render-driver sentinel.
#[derive(Clone, Debug, Default)]
pub struct ActiveTransitionSet {
    positions: Vec<EntityTween<Vec3>>,
    orientations: Vec<EntityTween<EulerAngles>>,
    render_driver: Option<Tween<()>>,
}

impl ActiveTransitionSet {
    /// Number of active tasks, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len() + self.orientations.len() + usize::from(self.render_driver.is_some())
    }

    /// True when nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of per-entity tasks (position and orientation).
    #[must_use]
    pub fn entity_tasks(&self) -> usize {
        self.positions.len() + self.orientations.len()
    }

    /// True while the render driver keeps the sink drawing.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.render_driver.is_some()
    }

    /// Latest completion time over every active task.
    #[must_use]
    pub fn settles_at_ms(&self) -> Option<f64> {
        let entity_ends = self
            .positions
            .iter()
            .map(|task| task.tween.end_ms())
            .chain(self.orientations.iter().map(|task| task.tween.end_ms()));

        entity_ends
            .chain(self.render_driver.iter().map(Tween::end_ms))
            .reduce(f64::max)
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.orientations.clear();
        self.render_driver = None;
    }
}

/// What a `transform_to` call scheduled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionPlan {
    /// Entities given position and orientation tasks.
    pub scheduled: usize,
    /// Entities past the end of the target array, left where they are.
    pub skipped: usize,
    /// Tasks discarded from the previous transition, sentinel included.
    pub cancelled: usize,
    /// Start time of every new task.
    pub started_ms: f64,
    /// End of the render driver (`start + 2 * base`).
    pub render_until_ms: f64,
    /// Completion time of the slowest entity task.
    pub settles_at_ms: f64,
}

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The render sink was invoked.
    pub rendered: bool,
    /// Entity tasks that finished on this tick.
    pub completed: usize,
    /// A deferred request replaced the active set after the tick.
    pub applied_request: bool,
    /// Tasks still active when the tick returned.
    pub active: usize,
}

/// Schedules and advances layout transitions.
pub struct TransitionManager {
    transforms: Vec<Transform>,
    active: ActiveTransitionSet,
    random: Box<dyn RandomSource>,
    sink: Box<dyn RenderSink>,
    easing: Easing,
    now_ms: f64,
    queue: RequestQueue,
}

impl TransitionManager {
    /// Default number of deferred requests that can wait for a tick.
    pub const DEFAULT_REQUEST_CAPACITY: usize = 16;

    /// Creates a manager with no entities.
    #[must_use]
    pub fn new(sink: Box<dyn RenderSink>, random: Box<dyn RandomSource>) -> Self {
        Self {
            transforms: Vec::new(),
            active: ActiveTransitionSet::default(),
            random,
            sink,
            easing: Easing::default(),
            now_ms: 0.0,
            queue: RequestQueue::new(Self::DEFAULT_REQUEST_CAPACITY),
        }
    }

    /// Sets the easing used by entity tasks.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets how many deferred requests may be pending at once.
    ///
    /// Senders handed out earlier are disconnected.
    #[must_use]
    pub fn with_request_capacity(mut self, capacity: usize) -> Self {
        self.queue = RequestQueue::new(capacity);
        self
    }

    /// Adds an entity at `initial` and returns its index.
    pub fn spawn(&mut self, initial: Transform) -> usize {
        self.transforms.push(initial);
        self.transforms.len() - 1
    }

    /// Number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.transforms.len()
    }

    /// Current transform of every entity.
    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// The active task set.
    #[must_use]
    pub fn active(&self) -> &ActiveTransitionSet {
        &self.active
    }

    /// True when no task, not even the render driver, is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Time of the last tick.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Sender for deferred `transform_to` requests.
    #[must_use]
    pub fn requests(&self) -> TransitionRequests {
        self.queue.requests().clone()
    }

    /// The random source used for duration jitter.
    pub fn random_mut(&mut self) -> &mut dyn RandomSource {
        self.random.as_mut()
    }

    /// Forwards a viewport change to the sink and redraws once.
    pub fn resize(&mut self, viewport: Viewport) {
        self.sink.resize(viewport);
        self.redraw();
    }

    /// Invokes the sink once, outside of the render driver.
    pub fn redraw(&mut self) {
        let frame = RenderFrame::new(self.now_ms, &self.transforms, self.queue.requests());
        self.sink.render(&frame);
    }

    /// Starts a transition of every entity towards `targets`.
    ///
    /// Cancels all active tasks, then gives each entity with a target a
    /// position task and an orientation task whose durations are drawn
    /// independently from `[base, 2 * base)`. A render driver keeps the
    /// sink drawing for `2 * base`. Entities without a target are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TweenError::InvalidDuration`] if `base_duration_ms` is
    /// negative or not finite. The active set is left untouched.
    pub fn transform_to(&mut self, targets: &[Transform], base_duration_ms: f64) -> TweenResult<TransitionPlan> {
        if !base_duration_ms.is_finite() || base_duration_ms < 0.0 {
            return Err(TweenError::InvalidDuration(base_duration_ms));
        }

        let cancelled = self.active.len();
        self.active.clear();

        let start = self.now_ms;
        let mut settles_at_ms = start;

        for (entity, (current, target)) in self.transforms.iter().zip(targets).enumerate() {
            let position_ms = jittered(self.random.as_mut(), base_duration_ms);
            let orientation_ms = jittered(self.random.as_mut(), base_duration_ms);
            settles_at_ms = settles_at_ms.max(start + position_ms).max(start + orientation_ms);

            self.active.positions.push(EntityTween {
                entity,
                tween: Tween::new(current.position, target.position, start, position_ms, self.easing),
            });
            self.active.orientations.push(EntityTween {
                entity,
                tween: Tween::new(current.orientation, target.orientation, start, orientation_ms, self.easing),
            });
        }

        let render_until_ms = start + base_duration_ms * 2.0;
        self.active.render_driver = Some(Tween::new((), (), start, base_duration_ms * 2.0, Easing::Linear));

        let scheduled = self.transforms.len().min(targets.len());
        let skipped = self.transforms.len() - scheduled;
        if skipped > 0 {
            tracing::debug!(skipped, targets = targets.len(), "entities without a target left in place");
        }
        tracing::debug!(scheduled, cancelled, base_duration_ms, "transition started");

        Ok(TransitionPlan {
            scheduled,
            skipped,
            cancelled,
            started_ms: start,
            render_until_ms,
            settles_at_ms,
        })
    }

    /// Advances every task to `now_ms`.
    ///
    /// Ticking twice at the same time leaves the transforms unchanged.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        self.now_ms = now_ms;

        let transforms = &mut self.transforms;
        let mut completed = advance(&mut self.active.positions, now_ms, |entity, value| {
            transforms[entity].position = value;
        });
        completed += advance(&mut self.active.orientations, now_ms, |entity, value| {
            transforms[entity].orientation = value;
        });

        let driver = self.active.render_driver.as_ref().and_then(|driver| driver.sample(now_ms));
        let rendered = driver.is_some();
        if rendered {
            let frame = RenderFrame::new(now_ms, &self.transforms, self.queue.requests());
            self.sink.render(&frame);
        }
        if driver.is_some_and(|sample| sample.complete) {
            self.active.render_driver = None;
            tracing::trace!(now_ms, "render driver finished");
        }

        let applied_request = self.apply_pending();

        TickReport {
            rendered,
            completed,
            applied_request,
            active: self.active.len(),
        }
    }

    /// Applies the most recent deferred request, if any.
    fn apply_pending(&mut self) -> bool {
        let Some(request) = self.queue.drain_latest() else {
            return false;
        };

        match self.transform_to(&request.targets, request.base_duration_ms) {
            Ok(plan) => {
                tracing::debug!(scheduled = plan.scheduled, "deferred transition applied");
                true
            }
            Err(err) => {
                tracing::warn!(%err, "deferred transition rejected");
                false
            }
        }
    }
}

impl std::fmt::Debug for TransitionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionManager")
            .field("entities", &self.transforms.len())
            .field("active", &self.active.len())
            .field("easing", &self.easing)
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

/// `base + random * base`: uniform in `[base, 2 * base)`.
fn jittered(random: &mut dyn RandomSource, base_ms: f64) -> f64 {
    base_ms + random.next_unit() * base_ms
}

/// Samples every task, hands the values to `write` and retires finished
/// tasks. Returns how many finished.
fn advance<T: Lerp>(tasks: &mut Vec<EntityTween<T>>, now_ms: f64, mut write: impl FnMut(usize, T)) -> usize {
    let before = tasks.len();
    tasks.retain(|task| match task.tween.sample(now_ms) {
        Some(sample) => {
            write(task.entity, sample.value);
            !sample.complete
        }
        None => true,
    });
    before - tasks.len()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::random::FixedSequence;
    use crate::render::NullSink;
    use crate::request::TransitionRequest;

    fn manager_with(entities: &[Transform], jitter: f64) -> TransitionManager {
        let mut manager = TransitionManager::new(Box::new(NullSink), Box::new(FixedSequence::constant(jitter)));
        for transform in entities {
            manager.spawn(*transform);
        }
        manager
    }

    #[test]
    fn test_durations_are_jittered_within_range() {
        let mut manager = TransitionManager::new(
            Box::new(NullSink),
            Box::new(FixedSequence::new(vec![0.0, 0.5, 0.999])),
        );
        manager.spawn(Transform::IDENTITY);
        manager.spawn(Transform::IDENTITY);

        let targets = [Transform::at(Vec3::X), Transform::at(Vec3::Y)];
        let plan = manager.transform_to(&targets, 100.0).unwrap();

        assert_eq!(plan.scheduled, 2);
        assert_eq!(plan.render_until_ms, 200.0);
        // Draws were 0.0, 0.5, 0.999, 0.0 -> slowest task is 199.9ms.
        assert!((plan.settles_at_ms - 199.9).abs() < 1e-9);
    }

    #[test]
    fn test_skips_entities_past_target_array() {
        let mut manager = manager_with(&[Transform::IDENTITY; 3], 0.0);
        let plan = manager.transform_to(&[Transform::at(Vec3::X)], 10.0).unwrap();
        assert_eq!(plan.scheduled, 1);
        assert_eq!(plan.skipped, 2);
        assert_eq!(manager.active().entity_tasks(), 2);

        manager.tick(10.0);
        assert_eq!(manager.transforms()[0].position, Vec3::X);
        assert_eq!(manager.transforms()[2].position, Vec3::ZERO);
    }

    #[test]
    fn test_invalid_duration_keeps_active_set() {
        let mut manager = manager_with(&[Transform::IDENTITY], 0.0);
        manager.transform_to(&[Transform::at(Vec3::X)], 10.0).unwrap();
        let before = manager.active().len();

        assert!(manager.transform_to(&[Transform::IDENTITY], f64::NAN).is_err());
        assert!(matches!(
            manager.transform_to(&[Transform::IDENTITY], -1.0),
            Err(TweenError::InvalidDuration(_))
        ));
        assert_eq!(manager.active().len(), before);
    }

    #[test]
    fn test_tick_is_idempotent() {
        let mut manager = manager_with(&[Transform::IDENTITY; 2], 0.5);
        let targets = [Transform::at(Vec3::new(100.0, 0.0, 0.0)); 2];
        manager.transform_to(&targets, 100.0).unwrap();

        manager.tick(60.0);
        let first = manager.transforms().to_vec();
        manager.tick(60.0);
        assert_eq!(manager.transforms(), &first[..]);
    }

    #[test]
    fn test_zero_duration_lands_on_first_tick() {
        let mut manager = manager_with(&[Transform::IDENTITY], 0.3);
        let target = Transform::looking_at(Vec3::new(5.0, 5.0, 5.0), Vec3::new(10.0, 10.0, 10.0));
        manager.transform_to(&[target], 0.0).unwrap();

        let report = manager.tick(0.0);
        assert!(report.rendered);
        assert_eq!(report.completed, 2);
        assert_eq!(manager.transforms()[0], target);
        assert!(manager.is_idle());
    }

    #[test]
    fn test_render_request_is_deferred_to_end_of_tick() {
        let fired = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&fired);
        let away: Arc<[Transform]> = Arc::from(vec![Transform::at(Vec3::new(0.0, 0.0, -50.0))]);

        let sink = move |frame: &RenderFrame<'_>| {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                assert!(frame.request(TransitionRequest::new(Arc::clone(&away), 10.0)));
            }
        };
        let mut manager = TransitionManager::new(Box::new(sink), Box::new(FixedSequence::constant(0.0)));
        manager.spawn(Transform::IDENTITY);
        manager.transform_to(&[Transform::at(Vec3::X)], 100.0).unwrap();

        let report = manager.tick(5.0);
        assert!(report.rendered);
        assert!(report.applied_request);
        assert_eq!(fired.get(), 1);

        // The replacement started at t=5 with base 10.
        manager.tick(15.0);
        assert_eq!(manager.transforms()[0].position, Vec3::new(0.0, 0.0, -50.0));
    }
}
