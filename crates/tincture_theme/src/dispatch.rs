//! Transition dispatcher
//!
//! Plays the active transition across a snapshot boundary. The host surface
//! captures the "before" view, runs the state commit synchronously, captures
//! the "after" view, and signals readiness; only then does the effect read
//! geometry and start playing.
//!
//! A single interaction walks
//! `Idle -> CaptureRequested -> SnapshotReady -> EffectPlaying -> Idle`.
//! Failures after the commit never roll the state back: the change simply
//! shows without the effect.

use crate::environment::Environment;
use crate::error::TransitionError;
use crate::geometry::{max_effect_radius, Point};
use crate::root::StyleRoot;
use crate::transition::TransitionKind;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tincture_animation::EffectPlan;

/// Style variable holding the origin's x coordinate
pub const ORIGIN_X_VAR: &str = "--x";
/// Style variable holding the origin's y coordinate
pub const ORIGIN_Y_VAR: &str = "--y";

const HISTORY_LIMIT: usize = 32;

/// A started capture
pub trait CaptureHandle {
    fn id(&self) -> u64;

    /// Block until both snapshots exist
    fn when_ready(&mut self) -> Result<(), TransitionError>;

    /// Abandon the capture, jumping straight to the new view
    fn skip(&mut self);

    /// The capture's effect has completed or been skipped
    fn is_finished(&self) -> bool;
}

/// Host surface able to capture snapshots and animate between them
pub trait TransitionSurface {
    /// Take the "before" snapshot, run `commit`, and take the "after"
    /// snapshot. Implementations must call `commit` exactly once on success.
    fn begin_capture(
        &mut self,
        commit: &mut dyn FnMut(),
    ) -> Result<Box<dyn CaptureHandle>, TransitionError>;

    /// Start the effect on a ready capture
    fn play_effect(
        &mut self,
        capture: &dyn CaptureHandle,
        kind: TransitionKind,
        plan: &EffectPlan,
    ) -> Result<(), TransitionError>;
}

/// Whatever the dispatcher commits into; it only needs the root for the
/// origin variables
pub trait TransitionTarget {
    fn root_mut(&mut self) -> &mut dyn StyleRoot;
}

/// Phase of the interaction in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    #[default]
    Idle,
    CaptureRequested,
    SnapshotReady,
    EffectPlaying,
}

/// Why a change skipped the animated path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstantReason {
    /// Transitions are switched off in the store config
    Disabled,
    NoOrigin,
    Unsupported,
    ReducedMotion,
}

impl fmt::Display for InstantReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstantReason::Disabled => "transitions disabled",
            InstantReason::NoOrigin => "no origin point",
            InstantReason::Unsupported => "view transitions unsupported",
            InstantReason::ReducedMotion => "reduced motion requested",
        })
    }
}

/// How a change was shown. The state is committed in every case.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionOutcome {
    Instant(InstantReason),
    Animated {
        kind: TransitionKind,
        origin: Point,
        radius: f32,
    },
    /// Committed, but the capture or effect failed
    Degraded(String),
}

impl TransitionOutcome {
    pub fn is_animated(&self) -> bool {
        matches!(self, TransitionOutcome::Animated { .. })
    }
}

/// Parameters of one transitioned change
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRequest {
    pub kind: TransitionKind,
    pub origin: Option<Point>,
    pub enabled: bool,
}

/// Runs transitioned commits against a surface
pub struct TransitionDispatcher {
    surface: Box<dyn TransitionSurface>,
    active: Option<Box<dyn CaptureHandle>>,
    phase: TransitionPhase,
    history: VecDeque<(TransitionPhase, TransitionPhase)>,
}

impl TransitionDispatcher {
    pub fn new(surface: Box<dyn TransitionSurface>) -> Self {
        Self {
            surface,
            active: None,
            phase: TransitionPhase::Idle,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Recent phase changes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(TransitionPhase, TransitionPhase)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Commit `commit` into `target`, animated when the environment allows.
    ///
    /// A capture still playing from an earlier change is skipped first, on
    /// the instant path too, so rapid triggers restart rather than stack.
    pub fn run<T, F>(
        &mut self,
        target: &mut T,
        env: &dyn Environment,
        request: TransitionRequest,
        commit: F,
    ) -> TransitionOutcome
    where
        T: TransitionTarget,
        F: FnOnce(&mut T),
    {
        self.cancel_active();

        let origin = match Self::disqualify(env, &request) {
            Ok(origin) => origin,
            Err(reason) => {
                tracing::trace!("TransitionDispatcher::run - instant change: {reason}");
                commit(target);
                return TransitionOutcome::Instant(reason);
            }
        };

        let root = target.root_mut();
        root.set_property(ORIGIN_X_VAR, &format!("{}px", origin.x));
        root.set_property(ORIGIN_Y_VAR, &format!("{}px", origin.y));

        self.advance(TransitionPhase::CaptureRequested);
        let mut pending = Some(commit);
        let begun = {
            let mut run_commit = || {
                if let Some(commit) = pending.take() {
                    commit(&mut *target);
                }
            };
            self.surface.begin_capture(&mut run_commit)
        };

        let mut capture = match begun {
            Ok(capture) => capture,
            Err(err) => {
                if let Some(commit) = pending.take() {
                    commit(target);
                }
                tracing::warn!("transition capture failed, changing instantly: {err}");
                self.advance(TransitionPhase::Idle);
                return TransitionOutcome::Degraded(err.to_string());
            }
        };
        if let Some(commit) = pending.take() {
            tracing::warn!("transition surface did not run the commit; running it directly");
            commit(target);
        }

        if let Err(err) = capture.when_ready() {
            tracing::warn!("transition capture never became ready: {err}");
            capture.skip();
            self.advance(TransitionPhase::Idle);
            return TransitionOutcome::Degraded(err.to_string());
        }
        self.advance(TransitionPhase::SnapshotReady);

        let radius = max_effect_radius(origin, env.viewport());
        let config = request.kind.config();
        self.advance(TransitionPhase::EffectPlaying);
        let played = config.apply(self.surface.as_mut(), &*capture, origin, radius);
        self.active = Some(capture);
        self.advance(TransitionPhase::Idle);

        match played {
            Ok(()) => TransitionOutcome::Animated {
                kind: request.kind,
                origin,
                radius,
            },
            Err(err) => {
                tracing::warn!("{} effect failed: {err}", config.name);
                TransitionOutcome::Degraded(err.to_string())
            }
        }
    }

    fn disqualify(env: &dyn Environment, request: &TransitionRequest) -> Result<Point, InstantReason> {
        if !request.enabled {
            return Err(InstantReason::Disabled);
        }
        let origin = request.origin.ok_or(InstantReason::NoOrigin)?;
        if !env.supports_view_transitions() {
            return Err(InstantReason::Unsupported);
        }
        if env.prefers_reduced_motion() {
            return Err(InstantReason::ReducedMotion);
        }
        Ok(origin)
    }

    fn cancel_active(&mut self) {
        if let Some(mut previous) = self.active.take() {
            if !previous.is_finished() {
                tracing::debug!(
                    "TransitionDispatcher - skipping capture {} still in flight",
                    previous.id()
                );
                previous.skip();
            }
        }
    }

    fn advance(&mut self, to: TransitionPhase) {
        let from = self.phase;
        tracing::trace!("TransitionDispatcher - {from:?} -> {to:?}");
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((from, to));
        self.phase = to;
    }
}

impl fmt::Debug for TransitionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDispatcher")
            .field("phase", &self.phase)
            .field("active", &self.active.as_ref().map(|c| c.id()))
            .finish_non_exhaustive()
    }
}

/// Step at which a [`RecordingSurface`] is told to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    /// Before the commit runs
    Begin,
    Ready,
    Play,
}

/// One capture as seen by a [`RecordingSurface`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureRecord {
    pub id: u64,
    pub committed: bool,
    pub skipped: bool,
    pub finished: bool,
}

/// An effect a [`RecordingSurface`] was asked to play
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedEffect {
    pub capture: u64,
    pub kind: TransitionKind,
    pub plan: EffectPlan,
}

#[derive(Debug, Default)]
struct SurfaceLog {
    next_id: u64,
    captures: Vec<CaptureRecord>,
    played: Vec<PlayedEffect>,
    fail_at: Option<FailurePoint>,
}

impl SurfaceLog {
    fn record_mut(&mut self, id: u64) -> Option<&mut CaptureRecord> {
        self.captures.iter_mut().find(|c| c.id == id)
    }
}

/// Headless surface that records captures and effects.
///
/// Effects stay "playing" until [`finish_all`](Self::finish_all) is called,
/// so overlapping changes can be observed. Clones share the log.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    log: Arc<RwLock<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later capture fail at `point`, or stop failing with `None`
    pub fn fail_at(&self, point: Option<FailurePoint>) {
        self.write().fail_at = point;
    }

    pub fn captures(&self) -> Vec<CaptureRecord> {
        self.read().captures.clone()
    }

    pub fn played(&self) -> Vec<PlayedEffect> {
        self.read().played.clone()
    }

    pub fn last_played(&self) -> Option<PlayedEffect> {
        self.read().played.last().cloned()
    }

    /// Mark every running effect as complete
    pub fn finish_all(&self) {
        for record in &mut self.write().captures {
            record.finished = true;
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SurfaceLog> {
        self.log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SurfaceLog> {
        self.log.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TransitionSurface for RecordingSurface {
    fn begin_capture(
        &mut self,
        commit: &mut dyn FnMut(),
    ) -> Result<Box<dyn CaptureHandle>, TransitionError> {
        if self.read().fail_at == Some(FailurePoint::Begin) {
            return Err(TransitionError::Unsupported);
        }
        commit();

        let mut log = self.write();
        log.next_id += 1;
        let id = log.next_id;
        log.captures.push(CaptureRecord {
            id,
            committed: true,
            ..Default::default()
        });
        Ok(Box::new(RecordedCapture {
            id,
            log: Arc::clone(&self.log),
        }))
    }

    fn play_effect(
        &mut self,
        capture: &dyn CaptureHandle,
        kind: TransitionKind,
        plan: &EffectPlan,
    ) -> Result<(), TransitionError> {
        let mut log = self.write();
        if log.fail_at == Some(FailurePoint::Play) {
            return Err(TransitionError::Playback(format!("{kind} rejected")));
        }
        log.played.push(PlayedEffect {
            capture: capture.id(),
            kind,
            plan: plan.clone(),
        });
        Ok(())
    }
}

struct RecordedCapture {
    id: u64,
    log: Arc<RwLock<SurfaceLog>>,
}

impl CaptureHandle for RecordedCapture {
    fn id(&self) -> u64 {
        self.id
    }

    fn when_ready(&mut self) -> Result<(), TransitionError> {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        if log.fail_at == Some(FailurePoint::Ready) {
            return Err(TransitionError::Aborted(format!("capture {}", self.id)));
        }
        Ok(())
    }

    fn skip(&mut self) {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(record) = log.record_mut(self.id) {
            record.skipped = true;
            record.finished = true;
        }
    }

    fn is_finished(&self) -> bool {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        log.captures
            .iter()
            .find(|c| c.id == self.id)
            .map_or(true, |c| c.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::geometry::Viewport;
    use crate::root::MemoryRoot;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Target {
        root: MemoryRoot,
        commits: u32,
    }

    impl TransitionTarget for Target {
        fn root_mut(&mut self) -> &mut dyn StyleRoot {
            &mut self.root
        }
    }

    fn request(origin: Option<Point>) -> TransitionRequest {
        TransitionRequest {
            kind: TransitionKind::Radial,
            origin,
            enabled: true,
        }
    }

    fn env() -> StaticEnvironment {
        StaticEnvironment::new().with_viewport(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn animated_run_walks_every_phase() {
        let surface = RecordingSurface::new();
        let mut dispatcher = TransitionDispatcher::new(Box::new(surface.clone()));
        let mut target = Target::default();

        let outcome = dispatcher.run(
            &mut target,
            &env(),
            request(Some(Point::new(100.0, 50.0))),
            |t| t.commits += 1,
        );

        assert!(outcome.is_animated());
        assert_eq!(target.commits, 1);
        assert_eq!(target.root.property("--x").as_deref(), Some("100px"));
        assert_eq!(target.root.property("--y").as_deref(), Some("50px"));
        assert_eq!(
            dispatcher.history().map(|(_, to)| *to).collect::<Vec<_>>(),
            vec![
                TransitionPhase::CaptureRequested,
                TransitionPhase::SnapshotReady,
                TransitionPhase::EffectPlaying,
                TransitionPhase::Idle,
            ]
        );
        assert_eq!(surface.last_played().map(|p| p.kind), Some(TransitionKind::Radial));
    }

    #[test]
    fn disqualified_runs_commit_instantly() {
        let surface = RecordingSurface::new();
        let mut dispatcher = TransitionDispatcher::new(Box::new(surface.clone()));
        let mut target = Target::default();

        let cases = [
            (env(), request(None), InstantReason::NoOrigin),
            (
                env().with_view_transitions(false),
                request(Some(Point::default())),
                InstantReason::Unsupported,
            ),
            (
                env().with_reduced_motion(true),
                request(Some(Point::default())),
                InstantReason::ReducedMotion,
            ),
            (
                env(),
                TransitionRequest {
                    enabled: false,
                    ..request(Some(Point::default()))
                },
                InstantReason::Disabled,
            ),
        ];
        for (env, request, reason) in cases {
            let outcome = dispatcher.run(&mut target, &env, request, |t| t.commits += 1);
            assert_eq!(outcome, TransitionOutcome::Instant(reason));
        }

        assert_eq!(target.commits, 4);
        assert!(surface.captures().is_empty());
        assert_eq!(target.root.property("--x"), None);
        assert_eq!(dispatcher.history().count(), 0);
    }

    #[test]
    fn failures_still_commit_exactly_once() {
        for point in [FailurePoint::Begin, FailurePoint::Ready, FailurePoint::Play] {
            let surface = RecordingSurface::new();
            surface.fail_at(Some(point));
            let mut dispatcher = TransitionDispatcher::new(Box::new(surface.clone()));
            let mut target = Target::default();

            let outcome = dispatcher.run(
                &mut target,
                &env(),
                request(Some(Point::default())),
                |t| t.commits += 1,
            );

            assert!(matches!(outcome, TransitionOutcome::Degraded(_)), "{point:?}");
            assert_eq!(target.commits, 1, "{point:?}");
            assert_eq!(dispatcher.phase(), TransitionPhase::Idle);
            assert!(surface.played().is_empty());
        }
    }

    #[test]
    fn overlapping_trigger_skips_running_capture() {
        let surface = RecordingSurface::new();
        let mut dispatcher = TransitionDispatcher::new(Box::new(surface.clone()));
        let mut target = Target::default();
        let origin = Some(Point::new(10.0, 10.0));

        dispatcher.run(&mut target, &env(), request(origin), |_| {});
        dispatcher.run(&mut target, &env(), request(origin), |_| {});
        surface.finish_all();
        dispatcher.run(&mut target, &env(), request(origin), |_| {});

        let skipped: Vec<_> = surface.captures().iter().map(|c| c.skipped).collect();
        assert_eq!(skipped, vec![true, false, false]);
        assert_eq!(surface.played().len(), 3);
    }

    #[test]
    fn instant_change_skips_running_capture() {
        let surface = RecordingSurface::new();
        let mut dispatcher = TransitionDispatcher::new(Box::new(surface.clone()));
        let mut target = Target::default();

        dispatcher.run(&mut target, &env(), request(Some(Point::new(10.0, 10.0))), |_| {});
        let outcome = dispatcher.run(&mut target, &env(), request(None), |_| {});

        assert_eq!(outcome, TransitionOutcome::Instant(InstantReason::NoOrigin));
        let skipped: Vec<_> = surface.captures().iter().map(|c| c.skipped).collect();
        assert_eq!(skipped, vec![true]);
        assert_eq!(format!("{dispatcher:?}"), "TransitionDispatcher { phase: Idle, active: None, .. }");
    }

    #[test]
    fn history_is_bounded() {
        let mut dispatcher = TransitionDispatcher::new(Box::new(RecordingSurface::new()));
        let mut target = Target::default();
        for _ in 0..20 {
            dispatcher.run(&mut target, &env(), request(Some(Point::default())), |_| {});
        }
        assert_eq!(dispatcher.history().count(), HISTORY_LIMIT);
    }
}
