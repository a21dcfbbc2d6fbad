use crate::advance::{AdvanceController, Fired};
use crate::catalog::{TourStep, events};
use crate::config::TourConfig;
use crate::error::StopReason;
use crate::host::{HostEvent, TooltipAction, TourHost};
use crate::overlay::{OverlayMetrics, TooltipContent};
use crate::progress::{Identity, ProgressStore, TourProgress};
use crate::resolver::{self, Target, TargetWait};
use crate::scheduler::{Generation, PollKind, PollScheduler};

use super::state::{TourStatus, Transition};

/// Timing and geometry the session runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub target_poll_ms: u64,
    pub modal_poll_ms: u64,
    pub wait_log_ms: u64,
    pub metrics: OverlayMetrics,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&TourConfig::default())
    }
}

impl From<&TourConfig> for SessionSettings {
    fn from(config: &TourConfig) -> Self {
        Self {
            target_poll_ms: config.target_poll_ms,
            modal_poll_ms: config.modal_poll_ms,
            wait_log_ms: config.wait_log_ms,
            metrics: OverlayMetrics {
                padding: config.highlight_padding,
                margin: config.viewport_margin,
            },
        }
    }
}

/// What the session is doing for the current step.
#[derive(Debug, Clone)]
pub enum Phase {
    /// No step is live.
    Idle,
    /// Polling for the step's target.
    Waiting { index: usize, wait: TargetWait },
    /// Target found, overlay painted, triggers armed.
    Showing { index: usize, target: Target },
}

/// One running tour for one identity.
///
/// Owns the progress record, every poll and listener bound for the current
/// step, and the host it draws on. All of it is torn down together on each
/// transition.
pub struct TourSession<H: TourHost> {
    steps: Vec<TourStep>,
    host: H,
    store: ProgressStore,
    progress: TourProgress,
    settings: SessionSettings,
    scheduler: PollScheduler,
    controller: AdvanceController,
    generation: Generation,
    phase: Phase,
    now_ms: u64,
    advancing: bool,
    auto_started: bool,
}

impl<H: TourHost> TourSession<H> {
    /// Load the identity's progress. Nothing starts until [`restore`](Self::restore),
    /// a control call, or the shift-length signal.
    pub fn new(steps: Vec<TourStep>, host: H, store: ProgressStore, settings: SessionSettings) -> Self {
        let progress = store.load();
        tracing::debug!(key = store.key(), status = %progress.status, index = progress.step_index, "tour progress loaded");
        Self {
            steps,
            host,
            store,
            progress,
            settings,
            scheduler: PollScheduler::new(),
            controller: AdvanceController::new(),
            generation: Generation::default(),
            phase: Phase::Idle,
            now_ms: 0,
            advancing: false,
            auto_started: false,
        }
    }

    // --- control surface -------------------------------------------------

    /// Pick up where a previous page load left off, if the tour was active.
    pub fn restore(&mut self) {
        if self.progress.status == TourStatus::Active {
            self.resume();
        }
    }

    /// Begin at the first step, whatever the previous status.
    pub fn start(&mut self) {
        self.teardown(StopReason::Restarted);
        self.advancing = false;
        tracing::info!(steps = self.steps.len(), "tour started");
        self.activate(0);
    }

    /// Re-enter the persisted step, re-running its precheck.
    pub fn resume(&mut self) {
        self.teardown(StopReason::Restarted);
        self.advancing = false;
        let index = self.progress.step_index;
        tracing::info!(index, from = %self.progress.status, "tour resumed");
        self.activate(index);
    }

    /// Stop waiting and listening; keep the index.
    pub fn pause(&mut self) {
        if Transition::Pause.target(self.progress.status).is_none() {
            tracing::debug!(status = %self.progress.status, "pause ignored");
            return;
        }
        self.teardown(StopReason::Paused);
        self.apply(Transition::Pause, self.progress.step_index);
        tracing::info!(index = self.progress.step_index, "tour paused");
    }

    /// Dismiss the tour for good.
    pub fn skip(&mut self) {
        if Transition::Skip.target(self.progress.status).is_none() {
            tracing::debug!(status = %self.progress.status, "skip ignored");
            return;
        }
        self.teardown(StopReason::Skipped);
        self.apply(Transition::Skip, self.progress.step_index);
        tracing::info!(index = self.progress.step_index, "tour skipped");
    }

    /// Move past the current step. Re-entrant calls before the next clock
    /// tick are ignored.
    pub fn advance(&mut self) {
        if self.advancing {
            tracing::debug!(index = self.progress.step_index, "advance already in progress; ignored");
            return;
        }
        if Transition::Advance.target(self.progress.status).is_none() {
            tracing::debug!(status = %self.progress.status, "advance ignored");
            return;
        }
        self.advancing = true;

        let next = self.progress.step_index + 1;
        self.teardown(StopReason::Advanced);
        if next >= self.steps.len() {
            self.complete();
        } else {
            self.apply(Transition::Advance, next);
            self.enter_step(next);
        }
    }

    /// Address a different identity's record and pick it up from there.
    pub fn set_identity(&mut self, identity: &Identity) {
        self.teardown(StopReason::IdentityChanged);
        self.store.set_identity(identity);
        self.progress = self.store.load();
        tracing::info!(key = self.store.key(), status = %self.progress.status, "tour identity switched");
        self.restore();
    }

    // --- host driving ----------------------------------------------------

    /// Advance the session clock and run whatever polls are due.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        self.advancing = false;

        let generation = self.generation;
        for kind in self.scheduler.due(self.now_ms, generation) {
            // A poll may have moved the tour on; the rest belong to the old step.
            if self.generation != generation {
                break;
            }
            match kind {
                PollKind::Target => self.poll_target(),
                PollKind::Modal => self.poll_modal(),
            }
        }
    }

    /// Deliver one user or application event.
    pub fn dispatch(&mut self, event: HostEvent) {
        match &event {
            HostEvent::Named(name) if name == events::SHIFT_LENGTH_SELECTED => {
                self.on_shift_length_selected();
            }
            HostEvent::Resize | HostEvent::Scroll => {
                self.refresh_shown(true);
                return;
            }
            HostEvent::Tooltip(action) => {
                self.on_tooltip(*action);
                return;
            }
            _ => {}
        }

        if let Some(fired) = self.controller.handle(&event) {
            self.on_trigger(fired);
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn progress(&self) -> &TourProgress {
        &self.progress
    }

    pub fn status(&self) -> TourStatus {
        self.progress.status
    }

    pub fn step_index(&self) -> usize {
        self.progress.step_index
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    /// The step being waited on or shown.
    pub fn current_step(&self) -> Option<&TourStep> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Waiting { index, .. } | Phase::Showing { index, .. } => self.steps.get(*index),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, Phase::Waiting { .. })
    }

    pub fn shown_target(&self) -> Option<Target> {
        match &self.phase {
            Phase::Showing { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Any poll still scheduled.
    pub fn is_polling(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn live_listeners(&self) -> usize {
        self.controller.live_listeners()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    // --- internals -------------------------------------------------------

    fn activate(&mut self, index: usize) {
        let last = self.steps.len().saturating_sub(1);
        self.apply(Transition::Activate, index.min(last));
        if index >= self.steps.len() {
            self.complete();
            return;
        }
        self.enter_step(index);
    }

    /// Pass through steps whose precheck already holds, then wait on the first
    /// one that doesn't.
    fn enter_step(&mut self, start: usize) {
        let mut index = start;
        while index < self.steps.len() && self.steps[index].already_done(&self.host) {
            tracing::info!(step = self.steps[index].id, index, "precheck satisfied; passing through");
            index += 1;
            if index < self.steps.len() {
                self.apply(Transition::Advance, index);
            }
        }

        if index >= self.steps.len() {
            self.complete();
            return;
        }

        let step = &self.steps[index];
        tracing::debug!(step = step.id, index, "waiting for target");
        self.phase = Phase::Waiting {
            index,
            wait: TargetWait::new(step.id, self.now_ms, self.settings.wait_log_ms),
        };
        self.scheduler.schedule(
            PollKind::Target,
            self.generation,
            self.settings.target_poll_ms,
            self.now_ms,
        );
    }

    fn complete(&mut self) {
        self.teardown(StopReason::Completed);
        let last = self.steps.len().saturating_sub(1);
        let index = self.progress.step_index.min(last);
        if self.apply(Transition::Complete, index) {
            tracing::info!(index, "tour completed");
        }
    }

    fn poll_target(&mut self) {
        if matches!(self.phase, Phase::Showing { .. }) {
            self.refresh_shown(false);
            return;
        }
        let Phase::Waiting { index, wait } = &mut self.phase else {
            return;
        };
        let index = *index;
        if let Some(target) = wait.poll(&self.steps[index], &self.host, self.now_ms) {
            self.show(index, target);
        }
    }

    fn poll_modal(&mut self) {
        if let Some(fired) = self.controller.check_modal(&self.host) {
            self.on_trigger(fired);
        }
    }

    /// Paint, then arm. Triggers are never live before the overlay is.
    fn show(&mut self, index: usize, target: Target) {
        self.paint(index, &target);
        self.controller.arm(
            &self.steps[index],
            &target,
            self.generation,
            &self.host,
            &mut self.scheduler,
            self.settings.modal_poll_ms,
            self.now_ms,
        );
        // Keep tracking the target while it is shown.
        self.scheduler.schedule(
            PollKind::Target,
            self.generation,
            self.settings.target_poll_ms,
            self.now_ms + self.settings.target_poll_ms,
        );
        tracing::info!(step = self.steps[index].id, index, element = %target.element, overridden = target.overridden, "step shown");
        self.phase = Phase::Showing { index, target };
    }

    fn paint(&mut self, index: usize, target: &Target) {
        let step = &self.steps[index];
        let content = TooltipContent::new(step.title, step.body, index, self.steps.len());
        let tooltip = self.host.tooltip_size(&content);
        let frame = self
            .settings
            .metrics
            .layout(target.rect, self.host.viewport(), tooltip, content);
        if frame.tooltip.overlaps_target {
            tracing::debug!(step = step.id, placement = ?frame.tooltip.placement, "tooltip could not avoid target");
        }
        self.host.paint(&frame);
    }

    /// Re-resolve the shown step's target. A new element re-arms the step; a
    /// vanished one sends it back to waiting; a moved one is repainted.
    fn refresh_shown(&mut self, force_paint: bool) {
        let Phase::Showing { index, target } = self.phase.clone() else {
            return;
        };

        match resolver::resolve(&self.steps[index], &self.host) {
            None => {
                tracing::debug!(step = self.steps[index].id, "target lost; waiting again");
                self.restart_step(index);
            }
            Some(current) if current.element != target.element => {
                tracing::debug!(step = self.steps[index].id, from = %target.element, to = %current.element, "target replaced");
                self.restart_step(index);
                self.show(index, current);
            }
            Some(current) => {
                if force_paint || !current.same_as(&target) {
                    self.paint(index, &current);
                    self.phase = Phase::Showing {
                        index,
                        target: current,
                    };
                }
            }
        }
    }

    /// Drop the step's bindings and wait for its target again, without
    /// touching status or index. The precheck is not re-run.
    fn restart_step(&mut self, index: usize) {
        self.controller.disarm(&mut self.scheduler);
        self.scheduler.cancel_all();
        self.host.clear();
        self.generation.bump();
        self.phase = Phase::Waiting {
            index,
            wait: TargetWait::new(self.steps[index].id, self.now_ms, self.settings.wait_log_ms),
        };
        self.scheduler.schedule(
            PollKind::Target,
            self.generation,
            self.settings.target_poll_ms,
            self.now_ms + self.settings.target_poll_ms,
        );
    }

    fn on_trigger(&mut self, fired: Fired) {
        if self.advancing {
            tracing::debug!(trigger = %fired, "trigger ignored; already advancing");
            return;
        }
        tracing::info!(index = self.progress.step_index, trigger = %fired, "step trigger fired");
        self.advance();
    }

    fn on_tooltip(&mut self, action: TooltipAction) {
        if !matches!(self.phase, Phase::Showing { .. }) {
            tracing::debug!(?action, "tooltip action with no step shown");
            return;
        }
        match action {
            TooltipAction::Next => self.advance(),
            TooltipAction::Skip => self.skip(),
            TooltipAction::Later => self.pause(),
            TooltipAction::DontShowAgain => {
                tracing::info!("tour dismissed permanently");
                self.skip();
            }
        }
    }

    fn on_shift_length_selected(&mut self) {
        if self.auto_started || self.progress.status != TourStatus::Inactive {
            return;
        }
        self.auto_started = true;
        tracing::info!("shift length selected; starting tour");
        self.start();
    }

    /// Persist the status `transition` leads to, if the table allows it from
    /// the current one.
    fn apply(&mut self, transition: Transition, index: usize) -> bool {
        let Some(status) = transition.target(self.progress.status) else {
            tracing::debug!(?transition, status = %self.progress.status, "transition rejected");
            return false;
        };
        self.persist(status, index);
        true
    }

    fn persist(&mut self, status: TourStatus, index: usize) {
        self.progress = self.store.save(&TourProgress::new(status, index));
    }

    /// Cancel every poll and listener, clear the overlay, and invalidate
    /// anything still tagged with the old generation.
    fn teardown(&mut self, reason: StopReason) {
        let live = self.controller.disarm(&mut self.scheduler);
        let polls = self.scheduler.cancel_all();
        if matches!(self.phase, Phase::Showing { .. }) {
            self.host.clear();
        }
        let was_idle = matches!(self.phase, Phase::Idle);
        self.phase = Phase::Idle;
        self.generation.bump();
        if !was_idle {
            tracing::debug!(%reason, live, polls, generation = self.generation.value(), "step torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AdvanceCondition, TargetSpec, is_positive_int};
    use crate::progress::MemoryStore;
    use crate::sim::SimulatedHost;
    use crate::geometry::Rect;

    fn steps() -> Vec<TourStep> {
        vec![
            TourStep::new("a", "A", "first", TargetSpec::element("#a")).advance_on(AdvanceCondition::OnClick),
            TourStep::new("b", "B", "second", TargetSpec::element("#b"))
                .advance_on(AdvanceCondition::OnValidInput(is_positive_int)),
            TourStep::new("c", "C", "third", TargetSpec::element("#c"))
                .advance_on(AdvanceCondition::OnAnyOfEvents(vec!["done"])),
        ]
    }

    fn host() -> SimulatedHost {
        let mut host = SimulatedHost::new(1024.0, 768.0);
        host.place("#a", Rect::new(100.0, 100.0, 120.0, 40.0));
        host.place("#b", Rect::new(100.0, 300.0, 200.0, 40.0));
        host.place("#c", Rect::new(600.0, 500.0, 120.0, 40.0));
        host
    }

    fn session(host: SimulatedHost) -> TourSession<SimulatedHost> {
        let store = ProgressStore::new(Box::new(MemoryStore::new()), "t_v1", &Identity::anonymous());
        TourSession::new(steps(), host, store, SessionSettings::default())
    }

    #[test]
    fn start_waits_then_shows_on_next_tick() {
        let mut s = session(host());
        s.start();
        assert!(s.is_waiting());
        assert_eq!(s.live_listeners(), 0);

        s.tick(0);
        assert_eq!(s.shown_target().unwrap().element, s.host().handle("#a").unwrap());
        assert_eq!(s.live_listeners(), 1);
        assert_eq!(s.host().paint_count(), 1);
    }

    #[test]
    fn missing_target_keeps_waiting() {
        let mut h = host();
        h.remove("#a");
        let mut s = session(h);
        s.start();
        for t in (0..=6000).step_by(300) {
            s.tick(t);
        }
        assert!(s.is_waiting());
        assert!(s.is_polling());

        s.host_mut().place("#a", Rect::new(10.0, 10.0, 50.0, 20.0));
        s.tick(6300);
        assert!(s.shown_target().is_some());
    }

    #[test]
    fn advance_on_last_step_completes() {
        let mut s = session(host());
        s.start();
        s.tick(0);
        s.advance();
        s.tick(300);
        s.advance();
        s.tick(600);
        s.advance();
        assert_eq!(s.status(), TourStatus::Completed);
        assert_eq!(s.step_index(), 2);
        assert!(!s.is_polling());
        assert_eq!(s.live_listeners(), 0);
        assert!(s.host().current_frame().is_none());
    }

    #[test]
    fn second_trigger_in_same_tick_is_ignored() {
        let two_triggers = vec![
            TourStep::new("a", "A", "", TargetSpec::element("#a"))
                .advance_on(AdvanceCondition::OnClick)
                .advance_on(AdvanceCondition::OnAnyOfEvents(vec!["go"])),
            TourStep::new("b", "B", "", TargetSpec::element("#b"))
                .advance_on(AdvanceCondition::OnAnyOfEvents(vec!["go"])),
        ];
        let store = ProgressStore::new(Box::new(MemoryStore::new()), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(two_triggers, host(), store, SessionSettings::default());
        s.start();
        s.tick(0);

        let a = s.host().handle("#a").unwrap();
        s.dispatch(HostEvent::Click(a));
        s.dispatch(HostEvent::named("go"));
        s.advance();
        assert_eq!(s.step_index(), 1);
        assert_eq!(s.status(), TourStatus::Active);
    }

    #[test]
    fn pause_keeps_index_and_resume_rearms() {
        let mut s = session(host());
        s.start();
        s.tick(0);
        s.advance();
        s.tick(300);
        assert!(s.shown_target().is_some());

        s.pause();
        assert_eq!(s.status(), TourStatus::Paused);
        assert_eq!(s.step_index(), 1);
        assert_eq!(s.live_listeners(), 0);
        assert!(!s.is_polling());

        s.resume();
        s.tick(600);
        assert_eq!(s.status(), TourStatus::Active);
        assert_eq!(s.step_index(), 1);
        assert_eq!(s.current_step().unwrap().id, "b");
        assert_eq!(s.live_listeners(), 1);
    }

    #[test]
    fn precheck_chain_passes_through_steps() {
        let chained = vec![
            TourStep::new("a", "A", "", TargetSpec::element("#a")).precheck(|h| h.shift_active()),
            TourStep::new("b", "B", "", TargetSpec::element("#b")).precheck(|h| h.shift_active()),
            TourStep::new("c", "C", "", TargetSpec::element("#c")),
        ];
        let mut h = host();
        h.set_shift_active(true);
        let store = ProgressStore::new(Box::new(MemoryStore::new()), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(chained, h, store, SessionSettings::default());

        s.start();
        assert_eq!(s.step_index(), 2);
        s.tick(0);
        assert_eq!(s.current_step().unwrap().id, "c");
        assert_eq!(s.host().paint_count(), 1);
    }

    #[test]
    fn shift_length_signal_starts_only_inactive_tour_once() {
        let mut s = session(host());
        s.dispatch(HostEvent::named(events::SHIFT_LENGTH_SELECTED));
        assert_eq!(s.status(), TourStatus::Active);

        s.skip();
        s.dispatch(HostEvent::named(events::SHIFT_LENGTH_SELECTED));
        assert_eq!(s.status(), TourStatus::Skipped);
    }

    #[test]
    fn tooltip_buttons_map_to_controls() {
        let mut s = session(host());
        s.start();
        s.tick(0);
        s.dispatch(HostEvent::Tooltip(TooltipAction::Next));
        assert_eq!(s.step_index(), 1);

        s.tick(300);
        s.dispatch(HostEvent::Tooltip(TooltipAction::Later));
        assert_eq!(s.status(), TourStatus::Paused);

        s.resume();
        s.tick(600);
        s.dispatch(HostEvent::Tooltip(TooltipAction::DontShowAgain));
        assert_eq!(s.status(), TourStatus::Skipped);
    }

    #[test]
    fn moved_target_is_repainted_and_replaced_target_rearmed() {
        let overriding = vec![
            TourStep::new("a", "A", "", TargetSpec::with_override("#a", "#modal"))
                .advance_on(AdvanceCondition::OnClick),
        ];
        let store = ProgressStore::new(Box::new(MemoryStore::new()), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(overriding, host(), store, SessionSettings::default());
        s.start();
        s.tick(0);
        let a = s.host().handle("#a").unwrap();
        assert_eq!(s.host().paint_count(), 1);

        s.host_mut().place("#a", Rect::new(150.0, 100.0, 120.0, 40.0));
        s.tick(300);
        assert_eq!(s.host().paint_count(), 2);
        assert_eq!(s.shown_target().unwrap().element, a);

        s.host_mut().place("#modal", Rect::new(200.0, 150.0, 400.0, 300.0));
        s.tick(600);
        let shown = s.shown_target().unwrap();
        assert!(shown.overridden);
        assert_eq!(s.live_listeners(), 1);

        // The click listener now belongs to the modal, not the button.
        s.dispatch(HostEvent::Click(a));
        assert_eq!(s.status(), TourStatus::Active);
        s.dispatch(HostEvent::Click(shown.element));
        assert_eq!(s.status(), TourStatus::Completed);
    }

    #[test]
    fn resize_repaints_shown_step() {
        let mut s = session(host());
        s.start();
        s.tick(0);
        s.host_mut().resize(800.0, 600.0);
        s.dispatch(HostEvent::Resize);
        assert_eq!(s.host().paint_count(), 2);
        assert_eq!(s.host().current_frame().unwrap().mask.above.width, 800.0);
    }

    #[test]
    fn scroll_repaints_moved_target() {
        let mut s = session(host());
        s.start();
        s.tick(0);
        s.host_mut().place("#a", Rect::new(100.0, 150.0, 120.0, 40.0));
        s.dispatch(HostEvent::Scroll);
        assert_eq!(s.host().paint_count(), 2);
        let frame = s.host().current_frame().unwrap();
        assert_eq!(frame.highlight, Rect::new(96.0, 146.0, 128.0, 48.0));
        assert_eq!(s.shown_target().unwrap().rect.y, 150.0);
    }

    #[test]
    fn resume_reruns_precheck_of_paused_step() {
        let gated = vec![
            TourStep::new("a", "A", "", TargetSpec::element("#a")).advance_on(AdvanceCondition::OnClick),
            TourStep::new("b", "B", "", TargetSpec::element("#b")).precheck(|h| h.shift_active()),
            TourStep::new("c", "C", "", TargetSpec::element("#c")),
        ];
        let store = ProgressStore::new(Box::new(MemoryStore::new()), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(gated, host(), store, SessionSettings::default());
        s.start();
        s.tick(0);
        s.advance();
        s.tick(300);
        assert_eq!(s.current_step().unwrap().id, "b");
        s.pause();
        let painted = s.host().paint_count();

        s.host_mut().set_shift_active(true);
        s.resume();
        assert_eq!(s.step_index(), 2);
        s.tick(600);
        assert_eq!(s.current_step().unwrap().id, "c");
        assert_eq!(s.host().paint_count(), painted + 1);
        assert_eq!(s.host().current_frame().unwrap().content.title, "C");
    }

    #[test]
    fn start_reactivates_a_finished_tour() {
        let mut s = session(host());
        s.start();
        s.skip();
        assert_eq!(s.status(), TourStatus::Skipped);

        s.start();
        assert_eq!(s.status(), TourStatus::Active);
        assert_eq!(s.step_index(), 0);
        s.tick(0);
        assert!(s.shown_target().is_some());
    }

    #[test]
    fn restore_resumes_only_active_record() {
        let mut backend = MemoryStore::new();
        crate::progress::KeyValueStore::set(
            &mut backend,
            "t_v1__anon",
            r#"{"status":"active","stepIndex":2}"#,
        )
        .unwrap();
        let store = ProgressStore::new(Box::new(backend), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(steps(), host(), store, SessionSettings::default());
        s.restore();
        s.tick(0);
        assert_eq!(s.current_step().unwrap().id, "c");
    }

    #[test]
    fn resume_past_the_end_completes() {
        let mut backend = MemoryStore::new();
        crate::progress::KeyValueStore::set(
            &mut backend,
            "t_v1__anon",
            r#"{"status":"paused","stepIndex":9}"#,
        )
        .unwrap();
        let store = ProgressStore::new(Box::new(backend), "t_v1", &Identity::anonymous());
        let mut s = TourSession::new(steps(), host(), store, SessionSettings::default());
        s.resume();
        assert_eq!(s.status(), TourStatus::Completed);
        assert_eq!(s.step_index(), 2);
    }
}
