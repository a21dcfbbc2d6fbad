//! Binding and unbinding the triggers that complete the current step.
//!
//! Every listener is registered through a [`ListenerRegistry`] and comes back
//! as a [`Subscription`]. The controller keeps the subscriptions of the armed
//! step in one list and cancels all of them together on any transition, so
//! nothing bound for an old step can fire once the step is gone.

use crate::catalog::{AdvanceCondition, TourStep};
use crate::host::{ElementHandle, HostEvent, ViewportQuery};
use crate::resolver::Target;
use crate::scheduler::{Generation, PollKind, PollScheduler};

/// Which trigger completed the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    Click,
    ValidInput(String),
    Event(String),
    ModalVisible(&'static str),
}

impl std::fmt::Display for Fired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fired::Click => write!(f, "click"),
            Fired::ValidInput(value) => write!(f, "input {value:?}"),
            Fired::Event(name) => write!(f, "event {name}"),
            Fired::ModalVisible(locator) => write!(f, "{locator} visible"),
        }
    }
}

#[derive(Debug, Clone)]
enum ListenerKind {
    Click(ElementHandle),
    Input {
        target: ElementHandle,
        validate: fn(&str) -> bool,
    },
    Named(&'static str),
}

#[derive(Debug)]
struct Listener {
    id: u64,
    kind: ListenerKind,
    once: bool,
}

/// Handle to one bound listener. Cancelling consumes it.
#[derive(Debug)]
#[must_use = "a dropped subscription can no longer be cancelled"]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// Unbind. Returns false if the listener already removed itself.
    pub fn cancel(self, registry: &mut ListenerRegistry) -> bool {
        registry.remove(self.id)
    }
}

/// All live listeners, regardless of step.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    fn bind(&mut self, kind: ListenerKind, once: bool) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        self.listeners.push(Listener { id, kind, once });
        Subscription { id }
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Offer an event to the listeners in binding order. The first match wins;
    /// a one-shot listener that fires is removed.
    fn deliver(&mut self, event: &HostEvent) -> Option<Fired> {
        let (pos, fired) = self
            .listeners
            .iter()
            .enumerate()
            .find_map(|(pos, l)| Self::matches(&l.kind, event).map(|fired| (pos, fired)))?;
        if self.listeners[pos].once {
            self.listeners.remove(pos);
        }
        Some(fired)
    }

    fn matches(kind: &ListenerKind, event: &HostEvent) -> Option<Fired> {
        match (kind, event) {
            (ListenerKind::Click(el), HostEvent::Click(clicked)) if el == clicked => Some(Fired::Click),
            (ListenerKind::Input { target, validate }, HostEvent::Input { target: t, value }) if target == t => {
                validate(value.as_str()).then(|| Fired::ValidInput(value.clone()))
            }
            (ListenerKind::Named(name), HostEvent::Named(n)) if *name == n.as_str() => Some(Fired::Event(n.clone())),
            _ => None,
        }
    }
}

/// Arms the current step's triggers and reports when one fires.
#[derive(Debug, Default)]
pub struct AdvanceController {
    registry: ListenerRegistry,
    bound: Vec<Subscription>,
    modal: Option<&'static str>,
    armed_for: Option<Generation>,
}

impl AdvanceController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every trigger `step` declares against `target`.
    ///
    /// Callers must [`disarm`](Self::disarm) first; arming twice drops the
    /// earlier bindings.
    #[allow(clippy::too_many_arguments)]
    pub fn arm(
        &mut self,
        step: &TourStep,
        target: &Target,
        generation: Generation,
        viewport: &dyn ViewportQuery,
        scheduler: &mut PollScheduler,
        modal_poll_ms: u64,
        now_ms: u64,
    ) {
        if self.armed_for.is_some() {
            self.disarm(scheduler);
        }

        for condition in &step.advance {
            match condition {
                AdvanceCondition::OnClick => {
                    // The element can vanish between resolution and binding.
                    if viewport.bounding_box(target.element).is_none() {
                        tracing::warn!(step = step.id, element = %target.element, "target detached; click trigger not bound");
                        continue;
                    }
                    let sub = self.registry.bind(ListenerKind::Click(target.element), true);
                    self.bound.push(sub);
                }
                AdvanceCondition::OnValidInput(validate) => {
                    if viewport.bounding_box(target.element).is_none() {
                        tracing::warn!(step = step.id, element = %target.element, "target detached; input trigger not bound");
                        continue;
                    }
                    let sub = self.registry.bind(
                        ListenerKind::Input {
                            target: target.element,
                            validate: *validate,
                        },
                        false,
                    );
                    self.bound.push(sub);
                }
                AdvanceCondition::OnAnyOfEvents(names) => {
                    for name in names {
                        let sub = self.registry.bind(ListenerKind::Named(*name), true);
                        self.bound.push(sub);
                    }
                }
                AdvanceCondition::OnModalVisible(locator) => {
                    self.modal = Some(*locator);
                    scheduler.schedule(PollKind::Modal, generation, modal_poll_ms, now_ms);
                }
            }
        }

        self.armed_for = Some(generation);
        tracing::debug!(
            step = step.id,
            generation = generation.value(),
            listeners = self.bound.len(),
            modal = self.modal.unwrap_or("-"),
            "step triggers armed"
        );
    }

    /// Unbind everything bound for the current step. Returns how many
    /// listeners were still live.
    pub fn disarm(&mut self, scheduler: &mut PollScheduler) -> usize {
        let mut live = 0;
        for sub in self.bound.drain(..) {
            if sub.cancel(&mut self.registry) {
                live += 1;
            }
        }
        if self.modal.take().is_some() {
            scheduler.cancel(PollKind::Modal);
        }
        if let Some(generation) = self.armed_for.take() {
            tracing::debug!(generation = generation.value(), live, "step triggers disarmed");
        }
        live
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for.is_some()
    }

    /// Listeners currently registered (zero whenever nothing is armed).
    pub fn live_listeners(&self) -> usize {
        self.registry.len()
    }

    /// Route a host event to the armed listeners.
    pub fn handle(&mut self, event: &HostEvent) -> Option<Fired> {
        if !self.is_armed() {
            return None;
        }
        self.registry.deliver(event)
    }

    /// One modal-visibility poll.
    pub fn check_modal(&self, viewport: &dyn ViewportQuery) -> Option<Fired> {
        let locator = self.modal?;
        viewport
            .find_visible(locator)
            .map(|_| Fired::ModalVisible(locator))
    }
}
