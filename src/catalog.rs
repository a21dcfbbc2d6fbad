//! Step definitions and the shipped shift-tracker tour.
//!
//! The order of [`shift_tour`] is the authoritative sequence that persisted
//! step indices refer to. Reordering it invalidates saved progress.

use crate::host::HostSignals;

/// Named events the host application emits.
pub mod events {
    pub const SHIFT_LENGTH_SELECTED: &str = "shift-length-selected";
    pub const SHIFT_STARTED: &str = "shift-started";
    pub const CUSTOMER_SELECTED: &str = "customer-selected";
    pub const CUSTOMER_CREATED: &str = "customer-created";
    pub const ORDER_STARTED: &str = "order-started";
    pub const WRAP_LOGGED: &str = "wrap-logged";
}

/// Locators the host UI must answer.
pub mod targets {
    pub const START_SHIFT_BUTTON: &str = "#startShiftBtn";
    pub const CUSTOMER_PICKER: &str = "#customerSelect";
    pub const CUSTOMER_MODAL: &str = "#customerModal";
    pub const ORDER_QUANTITY: &str = "#orderQty";
    pub const START_ORDER_BUTTON: &str = "#startOrderBtn";
    pub const LOG_WRAP_BUTTON: &str = "#logWrapBtn";
    pub const WRAP_MODAL: &str = "#wrapModal";
    pub const METRICS_PANEL: &str = "#metricsPanel";
}

/// A trigger that completes a step.
#[derive(Debug, Clone)]
pub enum AdvanceCondition {
    /// One click on the step's target.
    OnClick,
    /// An input event on the target whose value passes the predicate.
    OnValidInput(fn(&str) -> bool),
    /// Any one of the named application events.
    OnAnyOfEvents(Vec<&'static str>),
    /// The element answering this locator becomes visible.
    OnModalVisible(&'static str),
}

/// Where a step anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpec {
    /// The nominal element.
    pub locator: &'static str,
    /// A higher-priority element that replaces the nominal one while it is visible.
    pub prefer_when_visible: Option<&'static str>,
}

impl TargetSpec {
    pub const fn element(locator: &'static str) -> Self {
        Self {
            locator,
            prefer_when_visible: None,
        }
    }

    pub const fn with_override(locator: &'static str, preferred: &'static str) -> Self {
        Self {
            locator,
            prefer_when_visible: Some(preferred),
        }
    }
}

/// One unit of guidance.
#[derive(Debug, Clone)]
pub struct TourStep {
    pub id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub target: TargetSpec,
    /// Any one firing advances the step.
    pub advance: Vec<AdvanceCondition>,
    /// When true at step entry, the step is passed through without being shown.
    pub precheck: Option<fn(&dyn HostSignals) -> bool>,
    /// Reserved; does not change control flow.
    pub optional: bool,
}

impl TourStep {
    pub fn new(id: &'static str, title: &'static str, body: &'static str, target: TargetSpec) -> Self {
        Self {
            id,
            title,
            body,
            target,
            advance: Vec::new(),
            precheck: None,
            optional: false,
        }
    }

    pub fn advance_on(mut self, condition: AdvanceCondition) -> Self {
        self.advance.push(condition);
        self
    }

    pub fn precheck(mut self, check: fn(&dyn HostSignals) -> bool) -> Self {
        self.precheck = Some(check);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether the step should be passed through silently.
    pub fn already_done(&self, signals: &dyn HostSignals) -> bool {
        self.precheck.is_some_and(|check| check(signals))
    }
}

/// Value parses as an integer greater than zero.
pub fn is_positive_int(value: &str) -> bool {
    value.trim().parse::<u64>().is_ok_and(|n| n > 0)
}

fn shift_is_active(signals: &dyn HostSignals) -> bool {
    signals.shift_active()
}

fn order_is_active(signals: &dyn HostSignals) -> bool {
    signals.order_active()
}

/// The tour shipped with the shift tracker.
pub fn shift_tour() -> Vec<TourStep> {
    use AdvanceCondition::*;

    vec![
        TourStep::new(
            "start-shift",
            "Start your shift",
            "Press Start Shift once you are on the clock. Everything you log is tied to this shift.",
            TargetSpec::element(targets::START_SHIFT_BUTTON),
        )
        .advance_on(OnClick)
        .advance_on(OnAnyOfEvents(vec![events::SHIFT_STARTED]))
        .precheck(shift_is_active),
        TourStep::new(
            "pick-customer",
            "Choose a customer",
            "Pick an existing customer, or create a new one from the dialog.",
            TargetSpec::with_override(targets::CUSTOMER_PICKER, targets::CUSTOMER_MODAL),
        )
        .advance_on(OnAnyOfEvents(vec![
            events::CUSTOMER_SELECTED,
            events::CUSTOMER_CREATED,
        ]))
        .precheck(order_is_active),
        TourStep::new(
            "order-quantity",
            "How many units?",
            "Enter the number of units in this order.",
            TargetSpec::element(targets::ORDER_QUANTITY),
        )
        .advance_on(OnValidInput(is_positive_int))
        .precheck(order_is_active),
        TourStep::new(
            "start-order",
            "Start the order",
            "The timer runs from here until you log the last wrap.",
            TargetSpec::element(targets::START_ORDER_BUTTON),
        )
        .advance_on(OnClick)
        .advance_on(OnAnyOfEvents(vec![events::ORDER_STARTED]))
        .precheck(order_is_active),
        TourStep::new(
            "open-wrap",
            "Log a wrap",
            "Each finished wrap is logged here.",
            TargetSpec::element(targets::LOG_WRAP_BUTTON),
        )
        .advance_on(OnModalVisible(targets::WRAP_MODAL)),
        TourStep::new(
            "confirm-wrap",
            "Confirm the wrap",
            "Check the details and save.",
            TargetSpec::element(targets::WRAP_MODAL),
        )
        .advance_on(OnAnyOfEvents(vec![events::WRAP_LOGGED])),
        TourStep::new(
            "metrics",
            "Your numbers",
            "Pace and totals for the shift update as you log. That's the whole loop.",
            TargetSpec::element(targets::METRICS_PANEL),
        )
        .optional(),
    ]
}
