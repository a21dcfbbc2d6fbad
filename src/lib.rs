//! Guided product tour for the shift and order tracker.
//!
//! A [`TourSession`] walks one identity through an ordered catalog of
//! [`TourStep`]s: it waits for each step's target to appear, paints an overlay
//! around it, arms the step's triggers, and persists progress on every
//! transition. The host UI supplies the capabilities in [`host`].

pub mod advance;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod overlay;
pub mod progress;
pub mod resolver;
pub mod scheduler;
pub mod sim;
pub mod state_machine;
pub mod telemetry;
pub mod ui;

pub use catalog::{AdvanceCondition, TourStep, shift_tour};
pub use config::TourConfig;
pub use error::TourError;
pub use host::{ElementHandle, HostEvent, TooltipAction, TourHost};
pub use progress::{Identity, ProgressStore, TourProgress};
pub use state_machine::{SessionSettings, TourSession, TourStatus};
