mod session;
mod state;

pub use session::{Phase, SessionSettings, TourSession};
pub use state::{TourStatus, Transition};
