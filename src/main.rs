mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Command};
use tokio::time::{Instant, MissedTickBehavior};

use shift_tour::catalog::{events, targets};
use shift_tour::geometry::Rect;
use shift_tour::overlay::OverlayMetrics;
use shift_tour::progress::{DeviceId, FileStore, MemoryStore};
use shift_tour::sim::SimulatedHost;
use shift_tour::state_machine::Phase;
use shift_tour::ui::TourView;
use shift_tour::{
    HostEvent, Identity, ProgressStore, SessionSettings, TooltipAction, TourConfig, TourSession,
    shift_tour as shipped_tour, telemetry,
};

const VIEWPORT: (f64, f64) = (1280.0, 800.0);
const DEMO_TICK_MS: u64 = 50;
const DEMO_TIMEOUT_MS: u64 = 30_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => TourConfig::load_from(Path::new(path))
            .with_context(|| format!("failed to load config from {path}"))?,
        None => TourConfig::load().context("failed to load shift-tour.toml")?,
    };
    let view = TourView::new();

    match &cli.command {
        Command::Status => {
            let store = open_store(&cli, &config);
            view.print_record(store.key(), &store.load());
        }
        Command::Start | Command::Resume | Command::Pause | Command::Skip => {
            let store = open_store(&cli, &config);
            let mut session = TourSession::new(
                shipped_tour(),
                SimulatedHost::new(VIEWPORT.0, VIEWPORT.1),
                store,
                SessionSettings::from(&config),
            );
            match cli.command {
                Command::Start => session.start(),
                Command::Resume => session.resume(),
                Command::Pause => session.pause(),
                _ => session.skip(),
            }
            view.print_record(session.store().key(), session.progress());
        }
        Command::Place {
            target,
            viewport,
            tooltip,
        } => {
            let metrics = OverlayMetrics {
                padding: config.highlight_padding,
                margin: config.viewport_margin,
            };
            let position = metrics.place_tooltip(*target, *viewport, *tooltip);
            let rect = position.rect;
            println!(
                "{:?} x={:.1} y={:.1} w={:.1} h={:.1}{}",
                position.placement,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                if position.overlaps_target {
                    " (overlaps target)"
                } else {
                    ""
                }
            );
        }
        Command::Demo { dwell_ms } => run_demo(&config, *dwell_ms, &view).await?,
    }

    Ok(())
}

/// File-backed progress for the identity named on the command line. Without
/// `--device`, the device id is read from (or written to) the same directory.
fn open_store(cli: &Cli, config: &TourConfig) -> ProgressStore {
    let mut backend = FileStore::new(config.storage_dir.clone());
    let identity = if cli.anonymous {
        Identity::anonymous()
    } else {
        let device = match &cli.device {
            Some(device) => device.clone(),
            None => DeviceId::load_or_create(&mut backend).as_str().to_string(),
        };
        match &cli.user {
            Some(user) => Identity::user(user.clone()).with_device(device),
            None => Identity::device(device),
        }
    };
    ProgressStore::new(Box::new(backend), config.storage_prefix.clone(), &identity)
}

fn demo_page() -> SimulatedHost {
    let mut host = SimulatedHost::new(VIEWPORT.0, VIEWPORT.1);
    host.place(targets::START_SHIFT_BUTTON, Rect::new(40.0, 24.0, 180.0, 44.0));
    host.place(targets::CUSTOMER_PICKER, Rect::new(40.0, 200.0, 320.0, 40.0));
    host.place(targets::ORDER_QUANTITY, Rect::new(40.0, 280.0, 140.0, 40.0));
    host.place(targets::START_ORDER_BUTTON, Rect::new(200.0, 280.0, 160.0, 44.0));
    host.place(targets::LOG_WRAP_BUTTON, Rect::new(40.0, 700.0, 160.0, 44.0));
    host.place(targets::METRICS_PANEL, Rect::new(880.0, 540.0, 360.0, 220.0));
    host
}

/// Do what a user would do to finish the shown step.
fn act(session: &mut TourSession<SimulatedHost>, step_id: &str, view: &TourView) {
    let host = session.host_mut();
    match step_id {
        "start-shift" => {
            host.set_shift_active(true);
            if let Some(button) = host.handle(targets::START_SHIFT_BUTTON) {
                view.acted("click Start Shift");
                session.dispatch(HostEvent::Click(button));
            }
        }
        "pick-customer" => {
            view.acted("select customer \"Harbour Deli\"");
            session.dispatch(HostEvent::named(events::CUSTOMER_SELECTED));
        }
        "order-quantity" => {
            if let Some(input) = host.handle(targets::ORDER_QUANTITY) {
                for value in ["0", "12"] {
                    view.acted(&format!("type {value:?} into quantity"));
                    session.dispatch(HostEvent::Input {
                        target: input,
                        value: value.to_string(),
                    });
                }
            }
        }
        "start-order" => {
            host.set_order_active(true);
            if let Some(button) = host.handle(targets::START_ORDER_BUTTON) {
                view.acted("click Start Order");
                session.dispatch(HostEvent::Click(button));
            }
        }
        "open-wrap" => {
            view.acted("open the wrap dialog");
            host.place(targets::WRAP_MODAL, Rect::new(440.0, 200.0, 400.0, 300.0));
        }
        "confirm-wrap" => {
            view.acted("save the wrap");
            host.remove(targets::WRAP_MODAL);
            session.dispatch(HostEvent::named(events::WRAP_LOGGED));
        }
        _ => {
            view.acted("press Finish");
            session.dispatch(HostEvent::Tooltip(TooltipAction::Next));
        }
    }
}

/// Run the shipped tour end to end against the simulated page.
async fn run_demo(config: &TourConfig, dwell_ms: u64, view: &TourView) -> anyhow::Result<()> {
    let store = ProgressStore::new(
        Box::new(MemoryStore::new()),
        config.storage_prefix.clone(),
        &Identity::anonymous(),
    );
    let mut session = TourSession::new(
        shipped_tour(),
        demo_page(),
        store,
        SessionSettings::from(config),
    );
    session.dispatch(HostEvent::named(events::SHIFT_LENGTH_SELECTED));

    let started = Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_millis(DEMO_TICK_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut waiting_on: Option<usize> = None;
    let mut shown: Option<(usize, u64)> = None;
    let mut acted_on: Option<usize> = None;

    loop {
        ticker.tick().await;
        let now = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        session.tick(now);

        if session.status().is_terminal() {
            break;
        }
        if now > DEMO_TIMEOUT_MS {
            bail!(
                "demo stalled at step {} ({})",
                session.step_index() + 1,
                session.status()
            );
        }

        match session.phase() {
            Phase::Waiting { index, .. } if waiting_on != Some(*index) => {
                waiting_on = Some(*index);
                view.waiting(&session.steps()[*index]);
            }
            Phase::Showing { index, .. } if shown.map(|(i, _)| i) != Some(*index) => {
                shown = Some((*index, now));
                if let Some(frame) = session.host().current_frame() {
                    view.shown(frame);
                }
            }
            _ => {}
        }

        if let Some((index, since)) = shown {
            if acted_on != Some(index) && now.saturating_sub(since) >= dwell_ms {
                acted_on = Some(index);
                let step_id = session.steps()[index].id;
                act(&mut session, step_id, view);
                if session.status().is_terminal() {
                    break;
                }
            }
        }
    }

    view.finish(session.progress());
    Ok(())
}
