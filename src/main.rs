use std::future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use skyglass_core::App;
use skyglass_weather::{ForecastMode, ScreenState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

mod render;
mod service;

use service::{RefreshRequest, RefreshTracker, ScreenMessage};

/// Keyboard commands read from stdin, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Hourly,
    Daily,
    Toggle,
    Refresh,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "h" => Some(Self::Hourly),
            "d" => Some(Self::Daily),
            "t" => Some(Self::Toggle),
            "r" => Some(Self::Refresh),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

fn refresh_request(app: &App, state: &ScreenState, generation: u64) -> RefreshRequest {
    RefreshRequest {
        provider: app.provider(),
        location: app.location_settings(),
        known_location: state.location.clone(),
        geocode_url: app.config().location.geocode_url.clone(),
        blocks: state.blocks_to_fetch(app.config().weather.mode_switch),
        generation,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

fn periodic(every: Option<Duration>) -> Option<Interval> {
    every.map(|period| {
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    skyglass_core::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let app = App::load(config_path.as_deref())?;
    let language = app.config().weather.language;
    let derive_options = app.derive_options();

    let (tx, mut rx) = mpsc::unbounded_channel::<ScreenMessage>();
    let mut state = app.new_screen_state();
    let mut refreshes = RefreshTracker::default();

    service::request_refresh(&tx, refresh_request(&app, &state, refreshes.issue()));

    if let Some(source) = app.config().frost.background_path.clone() {
        if let Some(output) = app.config().frost.resolved_output_path() {
            service::request_frost(&tx, source, output, app.frost_options());
        }
    }

    let mut ticker = periodic(app.config().weather.refresh_interval());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    println!("{}", render::render(&state, language));

    loop {
        tokio::select! {
            Some(message) = rx.recv() => match message {
                ScreenMessage::RefreshDone { generation, .. } if !refreshes.accept(generation) => {}
                ScreenMessage::RefreshDone { result: Ok(outcome), .. } => {
                    state.apply_location(outcome.location, outcome.city);
                    state.apply_payload(
                        &outcome.payload,
                        chrono::Local::now().naive_local(),
                        &derive_options,
                    );
                    println!("{}", render::render(&state, language));
                }
                ScreenMessage::RefreshDone { result: Err(e), .. } => {
                    tracing::error!("Refresh failed: {}", e);
                    state.record_failure(e.user_message());
                    println!("{}", render::render(&state, language));
                }
                ScreenMessage::FrostDone(Ok(path)) => {
                    println!("Frosted background: {}", path.display());
                }
                ScreenMessage::FrostDone(Err(e)) => {
                    tracing::error!("Frost failed: {}", e);
                }
            },
            _ = next_tick(&mut ticker) => {
                tracing::debug!("Periodic refresh");
                service::request_refresh(&tx, refresh_request(&app, &state, refreshes.issue()));
            }
            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        stdin_open = false;
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("stdin closed: {}", e);
                        stdin_open = false;
                        continue;
                    }
                };

                let mode = match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Refresh) => {
                        let request = refresh_request(&app, &state, refreshes.issue());
                        service::request_refresh(&tx, request);
                        continue;
                    }
                    Some(Command::Hourly) => ForecastMode::Hourly,
                    Some(Command::Daily) => ForecastMode::Daily,
                    Some(Command::Toggle) => state.mode.toggled(),
                    None => {
                        println!(
                            "commands: h (hourly), d (weekly), t (toggle), r (refresh), q (quit)"
                        );
                        continue;
                    }
                };

                let switch = state.switch_mode(mode, app.config().weather.mode_switch);
                if switch.changed {
                    println!("{}", render::render(&state, language));
                }
                if switch.refetch {
                    service::request_refresh(&tx, refresh_request(&app, &state, refreshes.issue()));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    app.shutdown();
    Ok(())
}
