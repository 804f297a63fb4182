use anyhow::Result;
use matchtwo_core::{GridLayout, SelectOutcome, Session, SessionStats, TickOutcome};

use crate::player::MemoryPlayer;
use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub seed: u64,
    pub ticks: u32,
    pub elapsed_secs: f32,
    pub cleared: bool,
    pub stats: SessionStats,
}

/// Plays one game headlessly, one pick per tick at most.
pub fn play(settings: &Settings, seed: u64) -> Result<Report> {
    let config = settings.session_config(seed)?;
    let mut session = Session::new(config)?;
    let layout = GridLayout::new(config.board.size, settings.viewport);
    let mut player = MemoryPlayer::new();

    log::info!(
        "Playing {}x{} with seed {}",
        config.board.rows(),
        config.board.cols(),
        seed
    );

    let mut ticks = 0;
    while ticks < settings.max_ticks && !session.is_finished() {
        if let Some(coords) = player.next_pick(&session) {
            let outcome = if settings.pointer {
                let (x, y) = layout.card_center(coords);
                session.select_hit(&layout, (x, settings.viewport.1 - y))?
            } else {
                session.select(coords)?
            };
            if !outcome.has_update() {
                log::warn!("pick {:?} was not taken: {:?}", coords, outcome);
            }
            if matches!(outcome, SelectOutcome::PairCommitted) {
                log::trace!("attempt {}", session.stats().attempts());
            }
        }

        match session.advance(settings.tick) {
            TickOutcome::Matched { .. } => {
                log::info!("{} pairs left", session.board().remaining_pairs())
            }
            TickOutcome::Cleared { .. } => log::info!("Board cleared"),
            _ => {}
        }
        player.observe(&session);
        ticks += 1;
    }

    if !session.is_finished() {
        log::warn!("Stopped after {} ticks without clearing the board", ticks);
    }

    Ok(Report {
        seed,
        ticks,
        elapsed_secs: ticks as f32 * settings.tick,
        cleared: session.is_finished(),
        stats: session.stats(),
    })
}
