//! Headless driving loop: one generation per timer tick.

use lifegrid_core::DriverConfig;
use lifegrid_world::{Automaton, TickOutcome};
use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Stagnated,
    GenerationLimit,
    Interrupted,
}

/// Advance `automaton` at `config.fps` until it stagnates (when
/// `stop_on_stagnation` is set), hits the generation limit, or `shutdown`
/// resolves.
pub async fn run_loop<F>(automaton: &mut Automaton, config: &DriverConfig, shutdown: F) -> StopReason
where
    F: Future<Output = ()>,
{
    let period = Duration::from_millis(1000 / u64::from(config.fps.clamp(1, 60)));
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(fps = config.fps, max_generations = ?config.max_generations, "Starting driver loop");

    loop {
        if let Some(limit) = config.max_generations {
            if automaton.generation() >= limit {
                return StopReason::GenerationLimit;
            }
        }

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(generation = automaton.generation(), "Driver interrupted");
                return StopReason::Interrupted;
            }
            _ = ticker.tick() => {}
        }

        if config.stop_on_stagnation {
            if let TickOutcome::Stagnated(_) | TickOutcome::Halted = automaton.tick() {
                return StopReason::Stagnated;
            }
        } else {
            automaton.step();
        }

        let generation = automaton.generation();
        if config.log_every > 0 && generation % config.log_every == 0 {
            info!(
                event = "progress",
                generation,
                live_cells = automaton.grid().live_count(),
                "Generation {}",
                generation
            );
        } else {
            debug!(generation, "Tick");
        }
    }
}
