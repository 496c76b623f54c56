//! Event/tick loop
//!
//! One task waits on two sources: the inbound event channel and a fixed
//! period ticker. Only one wake-up is handled at a time and each runs to
//! completion. Events win when both are ready, so a queued quit stops the
//! loop before another update runs. Late ticks are delayed, never bunched.

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

use crate::error::Result;
use crate::platform::{Banner, Canvas, Event};
use crate::sim::{GamePhase, Scene};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Drive the scene until a quit event arrives, the event channel closes,
/// or painting fails. Paint errors are returned; nothing is retried.
pub async fn run<S>(scene: &mut Scene, events: &mut UnboundedReceiver<Event>, surface: &mut S) -> Result<()>
where
    S: Canvas + Banner,
{
    let result = drive(scene, events, surface).await;
    scene.set_phase(GamePhase::Stopped);
    match &result {
        Ok(()) => log::info!("Loop stopped after {} frames", scene.time()),
        Err(e) => log::error!("Loop failed: {e}"),
    }
    result
}

async fn drive<S>(scene: &mut Scene, events: &mut UnboundedReceiver<Event>, surface: &mut S) -> Result<()>
where
    S: Canvas + Banner,
{
    let tuning = scene.tuning().clone();
    let mut ticker = time::interval(tuning.tick_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    log::info!("Event channel closed");
                    return Ok(());
                };
                log::debug!("event: {event:?}");
                if scene.handle_event(&event) {
                    return Ok(());
                }
            }

            _ = ticker.tick() => {
                scene.update();
                if scene.bird().is_dead() {
                    // Last frame of the round stays visible behind the banners
                    scene.paint(surface)?;
                    if game_over(scene, events, surface, &tuning).await == Flow::Stop {
                        return Ok(());
                    }
                }
                scene.paint(surface)?;
            }
        }
    }
}

/// Show "Game Over" and the score, each for `banner_hold`, then restart.
///
/// Events that arrive meanwhile stay queued in the channel.
async fn game_over<S>(
    scene: &mut Scene,
    events: &mut UnboundedReceiver<Event>,
    surface: &mut S,
    tuning: &Tuning,
) -> Flow
where
    S: Banner,
{
    scene.set_phase(GamePhase::GameOverDisplay);
    log::info!("Game over, score {}", scene.score());

    let score = format!("Score: {}", scene.score());
    for text in ["Game Over", score.as_str()] {
        if let Err(e) = surface.draw_title(text, tuning.banner_point_size) {
            log::warn!("{e}");
        }
        time::sleep(tuning.banner_hold()).await;
    }

    if tuning.discard_input_on_restart {
        while let Ok(event) = events.try_recv() {
            if event == Event::Quit {
                return Flow::Stop;
            }
            log::debug!("Discarding queued {event:?}");
        }
    }

    scene.restart();
    Flow::Continue
}
