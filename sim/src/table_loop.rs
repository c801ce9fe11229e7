use crate::config::SimConfig;
use crate::state::TableState;
use billiards_physics::cushion::CushionSide;
use billiards_physics::view::{FrameSnapshot, TableView};
use billiards_physics::Shot;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Commands from the input side to the table loop
pub enum TableCommand {
    Shot {
        shot: Shot,
        /// Whether the shot was applied (false if the drag was too short)
        response: Option<oneshot::Sender<bool>>,
    },
    Reset,
    Snapshot {
        response: oneshot::Sender<(TableView, FrameSnapshot)>,
    },
}

/// Broadcasts from the table loop to all listeners
#[derive(Debug, Clone)]
pub enum TableBroadcast {
    Frame(FrameSnapshot),
    CushionHit {
        frame: u64,
        body: usize,
        side: CushionSide,
    },
    Collision {
        frame: u64,
        a: usize,
        b: usize,
    },
    /// Every ball stopped after having moved
    CameToRest { frame: u64 },
}

/// Run the table loop with the default rack. Owns all table state.
pub async fn run_table_loop(
    cmd_rx: mpsc::Receiver<TableCommand>,
    broadcast_tx: broadcast::Sender<TableBroadcast>,
    config: SimConfig,
) {
    let state = TableState::new(&config);
    run_table_loop_with(cmd_rx, broadcast_tx, config, state).await;
}

/// Run the table loop on a prepared table until the command channel closes.
///
/// Ticks at the fixed `tick_rate_hz`. Physics is frame-locked, so missed
/// ticks are skipped rather than replayed in a burst.
pub async fn run_table_loop_with(
    mut cmd_rx: mpsc::Receiver<TableCommand>,
    broadcast_tx: broadcast::Sender<TableBroadcast>,
    config: SimConfig,
    mut state: TableState,
) {
    let dt = config.tick_seconds();
    let broadcast_every_n = config.broadcast_every_n();
    let mut was_moving = !state.at_rest();

    let mut tick_interval = tokio::time::interval(Duration::from_secs_f64(dt));
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Table loop started: {} balls, {} Hz",
        state.bodies.len(),
        config.tick_rate_hz
    );

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                if !was_moving && state.at_rest() {
                    // Nothing can change until the next shot.
                    continue;
                }

                state.tick(dt);
                let frame = state.frame();
                let report = state.last_report();

                for hit in &report.cushion_hits {
                    let _ = broadcast_tx.send(TableBroadcast::CushionHit {
                        frame,
                        body: hit.body,
                        side: hit.side,
                    });
                }
                for contact in report.collisions() {
                    let _ = broadcast_tx.send(TableBroadcast::Collision {
                        frame,
                        a: contact.a,
                        b: contact.b,
                    });
                }

                let at_rest = state.at_rest();
                if frame % broadcast_every_n == 0 || at_rest {
                    let _ = broadcast_tx.send(TableBroadcast::Frame(state.snapshot()));
                }
                if at_rest {
                    tracing::info!(
                        "Table at rest at frame {} after {} shots",
                        frame,
                        state.shots_taken()
                    );
                    let _ = broadcast_tx.send(TableBroadcast::CameToRest { frame });
                }
                was_moving = !at_rest;
            }

            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                match cmd {
                    TableCommand::Shot { shot, response } => {
                        let applied = state.shoot(&shot);
                        if applied {
                            was_moving = true;
                        }
                        if let Some(response) = response {
                            let _ = response.send(applied);
                        }
                    }
                    TableCommand::Reset => {
                        state.reset();
                        was_moving = !state.at_rest();
                        let _ = broadcast_tx.send(TableBroadcast::Frame(state.snapshot()));
                    }
                    TableCommand::Snapshot { response } => {
                        let _ = response.send((state.table_view(), state.snapshot()));
                    }
                }
            }
        }
    }

    tracing::info!("Table loop ended at frame {}", state.frame());
}
