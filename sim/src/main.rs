//! Headless billiards driver.
//!
//! Reads JSON-lines commands on stdin and writes JSON-lines frames and events
//! on stdout. Logs go to stderr.
//!
//! Usage: cargo run --bin billiards-sim -- [OPTIONS]
//!
//! Options:
//!   --bot        Let the shot bot play whenever the table comes to rest
//!   --shots N    With --bot, quit after N bot shots (default: 10)

use billiards_sim::bot::ShotBot;
use billiards_sim::config::SimConfig;
use billiards_sim::protocol::{shot_from_input, InputMsg, OutputMsg, WelcomeMsg};
use billiards_sim::table_loop::{run_table_loop, TableBroadcast, TableCommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

struct Args {
    bot: bool,
    shots: u32,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut bot = false;
    let mut shots = 10;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bot" => {
                bot = true;
            }
            "--shots" => {
                i += 1;
                shots = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(shots);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args { bot, shots }
}

fn emit(msg: &OutputMsg) {
    match msg.to_json() {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::warn!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = parse_args();

    let config = match SimConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let tick_rate_hz = config.tick_rate_hz;
    let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
    let mut bot = args
        .bot
        .then(|| ShotBot::varied(&mut rng).with_limit(args.shots));

    let (cmd_tx, cmd_rx) = mpsc::channel::<TableCommand>(64);
    let (broadcast_tx, mut broadcast_rx) = broadcast::channel::<TableBroadcast>(256);

    let loop_handle = tokio::spawn(async move {
        run_table_loop(cmd_rx, broadcast_tx, config).await;
    });

    let (resp_tx, resp_rx) = oneshot::channel();
    if cmd_tx
        .send(TableCommand::Snapshot { response: resp_tx })
        .await
        .is_err()
    {
        eprintln!("Table loop exited before start");
        std::process::exit(1);
    }
    let Ok((table, frame)) = resp_rx.await else {
        eprintln!("Table loop exited before start");
        std::process::exit(1);
    };
    let cue_index = billiards_sim::state::CUE_INDEX;
    emit(&OutputMsg::Welcome(WelcomeMsg {
        tick_rate_hz,
        cue_index,
        table,
        frame: frame.clone(),
    }));
    tracing::info!("Driver ready (bot: {})", args.bot);

    // The rack starts at rest, so the bot opens with a shot straight away.
    let mut finished = false;
    if let Some(bot) = bot.as_mut() {
        match bot.plan_from_snapshot(&frame, cue_index, &mut rng) {
            Some(shot) => {
                let _ = cmd_tx.send(TableCommand::Shot { shot, response: None }).await;
            }
            None => {
                tracing::info!("Bot has no shots to play");
                finished = true;
            }
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while !finished {
        tokio::select! {
            event = broadcast_rx.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!("Output lagged, skipped {} events", n);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let came_to_rest = matches!(event, TableBroadcast::CameToRest { .. });
                emit(&OutputMsg::from(event));

                if !came_to_rest {
                    continue;
                }
                let Some(bot) = bot.as_mut() else {
                    continue;
                };
                if bot.is_exhausted() {
                    tracing::info!("Bot finished {} shots", bot.shots_planned());
                    break;
                }
                let (resp_tx, resp_rx) = oneshot::channel();
                if cmd_tx.send(TableCommand::Snapshot { response: resp_tx }).await.is_err() {
                    break;
                }
                let Ok((_, snapshot)) = resp_rx.await else {
                    break;
                };
                match bot.plan_from_snapshot(&snapshot, cue_index, &mut rng) {
                    Some(shot) => {
                        let _ = cmd_tx.send(TableCommand::Shot { shot, response: None }).await;
                    }
                    None => break,
                }
            }

            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        stdin_open = false;
                        if bot.is_none() {
                            break;
                        }
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("stdin read failed: {}", e);
                        stdin_open = false;
                        if bot.is_none() {
                            break;
                        }
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match InputMsg::parse(&line) {
                    Ok(InputMsg::Shot { sx, sy, ex, ey }) => {
                        let shot = shot_from_input(sx, sy, ex, ey);
                        let _ = cmd_tx.send(TableCommand::Shot { shot, response: None }).await;
                    }
                    Ok(InputMsg::Reset) => {
                        let _ = cmd_tx.send(TableCommand::Reset).await;
                    }
                    Ok(InputMsg::Quit) => break,
                    Err(e) => tracing::warn!("{}", e),
                }
            }
        }
    }

    drop(cmd_tx);
    let _ = loop_handle.await;
}
