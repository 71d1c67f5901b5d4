//! Flappy Meme entry point
//!
//! The browser build is driven from JavaScript through `flappy_meme::web`.
//! Natively there is no window: the binary plays rounds with the autopilot
//! and logs what happens.
//!
//! Usage: `flappy-meme [easy|medium|hard] [rounds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_meme::audio::{LogAnnouncer, LogSound};
    use flappy_meme::sim::{Viewport, autopilot};
    use flappy_meme::{AppPhase, Difficulty, GameSettings, HighScore, Session};

    env_logger::init();
    log::info!("Flappy Meme (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let difficulty = match args.first() {
        Some(arg) => match Difficulty::from_str(arg) {
            Some(d) => d,
            None => {
                eprintln!("Unknown difficulty '{}', expected easy, medium or hard", arg);
                std::process::exit(2);
            }
        },
        None => Difficulty::default(),
    };
    let rounds: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let settings = GameSettings::from_difficulty(difficulty);
    let mut session = Session::new(settings.clone(), HighScore::load(), LogSound, LogAnnouncer, seed);
    if let Err(e) = session.start_round(settings) {
        eprintln!("Invalid settings: {}", e);
        std::process::exit(2);
    }

    let viewport = Viewport::new(480.0, 800.0);
    let frame_ms = 1000.0 / 60.0;
    // Cap each round at ten simulated minutes
    let max_frames = 60 * 60 * 10;
    let mut now = 0.0;

    log::info!("Playing {} round(s) on {} with seed {}", rounds, difficulty.as_str(), seed);
    for round in 1..=rounds {
        for _ in 0..max_frames {
            if autopilot::wants_jump(session.state(), &viewport) {
                session.jump();
            }
            session.frame(now, viewport);
            now += frame_ms;
            if session.phase() == AppPhase::GameOver {
                break;
            }
        }
        println!(
            "Round {}: score {} (best {})",
            round,
            session.state().score,
            session.high_score().best
        );
        session.restart();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
