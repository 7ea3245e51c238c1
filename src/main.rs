//! Seasons - headless simulation driver
//!
//! Runs the simulation loop, optionally serving the debug protocol, and can
//! export the sunray diagrams as PNG files when it finishes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use seasons::core::{logging, time::FrameClock, types::Result};
use seasons::remote::RemoteQueue;
use seasons::view::{ContainerHandle, Perspective, RaysView};
use seasons::{SeasonsApp, SeasonsConfig};

/// How long a debug connection waits for the loop to answer
const REMOTE_TIMEOUT: Duration = Duration::from_secs(2);

const TICK_HZ: f64 = 60.0;

fn main() {
    logging::init();
    log::info!("Seasons starting");

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut config = match parse_path_arg(args, "--config", "-c") {
        Some(path) => {
            log::info!("Loading config from: {}", path.display());
            SeasonsConfig::load(&path)?
        }
        None => SeasonsConfig::default(),
    };
    if let Some(port) = parse_port_arg(args) {
        config.debug_port = Some(port);
    }
    let seconds = parse_seconds_arg(args);
    let out_dir = parse_path_arg(args, "--out", "-o");

    let mut app = SeasonsApp::new(&config);
    app.start();
    if args.iter().any(|a| a == "--animate") {
        app.set_main_animation(true, 0.0);
    }

    let remote = config.debug_port.map(start_debug_server);

    // A debug session runs on wall time until killed or for the given length
    let (mut clock, frames) = match (&remote, seconds) {
        (Some(_), s) => (FrameClock::realtime(), s.map(|s| (s * TICK_HZ) as u64)),
        (None, s) => (FrameClock::fixed(TICK_HZ), Some((s.unwrap_or(10.0) * TICK_HZ) as u64)),
    };

    loop {
        if frames.is_some_and(|limit| clock.frame_count() >= limit) {
            break;
        }
        let now = clock.tick();
        if let Some(queue) = &remote {
            queue.service(&mut app, now);
        }
        app.tick(now);

        if clock.frame_count() % (TICK_HZ as u64 * 5) == 0 {
            log::info!("t={:.1}s day={:.2} fps={:.0}", now / 1000.0, app.state().day, clock.fps());
        }
        if remote.is_some() {
            std::thread::sleep(Duration::from_secs_f64(1.0 / TICK_HZ));
        }
    }

    let state = app.state();
    log::info!(
        "Finished after {} frames: day {:.2}, sunray angle {:.1}°",
        clock.frame_count(),
        state.day,
        state.sunray_angle()
    );

    if let Some(dir) = out_dir {
        export_diagrams(&app, &config, &dir)?;
    }
    app.teardown();
    Ok(())
}

/// Start the debug server in a background thread with its own tokio runtime.
fn start_debug_server(port: u16) -> RemoteQueue {
    let queue = RemoteQueue::new();
    let handler = queue.handler(REMOTE_TIMEOUT);
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(async move {
            let handler = std::sync::Arc::new(tokio::sync::Mutex::new(handler));
            let _server = seasons_debug::DebugServer::start(handler, port);
            // Keep runtime alive forever
            loop {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        });
    });
    queue
}

/// Write both sunray diagrams, reusing mounted views where possible.
fn export_diagrams(app: &SeasonsApp, config: &SeasonsConfig, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let size = config.secondary_view_size;
    for (perspective, name) in [(Perspective::Ground, "rays_ground.png"), (Perspective::Space, "rays_space.png")] {
        let path = dir.join(name);
        match app.manager().rays(perspective) {
            Some(view) => view.save_png(&path)?,
            None => RaysView::new(perspective, ContainerHandle::new(size.width, size.height), app.state())
                .save_png(&path)?,
        }
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Parse a path argument such as `--config <file>`
fn parse_path_arg(args: &[String], long: &str, short: &str) -> Option<PathBuf> {
    let i = args.iter().position(|a| a == long || a == short)?;
    args.get(i + 1).map(PathBuf::from)
}

/// Parse `--debug-port <port>`; a bare `--debug` uses the default port
fn parse_port_arg(args: &[String]) -> Option<u16> {
    if let Some(i) = args.iter().position(|a| a == "--debug-port") {
        return args.get(i + 1).and_then(|p| p.parse().ok());
    }
    args.iter().any(|a| a == "--debug").then_some(seasons_debug::DEFAULT_PORT)
}

/// Parse `--seconds <n>`, the simulated run length
fn parse_seconds_arg(args: &[String]) -> Option<f64> {
    let i = args.iter().position(|a| a == "--seconds" || a == "-s")?;
    args.get(i + 1).and_then(|s| s.parse().ok()).filter(|s: &f64| *s >= 0.0)
}
