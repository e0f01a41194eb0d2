use fleet_nav::math::Point2d;
use fleet_nav::{EventLog, FleetShell, LaneLocation, NavGraph, ShellConfig};
use log::{error, info, warn};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

const USAGE: &str = "usage: fleet-nav <graph.json> [config.json] [log.txt]";

/// Parses a click given as two numbers separated by whitespace or a comma.
fn parse_click(line: &str) -> Option<Point2d> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Some(Point2d::new(x, y)),
        _ => None,
    }
}

/// Reads clicks from stdin on a separate thread until input ends.
fn spawn_click_reader() -> Receiver<Point2d> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!("failed to read input: {}", err);
                    break;
                }
            };
            let Some(point) = parse_click(&line) else {
                warn!("ignoring input {:?}", line);
                continue;
            };
            if sender.send(point).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Feeds clicks to the shell, stepping animations every `interval`.
///
/// Clicks that arrive while robots are moving are handled between steps,
/// so a new command takes over from a running animation. Returns once the
/// clicks run out and every animation has finished.
fn run<W: Write>(shell: &mut FleetShell<W>, clicks: &Receiver<Point2d>, interval: Duration) {
    loop {
        if !shell.is_animating() {
            let Ok(point) = clicks.recv() else {
                return;
            };
            info!("{:?}", shell.click(point));
        }
        while let Ok(point) = clicks.try_recv() {
            info!("{:?}", shell.click(point));
        }
        if shell.is_animating() {
            shell.tick();
            std::thread::sleep(interval);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(graph_path) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let config = match args.next() {
        Some(path) => ShellConfig::load(&path).unwrap_or_else(|err| {
            error!("failed to load config from {}: {}", path, err);
            ShellConfig::default()
        }),
        None => ShellConfig::default(),
    };
    let log_path = args.next().unwrap_or_else(|| "fleet_logs.txt".into());
    let event_log = match EventLog::append(&log_path) {
        Ok(event_log) => event_log,
        Err(err) => {
            error!("failed to open event log {}: {}", log_path, err);
            std::process::exit(1);
        }
    };

    let interval = config.step_interval();
    let graph = NavGraph::load_or_empty(&graph_path);
    let mut shell = FleetShell::new(graph, config, event_log);
    shell.add_robot("Robot 0", LaneLocation::new(1, 0.0));

    info!("reading clicks from stdin, one \"x y\" pair per line");
    let clicks = spawn_click_reader();
    run(&mut shell, &clicks, interval);

    match serde_json::to_string_pretty(&shell.scene()) {
        Ok(json) => println!("{}", json),
        Err(err) => error!("failed to serialize scene: {}", err),
    }
}
