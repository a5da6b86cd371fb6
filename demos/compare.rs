//! Compare every search strategy on a random obstacle grid, then route the
//! same requests through both request managers.
//!
//! Run: cargo run --bin compare [config.json]
//! Set `RUST_LOG=debug` to see per-search timings.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use hexpath_demos::{DemoConfig, DemoError, build_scenario, compare_strategies, load_config};
use hexpath_requests::{PathRequestManager, ThreadedRequestManager};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1);
    if let Err(e) = run(path.as_deref()) {
        eprintln!("Error: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(path: Option<&str>) -> Result<(), DemoError> {
    let config = load_config(path)?;
    let (grid, pairs) = build_scenario(&config)?;
    log::info!(
        "{}x{} grid, {} walkable cells, {} requests",
        grid.width(),
        grid.height(),
        grid.walkable_count(),
        pairs.len()
    );

    println!(
        "{:<30} {:>6} {:>6} {:>8} {:>10} {:>12}",
        "strategy", "found", "failed", "moves", "expanded", "time"
    );
    for r in compare_strategies(&grid, &pairs) {
        println!(
            "{:<30} {:>6} {:>6} {:>8} {:>10} {:>12?}",
            r.strategy.name(),
            r.found,
            r.failed,
            r.total_moves,
            r.expanded,
            r.elapsed
        );
    }

    let grid = Arc::new(grid);
    run_manager(&config, &grid, &pairs);
    run_threaded(&config, &grid, &pairs);
    Ok(())
}

type Tally = Arc<Mutex<(usize, usize)>>;

fn tally_callback(tally: &Tally) -> impl FnOnce(hexpath_paths::Path, bool) + Send + 'static {
    let tally = Arc::clone(tally);
    move |_, ok| {
        if let Ok(mut t) = tally.lock() {
            if ok {
                t.0 += 1;
            } else {
                t.1 += 1;
            }
        }
    }
}

fn report(label: &str, tally: &Tally, elapsed: Duration) {
    if let Ok(t) = tally.lock() {
        println!("{label}: {} found, {} failed in {elapsed:?}", t.0, t.1);
    }
}

fn run_manager(
    config: &DemoConfig,
    grid: &Arc<hexpath_core::HexGrid>,
    pairs: &[(hexpath_core::WorldPos, hexpath_core::WorldPos)],
) {
    let tally = Tally::default();
    let started = Instant::now();
    let mut manager = PathRequestManager::with_config(Arc::clone(grid), config.manager);
    for &(start, end) in pairs {
        manager.request_path(start, end, tally_callback(&tally));
    }
    let mut ticks = 0usize;
    while !manager.is_idle() {
        manager.tick();
        ticks += 1;
    }
    log::info!("request manager drained after {ticks} ticks");
    report(
        &format!("manager ({}, {:?})", manager.strategy(), manager.dispatch()),
        &tally,
        started.elapsed(),
    );
}

fn run_threaded(
    config: &DemoConfig,
    grid: &Arc<hexpath_core::HexGrid>,
    pairs: &[(hexpath_core::WorldPos, hexpath_core::WorldPos)],
) {
    let tally = Tally::default();
    let started = Instant::now();
    let mut manager = match ThreadedRequestManager::spawn(Arc::clone(grid), config.manager.strategy) {
        Ok(manager) => manager,
        Err(e) => {
            log::error!("cannot start worker: {e}");
            return;
        }
    };
    for &(start, end) in pairs {
        if let Err(e) = manager.request_path(start, end, tally_callback(&tally)) {
            log::error!("request refused: {e}");
            break;
        }
    }
    while manager.pending() > 0 {
        if manager.update() > 0 {
            continue;
        }
        if !manager.is_running() && manager.update() == 0 {
            log::error!("path worker exited with {} requests outstanding", manager.pending());
            break;
        }
        thread::sleep(Duration::from_millis(1));
    }
    manager.shutdown();
    report("threaded manager", &tally, started.elapsed());
}
