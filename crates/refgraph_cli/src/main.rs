use refgraph_core::{Tracker, TrackerResult};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const USAGE: &str = "Usage: refgraph [demo]";

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match argv.first().map(String::as_str) {
        None | Some("demo") => {
            if let Err(e) = run_demo() {
                eprintln!("RuntimeError: {e}");
                std::process::exit(1);
            }
        }
        Some(_) => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

/// Replays the reference demonstration: two objects, one graph edge, and
/// three explicit collections. Only the last one reclaims anything, and it
/// cascades from the first object to the second.
fn run_demo() -> TrackerResult<()> {
    let mut tracker = Tracker::new();

    let first = tracker.allocate(16);
    let second = tracker.allocate(32);
    report(&tracker.collect());

    tracker.refer_to(first, second)?;
    tracker.decrease_root_count(second)?;
    println!("GC1");
    report(&tracker.collect());

    tracker.decrease_root_count(first)?;
    println!("GC2");
    report(&tracker.collect());

    Ok(())
}

fn report(reclaimed: &[usize]) {
    for id in reclaimed {
        println!("erasing {id}");
    }
}
