use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = parse_seed(&args).unwrap_or_else(system_seed);
    log::info!("starting with seed {seed}");

    survivor::display::run(seed);
}

fn parse_seed(args: &[String]) -> Option<u64> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            return iter.next().and_then(|value| value.parse().ok());
        }
    }
    None
}

fn system_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
