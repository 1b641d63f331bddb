use balanced_collections::red_black_tree::RedBlackSet;
use log::{error, info, warn, LevelFilter};
use simplelog::{Config, SimpleLogger};
use std::env;
use std::process;

const USAGE: &str = "usage: balanced-collections [KEY | -KEY]...";

fn main() {
    let level = env::var("RB_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);
    if let Err(err) = SimpleLogger::init(level, Config::default()) {
        eprintln!("failed to initialize logger: {}", err);
    }

    let mut set = RedBlackSet::new();
    for arg in env::args().skip(1) {
        // a leading '-' removes the key instead of inserting it
        let (is_removal, digits) = match arg.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, arg.as_str()),
        };
        let key: u64 = match digits.parse() {
            Ok(key) => key,
            Err(err) => {
                error!("invalid key {:?}: {}", arg, err);
                eprintln!("{}", USAGE);
                process::exit(2);
            },
        };

        if is_removal {
            match set.remove(&key) {
                Some(key) => info!("removed {}", key),
                None => warn!("{} is not present", key),
            }
        } else if set.insert(key) {
            info!("inserted {}", key);
        } else {
            warn!("{} is already present", key);
        }
    }

    match set.check_invariants() {
        Ok(black_height) => info!("{} keys, black-height {}", set.len(), black_height),
        Err(violation) => {
            error!("tree is corrupt: {}", violation);
            process::exit(1);
        },
    }

    let keys: Vec<String> = set.iter().map(u64::to_string).collect();
    println!("{}", keys.join(" "));
}
