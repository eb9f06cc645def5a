use pollset::application::config::loader::ConfigLoader;
use pollset::application::watcher::watch_manager::WatchManager;
use pollset::common::logger::Logger;
use std::env;
use std::io;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <config_file>", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    let config = match ConfigLoader::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing config file: {}", e);
            std::process::exit(1);
        }
    };

    let mut watch_manager = match WatchManager::new(&config) {
        Ok(wm) => wm,
        Err(e) => {
            eprintln!("Error registering descriptors: {}", e);
            std::process::exit(1);
        }
    };

    watch_manager.print_watch_info();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match watch_manager.run(&mut out) {
        Ok(summary) => {
            let total: usize = summary.bytes.values().sum();
            Logger::info(&format!(
                "Done after {} wake-ups, {} bytes drained, {} descriptors closed",
                summary.wakeups,
                total,
                summary.closed.len()
            ));
        }
        Err(e) => {
            eprintln!("Watch error: {}", e);
            std::process::exit(1);
        }
    }
}
