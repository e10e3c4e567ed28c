mod cli;

use cli::{cli, inspect, InspectOptions};
use log::{error, LevelFilter};
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env("LOG")
        .filter_level(LevelFilter::Info)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = cli().get_matches();
    let options = InspectOptions {
        json: matches.get_flag("json"),
        strict: matches.get_flag("strict"),
    };
    let inputs = matches
        .get_many::<PathBuf>("input")
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    let mut failed = false;

    for input in inputs {
        if let Err(err) = inspect(input, options) {
            let mut errors = Vec::new();

            for cause in err.chain() {
                errors.push(format!("- {}", cause));
            }

            error!(
                "failed to inspect `{}`. error:\n{}",
                input.display(),
                errors.join("\n")
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}
