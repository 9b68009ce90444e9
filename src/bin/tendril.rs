use std::process;
use tendril::{cmdline, environment};

fn main() {
    pretty_env_logger::init();
    let env = environment::Environment::default();
    let args = std::env::args().collect();
    if let Err(e) = cmdline::launch(args, &env) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
