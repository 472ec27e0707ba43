use std::process;

use plot_lib::presets::FigureKind;
use plot_lib::run_wrapper::{self, RunPolicy};

fn main() {
    plot_lib::init_logging(false);

    if let Err(e) = run_wrapper::run(&[FigureKind::Xdr], &RunPolicy::default()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
