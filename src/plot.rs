use std::process;

use plot_lib::error::PlotResult;
use plot_lib::flags::PlotArgs;
use plot_lib::presets::FigureKind;
use plot_lib::run_wrapper::{self, RunPolicy};

fn main() {
    let args = PlotArgs::from_env_or_exit();
    plot_lib::init_logging(args.verbose);

    if let Err(e) = run_plot(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_plot(args: PlotArgs) -> PlotResult<()> {
    let mut policy = RunPolicy {
        workloads: args.workloads,
        points: args.points,
        ..Default::default()
    };
    if let Some(dir) = args.output_dir {
        policy.output_dir = dir;
    }

    let kinds: Vec<FigureKind> = args.figure.unwrap_or_default().into();
    run_wrapper::run(&kinds, &policy)?;

    Ok(())
}
