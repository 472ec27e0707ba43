use std::path::PathBuf;
use std::str::FromStr;

use crate::presets::FigureKind;

xflags::xflags! {
    /// Latency and memory-bandwidth figures for SciML inference workloads.
    cmd PlotArgs {
        /// Figure to generate.
        /// XDR: data rate of the benchmark tasks
        /// ONCHIP: model bandwidth against on-chip capabilities
        /// ALL: both figures (default)
        optional -f, --figure figure: FigureArg

        /// CSV workload table replacing the figure's built-in one.
        /// Columns: name,bandwidth_lo,bandwidth_hi,latency_lo,latency_hi[,color]
        optional -w, --workloads path: PathBuf

        /// Directory receiving the figures (default: current directory).
        optional -o, --output-dir dir: PathBuf

        /// Also write the derived points to this CSV file.
        /// With several figures, the figure name is appended to the stem.
        optional -p, --points path: PathBuf

        /// Enables verbose mode, logging every derived point.
        optional -v, --verbose
    }
}

#[derive(Debug, Default)]
pub enum FigureArg {
    Xdr,
    Onchip,
    #[default]
    All,
}

impl FromStr for FigureArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "XDR" => Ok(FigureArg::Xdr),
            "ONCHIP" => Ok(FigureArg::Onchip),
            "ALL" => Ok(FigureArg::All),
            _ => Err(format!(
                "Invalid figure: '{}'. Expected 'xdr', 'onchip' or 'all'.",
                s
            )),
        }
    }
}

impl From<FigureArg> for Vec<FigureKind> {
    fn from(val: FigureArg) -> Self {
        match val {
            FigureArg::Xdr => vec![FigureKind::Xdr],
            FigureArg::Onchip => vec![FigureKind::Onchip],
            FigureArg::All => FigureKind::ALL.to_vec(),
        }
    }
}
