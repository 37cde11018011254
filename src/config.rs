use std::path::PathBuf;

use clap::Parser;

use crate::buffer::CellLayout;
use crate::buffer::Dimensions;
use crate::universe::Pattern;

pub const DEFAULT_WIDTH: u32 = 64;
pub const DEFAULT_HEIGHT: u32 = 64;
pub const DEFAULT_CELL_SIZE: u32 = 1;
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Watch Conway's Game of Life in the terminal. Click a cell to toggle it.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of columns in the universe
    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..=4096))]
    pub width: u32,

    /// Number of rows in the universe
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..=4096))]
    pub height: u32,

    /// Side of a cell, in pixels. A terminal character holds 2x4 pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CELL_SIZE, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub cell_size: u32,

    /// How the universe stores its cells
    #[arg(long, value_enum, default_value_t = CellLayout::Packed)]
    pub layout: CellLayout,

    /// Initial population
    #[arg(long, value_enum, default_value_t = Pattern::Random)]
    pub pattern: Pattern,

    /// Seed for the random pattern
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the animation stopped
    #[arg(long)]
    pub paused: bool,

    /// Frames per second the host loop aims for
    #[arg(long, value_name = "HZ", default_value_t = DEFAULT_REFRESH_RATE, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub refresh_rate: u32,

    /// Run this many frames without a terminal, then print the universe and frame statistics
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,

    /// Write logs to this file. Filter with RUST_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dims: Dimensions,
    pub cell_size: u32,
    pub layout: CellLayout,
    pub pattern: Pattern,
    pub seed: Option<u64>,
    pub start_running: bool,
    pub refresh_rate: u32,
    pub headless: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn config(self) -> Config {
        Config {
            dims: Dimensions::new(self.width, self.height),
            cell_size: self.cell_size,
            layout: self.layout,
            pattern: self.pattern,
            seed: self.seed,
            start_running: !self.paused,
            refresh_rate: self.refresh_rate,
            headless: self.headless,
            log_file: self.log_file,
        }
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = Cli::parse_from(["lifeview"]).config();

        assert_eq!(config.dims, Dimensions::new(64, 64));
        assert_eq!(config.cell_size, 1);
        assert_eq!(config.layout, CellLayout::Packed);
        assert_eq!(config.pattern, Pattern::Random);
        assert!(config.start_running);
        assert_eq!(config.refresh_rate, 60);
        assert_eq!(config.headless, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Cli::parse_from([
            "lifeview",
            "--width",
            "10",
            "--height",
            "20",
            "--layout",
            "bytes",
            "--pattern",
            "alternating",
            "--paused",
            "--headless",
            "5",
        ])
        .config();

        assert_eq!(config.dims, Dimensions::new(10, 20));
        assert_eq!(config.layout, CellLayout::Bytes);
        assert_eq!(config.pattern, Pattern::Alternating);
        assert!(!config.start_running);
        assert_eq!(config.headless, Some(5));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(Cli::try_parse_from(["lifeview", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["lifeview", "--cell-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["lifeview", "--refresh-rate", "0"]).is_err());
    }
}
