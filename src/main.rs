//! # gbafont
//!
//! Convert an outline font into a fixed-grid bitmap font for the GBA.
#![warn(missing_docs)]

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use gbafont_tool::cli::{self, convert, opt::ConvertOpts};

#[derive(Parser, Debug)]
#[clap(version)]
/// Convert a TrueType/OpenType font into a C table and drawing routine
pub struct Options {
    /// The font file
    font_file: PathBuf,

    #[clap(flatten)]
    convert: ConvertOpts,
}

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;

    let font = convert::load(&opt.font_file, &opt.convert)?;
    let conversion = opt.convert.conversion(&opt.font_file);
    let (artifact, written) = convert::run(&font, &conversion, &opt.convert)?;
    if written.is_some() {
        convert::print_usage(&artifact);
    }
    Ok(())
}
