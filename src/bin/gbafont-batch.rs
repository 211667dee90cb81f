use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use gbafont_tool::cli::{self, convert, script::BatchScript};
use log::info;

#[derive(Parser, Debug)]
/// Run a batch conversion script
pub struct RunOpts {
    /// A batch script (RON)
    file: PathBuf,
    /// The output folder (default: as set in the script)
    out: Option<PathBuf>,
}

fn main() -> eyre::Result<()> {
    let opt: RunOpts = cli::init()?;

    let text = std::fs::read_to_string(&opt.file)
        .wrap_err_with(|| format!("Failed to open file: `{}`", opt.file.display()))?;
    let script = BatchScript::from_ron(&text).wrap_err("Failed to parse batch script")?;

    let folder = match opt.file.parent() {
        Some(folder) => folder.to_owned(),
        None => PathBuf::from("."),
    };
    let out = script.out_dir(&folder, opt.out.as_deref());

    let count = script.jobs.len();
    for (index, job) in script.jobs.iter().enumerate() {
        let font_file = job.font_file(&folder);
        info!("Job {}/{}: '{}'", index + 1, count, font_file.display());

        let options = job.options(&script, &folder, &out);
        let font = convert::load(&font_file, &options)?;
        let conversion = options.conversion(&font_file);
        let (artifact, _) = convert::run(&font, &conversion, &options)
            .wrap_err_with(|| format!("Job {} failed", index + 1))?;
        info!(
            "Wrote {} and {} to '{}'",
            artifact.source_file_name(),
            artifact.header_file_name(),
            out.display()
        );
    }
    Ok(())
}
