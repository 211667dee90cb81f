use clap::Parser;
use color_eyre::eyre;
use gbafont_tool::cli::{self, fonts};
use prettytable::{cell, format, row, Cell, Row, Table};

#[derive(Parser, Debug)]
/// List the fonts installed on this system
pub struct Options {
    /// Only list fonts whose file name contains this (ignoring case)
    #[clap(short, long)]
    search: Option<String>,
}

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;

    let dirs = fonts::font_dirs();
    let found = fonts::discover(&dirs, opt.search.as_deref());
    if found.is_empty() {
        println!("No fonts found");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["name", "faces", "scope", "path"]);
    for font in &found {
        table.add_row(Row::new(vec![
            Cell::new(&font.name),
            Cell::new(&format!("{:3}", font.faces)),
            Cell::new(if font.user { "user" } else { "system" }),
            Cell::new(&font.path.display().to_string()),
        ]));
    }
    table.printstd();
    println!("{} font files", found.len());
    Ok(())
}
