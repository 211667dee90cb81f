//! Converting one font file

use std::path::{Path, PathBuf};

use color_eyre::eyre::{self, WrapErr};
use gbafont::{
    preview::{self, Summary},
    Conversion, Converted, FontArtifact, FontSource, PackedFont,
};
use image::ImageFormat;
use log::info;
use ttf2gba::TtfFont;

use super::opt::ConvertOpts;

/// Load a font with the threshold from the options
pub fn load(font_file: &Path, opt: &ConvertOpts) -> eyre::Result<TtfFont> {
    let font = TtfFont::open(font_file, opt.index)?.with_threshold(opt.threshold);
    match font.face_name() {
        Some(face) => info!("Loaded: {} ({})", font.name(), face),
        None => info!("Loaded: {}", font.name()),
    }
    Ok(font)
}

/// Run a conversion and handle all the side outputs
///
/// Returns the artifact and the paths of the written files, if any.
pub fn run(
    font: &TtfFont,
    conversion: &Conversion,
    opt: &ConvertOpts,
) -> eyre::Result<(FontArtifact, Option<[PathBuf; 2]>)> {
    let converted = gbafont::convert(font, conversion)
        .wrap_err_with(|| format!("Failed to convert '{}'", font.name()))?;

    if let Some(path) = &opt.preview {
        save_preview(&converted, path)?;
    }
    if opt.dump {
        print_packed(&converted.packed);
    }
    if opt.dry_run {
        info!(
            "Dry run, not writing {} and {}",
            converted.artifact.source_file_name(),
            converted.artifact.header_file_name()
        );
        return Ok((converted.artifact, None));
    }

    std::fs::create_dir_all(&opt.out).wrap_err_with(|| {
        format!("Failed to create output folder '{}'", opt.out.display())
    })?;
    let paths = converted.artifact.write_to(&opt.out, opt.force)?;
    info!("Conversion complete!");
    Ok((converted.artifact, Some(paths)))
}

fn save_preview(converted: &Converted, path: &Path) -> eyre::Result<()> {
    let image = preview::render(&converted.scanned);
    image
        .save_with_format(path, ImageFormat::Png)
        .wrap_err_with(|| format!("Failed to save preview '{}'", path.display()))?;
    info!("Saved preview to '{}'", path.display());
    info!("{}", Summary::of(&converted.scanned));
    Ok(())
}

fn print_packed(packed: &PackedFont) {
    for glyph in &packed.glyphs {
        println!("{:?} ({}), {}", glyph.code as char, glyph.code, packed.cell);
        print!("{}", glyph.to_canvas(packed.cell));
        println!();
    }
}

/// Print how to use the generated files
pub fn print_usage(artifact: &FontArtifact) {
    let name = &artifact.name;
    println!(
        "Generated {}x{} font '{}':",
        artifact.cell.width, artifact.cell.height, name
    );
    println!("  {}", artifact.source_file_name());
    println!("  {}", artifact.header_file_name());
    println!();
    println!("To use it, add {} to your sources and", artifact.source_file_name());
    println!("    #include \"{}\"", artifact.header_file_name());
    println!("then draw a character into a 240 pixel wide mode 3 buffer with");
    println!("    draw_char_{}(x, y, 'A', color, buffer, 240);", name);
    println!(
        "Advance by FONT_{0}_WIDTH per character and FONT_{0}_HEIGHT per line.",
        name.to_ascii_uppercase()
    );
}
