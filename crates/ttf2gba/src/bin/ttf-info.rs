use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Context};
use gbafont::{image::ImageFormat, FontSource};
use ttf2gba::{face_count, face_name, TtfFont, DEFAULT_THRESHOLD};
use ttf_parser::Face;

#[derive(Parser)]
/// Show how characters of a font land on the working canvas
pub struct Opts {
    /// The font file
    font_file: PathBuf,

    /// The characters to show
    #[clap(default_value = "AgW")]
    chars: String,

    /// The face in a font collection
    #[clap(short, long, default_value = "0")]
    index: u32,

    /// Size in pixels per em
    #[clap(short, long, default_value = "8")]
    size: u32,

    /// Threshold at which to treat coverage as "on"
    #[clap(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Save the canvas of every character as PNG into this folder
    #[clap(long)]
    out: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let opt: Opts = Opts::parse();
    let data = std::fs::read(&opt.font_file)
        .wrap_err_with(|| format!("failed to read file '{}'", opt.font_file.display()))?;

    let face = Face::parse(&data, opt.index)?;
    println!("name:         {}", face_name(&face).as_deref().unwrap_or("-"));
    println!("faces:        {}", face_count(&data));
    println!("units per em: {}", face.units_per_em());
    println!("ascender:     {}", face.ascender());
    println!("descender:    {}", face.descender());
    println!("glyphs:       {}", face.number_of_glyphs());
    println!("monospaced:   {}", face.is_monospaced());

    if let Some(out) = &opt.out {
        std::fs::create_dir_all(out)?;
    }

    let name = opt.font_file.display().to_string();
    let font = TtfFont::from_bytes(&data, opt.index, name)?.with_threshold(opt.threshold);
    for c in opt.chars.chars() {
        let code = u8::try_from(c).map_err(|_| eyre!("{:?} is not an ASCII character", c))?;
        match font.rasterize(code, opt.size) {
            Ok(sample) => {
                println!();
                println!("{:?} ({}): {:?}", c, code, sample.bbox);
                print!("{}", sample.canvas);
                if let Some(out) = &opt.out {
                    let path = out.join(format!("char-{:03}.png", code));
                    let image = sample.canvas.to_image();
                    image
                        .save_with_format(&path, ImageFormat::Png)
                        .wrap_err_with(|| format!("failed to save '{}'", path.display()))?;
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
