//! Command line options for a conversion

use std::path::{Path, PathBuf};

use clap::Args;
use gbafont::{
    emit::DEFAULT_MAX_LINES, pack::RowPolicy, CharacterSet, Conversion, EmitOptions,
};
use ttf2gba::DEFAULT_THRESHOLD;

/// Options for converting one font
#[derive(Args, Debug, Clone)]
pub struct ConvertOpts {
    /// Size in pixels per em
    #[clap(short, long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..=32))]
    pub size: u32,

    /// `uppercase` (32-90), `printable` (32-126) or a range `FIRST-LAST`
    #[clap(short, long, default_value = "uppercase")]
    pub charset: CharacterSet,

    /// The name used for files and symbols (default: derived from the font file)
    #[clap(short, long)]
    pub name: Option<String>,

    /// The directory to output
    #[clap(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Force overwrite existing files
    #[clap(short, long)]
    pub force: bool,

    /// The face in a font collection
    #[clap(long, default_value = "0")]
    pub index: u32,

    /// Threshold at which to treat coverage as "on"
    #[clap(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u8,

    /// Storage of a row: `auto`, `u8`, `u16` or `u32`
    #[clap(long, default_value = "auto")]
    pub row_type: RowPolicy,

    /// Number of scan lines the drawing routine may draw to
    #[clap(long, default_value_t = DEFAULT_MAX_LINES)]
    pub max_lines: u32,

    /// The header that defines the integer types
    #[clap(long, default_value = "gba_types.h")]
    pub include: String,

    /// Save a preview of the character set as PNG
    #[clap(long)]
    pub preview: Option<PathBuf>,

    /// Print every packed glyph
    #[clap(long)]
    pub dump: bool,

    /// Don't write any files
    #[clap(long)]
    pub dry_run: bool,
}

impl ConvertOpts {
    /// The conversion for `font_file`
    pub fn conversion(&self, font_file: &Path) -> Conversion {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => derive_output_name(font_file, self.size),
        };
        Conversion {
            name,
            size: self.size,
            chset: self.charset,
            rows: self.row_type,
            emit: EmitOptions {
                include: self.include.clone(),
                max_lines: self.max_lines,
            },
        }
    }
}

/// Derive an output name from the file name of a font and the size
///
/// `DejaVu Sans-Bold.ttf` at 8px becomes `dejavu_sans_bold8`.
pub fn derive_output_name(font_file: &Path, size: u32) -> String {
    let stem = font_file
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let base: String = stem
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c,
        })
        .collect();
    format!("{}{}", base, size)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::derive_output_name;

    #[test]
    fn test_derive_output_name() {
        assert_eq!(
            derive_output_name(Path::new("/usr/share/fonts/DejaVuSansMono.ttf"), 8),
            "dejavusansmono8"
        );
        assert_eq!(
            derive_output_name(Path::new("C:\\Fonts\\x/Comic Sans-Bold.otf"), 12),
            "comic_sans_bold12"
        );
        assert_eq!(derive_output_name(Path::new(""), 6), "6");
    }
}
