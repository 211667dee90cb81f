//! # Generating the C source and header

use std::{
    fmt::Write as _,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{chset::UniformCell, error::EmitError, pack::PackedFont, pack::RowType};

/// The number of scan lines of the GBA screen
pub const DEFAULT_MAX_LINES: u32 = 160;

/// Settings for the generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// The system header that defines `u8`, `u16` and `u32`
    pub include: String,
    /// Rows at or below this line are never drawn to
    pub max_lines: u32,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            include: String::from("gba_types.h"),
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

/// The generated `.c`/`.h` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArtifact {
    /// The identifier used in file and symbol names
    pub name: String,
    /// The definition of the table
    pub source: String,
    /// The constants, table declaration and drawing routine
    pub header: String,
    /// The shape of every glyph
    pub cell: UniformCell,
    /// The storage unit of a row
    pub row_type: RowType,
    /// The number of glyphs in the table
    pub count: usize,
}

/// Turn an output name into an identifier
///
/// Everything that is not an ASCII letter, digit or underscore is replaced
/// with an underscore.
pub fn sanitize_name(name: &str) -> Result<String, EmitError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EmitError::InvalidName(name.to_owned()));
    }
    Ok(name
        .chars()
        .map(|c| match c.is_ascii_alphanumeric() || c == '_' {
            true => c,
            false => '_',
        })
        .collect())
}

fn hex_row(row_type: RowType, value: u32) -> String {
    format!("0x{:0width$X}", value, width = row_type.bytes() * 2)
}

/// Render the artifact pair for a packed font
///
/// `font_name` and `size` only appear in the comments. The output only
/// depends on the arguments, so it is identical across runs.
pub fn emit(
    name: &str,
    font: &PackedFont,
    font_name: &str,
    size: u32,
    options: &EmitOptions,
) -> Result<FontArtifact, EmitError> {
    let name = sanitize_name(name)?;
    let upper = name.to_ascii_uppercase();
    let row = font.row_type.c_type();
    let UniformCell { width, height } = font.cell;

    // Writing to a `String` is infallible
    let mut c = String::new();
    let _ = writeln!(c, "// Generated font data from {}", font_name);
    let _ = writeln!(
        c,
        "// Font size: {}pt, Character size: {}x{}",
        size, width, height
    );
    let _ = writeln!(c, "// Generated by gbafont");
    let _ = writeln!(c);
    let _ = writeln!(c, "#include \"font_{}.h\"", name);
    let _ = writeln!(c);
    let _ = writeln!(
        c,
        "const {} font_{}_data[FONT_{}_COUNT][FONT_{}_HEIGHT] = {{",
        row, name, upper, upper
    );
    for glyph in &font.glyphs {
        let rows: Vec<String> = glyph
            .rows
            .iter()
            .map(|&v| hex_row(font.row_type, v))
            .collect();
        let _ = writeln!(
            c,
            "    {{{}}}, // '{}' ({})",
            rows.join(", "),
            glyph.code as char,
            glyph.code
        );
    }
    let _ = writeln!(c, "}};");

    let mut h = String::new();
    let _ = writeln!(h, "#ifndef FONT_{}_H", upper);
    let _ = writeln!(h, "#define FONT_{}_H", upper);
    let _ = writeln!(h);
    let _ = writeln!(h, "#include <{}>", options.include);
    let _ = writeln!(h);
    let _ = writeln!(h, "#define FONT_{}_WIDTH {}", upper, width);
    let _ = writeln!(h, "#define FONT_{}_HEIGHT {}", upper, height);
    let _ = writeln!(h, "#define FONT_{}_FIRST {}", upper, font.chset.first());
    let _ = writeln!(h, "#define FONT_{}_COUNT {}", upper, font.glyphs.len());
    let _ = writeln!(h, "#define FONT_{}_MAX_LINES {}", upper, options.max_lines);
    let _ = writeln!(h);
    let _ = writeln!(
        h,
        "extern const {} font_{}_data[FONT_{}_COUNT][FONT_{}_HEIGHT];",
        row, name, upper, upper
    );
    let _ = writeln!(h);
    let _ = writeln!(h, "// Helper function to draw a character");
    let _ = writeln!(
        h,
        "static inline void draw_char_{}(int x, int y, char c, u16 color, u16* buffer, int buffer_width) {{",
        name
    );
    let _ = writeln!(
        h,
        "    if(c < FONT_{0}_FIRST || c >= FONT_{0}_FIRST + FONT_{0}_COUNT) c = {1};",
        upper,
        font.chset.fallback_code()
    );
    let _ = writeln!(
        h,
        "    const {}* glyph = font_{}_data[c - FONT_{}_FIRST];",
        row, name, upper
    );
    let _ = writeln!(h, "    for(int row = 0; row < FONT_{}_HEIGHT; row++) {{", upper);
    let _ = writeln!(h, "        {} row_data = glyph[row];", row);
    let _ = writeln!(h, "        for(int col = 0; col < FONT_{}_WIDTH; col++) {{", upper);
    let _ = writeln!(
        h,
        "            if(row_data & (1u << (FONT_{}_WIDTH - 1 - col))) {{",
        upper
    );
    let _ = writeln!(h, "                int px = x + col;");
    let _ = writeln!(h, "                int py = y + row;");
    let _ = writeln!(
        h,
        "                if(px >= 0 && px < buffer_width && py >= 0 && py < FONT_{}_MAX_LINES) {{",
        upper
    );
    let _ = writeln!(h, "                    buffer[py * buffer_width + px] = color;");
    let _ = writeln!(h, "                }}");
    let _ = writeln!(h, "            }}");
    let _ = writeln!(h, "        }}");
    let _ = writeln!(h, "    }}");
    let _ = writeln!(h, "}}");
    let _ = writeln!(h);
    let _ = writeln!(h, "#endif");

    Ok(FontArtifact {
        name,
        source: c,
        header: h,
        cell: font.cell,
        row_type: font.row_type,
        count: font.glyphs.len(),
    })
}

fn write_file(path: &Path, text: &str, force: bool) -> io::Result<()> {
    let file = match force {
        true => File::create(path),
        false => File::create_new(path),
    }?;
    let mut writer = BufWriter::new(file);
    let result = writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush());
    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(path);
    }
    result
}

impl FontArtifact {
    /// The file name of the definition
    pub fn source_file_name(&self) -> String {
        format!("font_{}.c", self.name)
    }

    /// The file name of the declaration
    pub fn header_file_name(&self) -> String {
        format!("font_{}.h", self.name)
    }

    /// Write both files into `dir`
    ///
    /// Existing files are only replaced if `force` is set. If one of the
    /// files can't be written, the other one is removed again, so either
    /// both files are written or none.
    pub fn write_to(&self, dir: &Path, force: bool) -> Result<[PathBuf; 2], EmitError> {
        let header = dir.join(self.header_file_name());
        let source = dir.join(self.source_file_name());

        let mut written: Vec<&Path> = Vec::with_capacity(2);
        for (path, text) in [(&header, &self.header), (&source, &self.source)] {
            if let Err(e) = write_file(path, text, force) {
                for done in written {
                    if let Err(e) = fs::remove_file(done) {
                        warn!("failed to remove '{}': {}", done.display(), e);
                    }
                }
                return Err(EmitError::Io {
                    path: path.clone(),
                    source: e,
                });
            }
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok([source, header])
    }
}
