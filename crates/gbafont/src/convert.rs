use log::info;

use crate::{
    chset::{scan, CharacterSet, ScannedSet},
    emit::{emit, sanitize_name, EmitOptions, FontArtifact},
    error::{ConvertError, DegenerateInputError},
    pack::{pack, PackedFont, RowPolicy},
    source::FontSource,
};

/// Everything but the font that determines the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The identifier of the generated files and symbols
    pub name: String,
    /// The size in pixels per em
    pub size: u32,
    /// The characters to include
    pub chset: CharacterSet,
    /// How to store a row
    pub rows: RowPolicy,
    /// Settings for the generated code
    pub emit: EmitOptions,
}

impl Conversion {
    /// Create a conversion with default row policy and code settings
    pub fn new(name: impl Into<String>, size: u32, chset: CharacterSet) -> Self {
        Self {
            name: name.into(),
            size,
            chset,
            rows: RowPolicy::default(),
            emit: EmitOptions::default(),
        }
    }
}

/// The result of [`convert`] along with the intermediate stages
#[derive(Debug, Clone)]
pub struct Converted {
    /// The sampled glyphs
    pub scanned: ScannedSet,
    /// The packed table
    pub packed: PackedFont,
    /// The generated files
    pub artifact: FontArtifact,
}

/// Scan, pack and emit a character set
///
/// Nothing is written to disk, see [`FontArtifact::write_to`].
pub fn convert<S: FontSource + ?Sized>(
    source: &S,
    conversion: &Conversion,
) -> Result<Converted, ConvertError> {
    let name = sanitize_name(&conversion.name)?;
    let scanned = scan(source, conversion.size, conversion.chset)?;
    if scanned.cell.is_empty() {
        return Err(DegenerateInputError::NoInk(scanned.samples.len()).into());
    }
    info!(
        "Scanned {} characters of {} at {}px: {} cell",
        scanned.samples.len(),
        source.name(),
        conversion.size,
        scanned.cell
    );

    let packed = pack(&scanned, conversion.rows)?;
    let artifact = emit(
        &name,
        &packed,
        source.name(),
        conversion.size,
        &conversion.emit,
    )?;
    Ok(Converted {
        scanned,
        packed,
        artifact,
    })
}
