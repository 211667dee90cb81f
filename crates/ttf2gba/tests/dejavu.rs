use std::path::{Path, PathBuf};

use gbafont::{
    chset::scan,
    convert,
    error::{ConvertError, DegenerateInputError},
    CharacterSet, Conversion, FontSource,
};
use ttf2gba::{face_count, TtfFont};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSansMono.ttf")
}

fn open() -> TtfFont {
    TtfFont::open(&fixture(), 0).expect("fixture font")
}

#[test]
fn load_names() {
    let font = open();
    assert_eq!(font.name(), "DejaVuSansMono.ttf");
    assert_eq!(font.face_name(), Some("DejaVu Sans Mono"));
    let data = std::fs::read(fixture()).unwrap();
    assert_eq!(face_count(&data), 1);
}

#[test]
fn load_errors() {
    let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/missing.ttf");
    let err = TtfFont::open(&missing, 0).err().expect("missing file");
    assert_eq!(err.path, missing);

    let err = TtfFont::from_bytes(b"not a font", 0, "garbage").err();
    assert!(err.is_some());

    let err = TtfFont::open(&fixture(), 3).err();
    assert!(err.is_some(), "face index out of range");
}

#[test]
fn space_has_no_ink() {
    let font = open();
    let space = font.rasterize(b' ', 8).unwrap();
    assert!(space.bbox.is_empty());
    let a = font.rasterize(b'A', 8).unwrap();
    assert!(!a.bbox.is_empty());
    assert!(a.bbox.x1 <= 32 && a.bbox.y1 <= 32);
}

#[test]
fn uppercase_at_8px_is_reproducible() {
    let font = open();
    let conversion = Conversion::new("dejavusansmono8", 8, CharacterSet::UPPERCASE);
    let first = convert(&font, &conversion).unwrap();
    let again = convert(&open(), &conversion).unwrap();

    let cell = first.scanned.cell;
    assert!(cell.width > 0 && cell.height > 0);
    assert_eq!(again.scanned.cell, cell);
    assert!(first.scanned.failed.is_empty());

    assert_eq!(first.packed.glyphs.len(), 59);
    for glyph in &first.packed.glyphs {
        assert_eq!(glyph.rows.len(), cell.height as usize);
    }
    assert_eq!(first.artifact, again.artifact);
    assert!(first
        .artifact
        .source
        .starts_with("// Generated font data from DejaVuSansMono.ttf\n"));
}

#[test]
fn written_files_are_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let conversion = Conversion::new("mono", 10, CharacterSet::PRINTABLE);

    let [c, h] = convert(&open(), &conversion)
        .unwrap()
        .artifact
        .write_to(dir.path(), false)
        .unwrap();
    let c1 = std::fs::read(&c).unwrap();
    let h1 = std::fs::read(&h).unwrap();

    convert(&open(), &conversion)
        .unwrap()
        .artifact
        .write_to(dir.path(), true)
        .unwrap();
    assert_eq!(std::fs::read(&c).unwrap(), c1);
    assert_eq!(std::fs::read(&h).unwrap(), h1);
}

#[test]
fn cell_does_not_shrink_with_size() {
    let font = open();
    let small = scan(&font, 8, CharacterSet::PRINTABLE).unwrap().cell;
    let large = scan(&font, 16, CharacterSet::PRINTABLE).unwrap().cell;
    assert!(large.width >= small.width);
    assert!(large.height >= small.height);
}

#[test]
fn only_space_is_degenerate() {
    let set = CharacterSet::range(b' ', b' ').unwrap();
    let err = convert(&open(), &Conversion::new("space", 8, set)).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Degenerate(DegenerateInputError::NoInk(1))
    ));
}
