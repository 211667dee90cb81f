//! Batch conversion scripts
//!
//! A script is a RON file like this:
//!
//! ```ron
//! (
//!     out: Some("include"),
//!     jobs: [
//!         (font: "fonts/DejaVuSansMono.ttf", size: 8),
//!         (font: "fonts/DejaVuSansMono.ttf", size: 12, charset: "printable", name: Some("mono_large")),
//!     ],
//! )
//! ```
//!
//! Relative paths are resolved against the folder of the script.

use std::path::{Path, PathBuf};

use gbafont::{pack::RowPolicy, CharacterSet, EmitOptions};
use serde::Deserialize;
use ttf2gba::DEFAULT_THRESHOLD;

use super::opt::ConvertOpts;

/// A list of conversions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchScript {
    /// Where to put the files (relative to the script)
    #[serde(default)]
    pub out: Option<PathBuf>,
    /// Overwrite existing files
    #[serde(default)]
    pub force: bool,
    /// The settings for the generated code, shared by all jobs
    #[serde(default)]
    pub emit: EmitOptions,
    /// The conversions
    pub jobs: Vec<Job>,
}

fn default_size() -> u32 {
    8
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

/// One conversion in a script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    /// The font file (relative to the script)
    pub font: PathBuf,
    /// Size in pixels per em
    #[serde(default = "default_size")]
    pub size: u32,
    /// The characters to include
    #[serde(default)]
    pub charset: CharacterSet,
    /// The output name (default: derived from the font file)
    #[serde(default)]
    pub name: Option<String>,
    /// The face in a font collection
    #[serde(default)]
    pub index: u32,
    /// Threshold at which to treat coverage as "on"
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// How to store a row
    #[serde(default)]
    pub row_type: RowPolicy,
    /// Save a preview PNG (relative to the script)
    #[serde(default)]
    pub preview: Option<PathBuf>,
}

impl BatchScript {
    /// Parse a script from RON
    pub fn from_ron(text: &str) -> Result<Self, ron::Error> {
        ron::from_str(text)
    }

    /// The output folder of the script
    ///
    /// `out` from the command line wins over the script.
    pub fn out_dir(&self, folder: &Path, out: Option<&Path>) -> PathBuf {
        match (out, &self.out) {
            (Some(out), _) => out.to_owned(),
            (None, Some(dir)) => folder.join(dir),
            (None, None) => folder.to_owned(),
        }
    }
}

impl Job {
    /// The options for this job, with paths resolved against `folder`
    pub fn options(&self, script: &BatchScript, folder: &Path, out: &Path) -> ConvertOpts {
        ConvertOpts {
            size: self.size,
            charset: self.charset,
            name: self.name.clone(),
            out: out.to_owned(),
            force: script.force,
            index: self.index,
            threshold: self.threshold,
            row_type: self.row_type,
            max_lines: script.emit.max_lines,
            include: script.emit.include.clone(),
            preview: self.preview.as_ref().map(|p| folder.join(p)),
            dump: false,
            dry_run: false,
        }
    }

    /// The font file, resolved against `folder`
    pub fn font_file(&self, folder: &Path) -> PathBuf {
        folder.join(&self.font)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use gbafont::{
        pack::{RowPolicy, RowType},
        CharacterSet,
    };

    use super::BatchScript;

    const SCRIPT: &str = r#"(
        out: Some("include"),
        emit: (max_lines: 128),
        jobs: [
            (font: "fonts/Mono Bold.ttf"),
            (font: "Other.otf", size: 12, charset: "48-57", name: Some("digits"), row_type: "u16"),
        ],
    )"#;

    #[test]
    fn test_parse_script() {
        let script = BatchScript::from_ron(SCRIPT).unwrap();
        assert_eq!(script.jobs.len(), 2);
        assert!(!script.force);
        assert_eq!(script.emit.max_lines, 128);
        assert_eq!(script.emit.include, "gba_types.h");

        let folder = Path::new("/work");
        let out = script.out_dir(folder, None);
        assert_eq!(out, Path::new("/work/include"));
        assert_eq!(script.out_dir(folder, Some(Path::new("x"))), Path::new("x"));

        let first = &script.jobs[0];
        assert_eq!(first.size, 8);
        assert_eq!(first.charset, CharacterSet::UPPERCASE);
        assert_eq!(first.row_type, RowPolicy::Auto);
        let font_file = first.font_file(folder);
        assert_eq!(font_file, Path::new("/work/fonts/Mono Bold.ttf"));
        let opts = first.options(&script, folder, &out);
        assert_eq!(opts.conversion(&font_file).name, "mono_bold8");

        let second = &script.jobs[1];
        let opts = second.options(&script, folder, &out);
        assert_eq!(opts.out, Path::new("/work/include"));
        assert_eq!(opts.size, 12);
        assert_eq!(opts.preview, None);

        let conversion = opts.conversion(&second.font_file(folder));
        assert_eq!(conversion.name, "digits");
        assert_eq!(conversion.chset, CharacterSet::range(b'0', b'9').unwrap());
        assert_eq!(conversion.rows, RowPolicy::Exact(RowType::U16));
        assert_eq!(conversion.emit.max_lines, 128);
    }

    #[test]
    fn test_bad_script() {
        assert!(BatchScript::from_ron("(jobs: [(size: 8)])").is_err());
        assert!(BatchScript::from_ron(r#"(jobs: [(font: "a.ttf", charset: "x")])"#).is_err());
    }
}
