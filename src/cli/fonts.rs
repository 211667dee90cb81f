//! Finding installed fonts

use std::{
    collections::BTreeSet,
    env,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use ttf2gba::face_count;

/// The file extensions of supported fonts
pub const EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// A font file found on the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    /// The file name
    pub name: String,
    /// Where it is
    pub path: PathBuf,
    /// Whether it was found in a per-user folder
    pub user: bool,
    /// The number of faces in the file
    pub faces: u32,
}

/// A folder to look for fonts in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDir {
    /// The path of the folder
    pub path: PathBuf,
    /// Whether the folder belongs to the current user
    pub user: bool,
}

impl FontDir {
    fn system(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user: false,
        }
    }

    fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user: true,
        }
    }
}

/// The font folders of the current platform
pub fn font_dirs() -> Vec<FontDir> {
    let home = env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();
    if cfg!(windows) {
        let windir = env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        dirs.push(FontDir::system(Path::new(&windir).join("Fonts")));
        if let Some(local) = env::var_os("LOCALAPPDATA") {
            dirs.push(FontDir::user(
                Path::new(&local).join("Microsoft").join("Windows").join("Fonts"),
            ));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(FontDir::system("/System/Library/Fonts"));
        dirs.push(FontDir::system("/Library/Fonts"));
        if let Some(home) = home {
            dirs.push(FontDir::user(home.join("Library").join("Fonts")));
        }
    } else {
        dirs.push(FontDir::system("/usr/share/fonts"));
        dirs.push(FontDir::system("/usr/local/share/fonts"));
        if let Some(data) = env::var_os("XDG_DATA_HOME") {
            dirs.push(FontDir::user(Path::new(&data).join("fonts")));
        } else if let Some(home) = &home {
            dirs.push(FontDir::user(home.join(".local").join("share").join("fonts")));
        }
        if let Some(home) = home {
            dirs.push(FontDir::user(home.join(".fonts")));
        }
    }
    dirs
}

fn is_font_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

fn read_face_count(path: &Path) -> io::Result<u32> {
    let mut header = Vec::with_capacity(12);
    File::open(path)?.take(12).read_to_end(&mut header)?;
    Ok(face_count(&header))
}

fn walk(dir: &Path, user: bool, seen: &mut BTreeSet<PathBuf>, out: &mut Vec<FontEntry>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping '{}': {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, user, seen, out);
            continue;
        }
        if !is_font_file(&path) {
            continue;
        }
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if !seen.insert(key) {
            continue;
        }
        let faces = match read_face_count(&path) {
            Ok(faces) => faces,
            Err(e) => {
                warn!("Failed to read '{}': {}", path.display(), e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        out.push(FontEntry {
            name,
            path,
            user,
            faces,
        });
    }
}

/// Collect the fonts in `dirs`, sorted by name
///
/// Every file is listed once, even if it is reachable through more than one
/// folder. If `search` is set, only files whose name contains it (ignoring
/// case) are kept.
pub fn discover(dirs: &[FontDir], search: Option<&str>) -> Vec<FontEntry> {
    let mut seen = BTreeSet::new();
    let mut fonts = Vec::new();
    for dir in dirs {
        walk(&dir.path, dir.user, &mut seen, &mut fonts);
    }
    if let Some(term) = search {
        let term = term.to_lowercase();
        fonts.retain(|f| f.name.to_lowercase().contains(&term));
    }
    fonts.sort_by(|a, b| {
        let (x, y) = (a.name.to_lowercase(), b.name.to_lowercase());
        x.cmp(&y).then_with(|| a.path.cmp(&b.path))
    });
    fonts
}
