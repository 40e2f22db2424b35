use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

/// File name fragments of fonts with broad CJK coverage, most preferred first.
pub const PREFERRED_FAMILIES: &[&str] = &[
    "notosanscjk",
    "notosansjp",
    "notosansmonocjk",
    "notoserifcjk",
    "sourcehansans",
    "sourcehanserif",
    "wqy-zenhei",
    "wqy-microhei",
    "droidsansfallback",
    "hiraginosans",
    "hiragino",
    "yugothic",
    "msgothic",
    "msyh",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Directories searched for a default font.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from(r"C:\Windows\Fonts"),
    ];

    if let Some(home) = home::home_dir() {
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }

    dirs
}

/// Locate a CJK-capable font in the usual system locations.
pub fn discover_font() -> Option<PathBuf> {
    discover_in(&font_dirs())
}

/// Pick the most preferred font file under `dirs`.
///
/// Files whose names match no entry of [`PREFERRED_FAMILIES`] are never
/// returned. Ties go to the lexicographically smallest path.
pub fn discover_in<P: AsRef<Path>>(dirs: &[P]) -> Option<PathBuf> {
    let mut best: Option<(usize, PathBuf)> = None;

    for dir in dirs {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            continue;
        }

        let candidates = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file());

        for entry in candidates {
            let Some(rank) = family_rank(entry.path()) else {
                continue;
            };

            let better = match &best {
                Some((best_rank, best_path)) => {
                    (rank, entry.path()) < (*best_rank, best_path.as_path())
                },
                None => true,
            };
            if better {
                best = Some((rank, entry.into_path()));
            }
        }
    }

    if let Some((_, path)) = &best {
        debug!("discovered default font {}", path.display());
    }
    best.map(|(_, path)| path)
}

fn family_rank(path: &Path) -> Option<usize> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !FONT_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    PREFERRED_FAMILIES.iter().position(|family| name.contains(family))
}
