//! Package root discovery and guard macro naming.

use std::path::{Component, Path, PathBuf};

/// Source layout directories that reset the macro path.
pub const LAYOUT_MARKERS: [&str; 3] = ["include", "src", "test"];

pub const DEFAULT_PACKAGE_MARKER: &str = "package.xml";

/// Nearest ancestor directory of `file` that contains `marker`.
///
/// `file` should be absolute; a relative path only searches the ancestors
/// it spells out.
pub fn find_package_root(file: &Path, marker: &str) -> Option<PathBuf> {
    file.ancestors()
        .skip(1)
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
}

/// Path components after the last layout marker, in original order.
pub fn parts_after_layout_marker(relative: &Path) -> Vec<String> {
    let mut parts: Vec<String> = relative
        .components()
        .rev()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .take_while(|part| !LAYOUT_MARKERS.contains(&part.as_str()))
        .collect();
    parts.reverse();
    parts
}

/// Guard macro for a path relative to its package root.
///
/// `include/rospkg/foobar.h` becomes `ROSPKG__FOOBAR_H_`.
pub fn macro_name(relative: &Path) -> String {
    let joined = parts_after_layout_marker(relative).join("__");
    format!("{}_", joined.replace('.', "_").to_uppercase())
}
