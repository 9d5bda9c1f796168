//! Directory tree helpers.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Set the modification time of the file at `path`.
pub fn set_mtime(path: &Path, time: SystemTime) {
    let file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .unwrap_or_else(|e| panic!("Could not open {} to set mtime: {e}", path.display()));
    file.set_modified(time).unwrap();
}

/// Render the tree under `root` as sorted lines.
///
/// Directories render as `name/`, files as `name = <content>` (lossy UTF-8).
/// Paths are relative to `root` and use forward slashes. A missing root
/// renders as `<missing>`.
///
/// ```text
/// a.txt = hi
/// sub/
/// sub/b.txt = yo
/// ```
pub fn snapshot(root: &Path) -> String {
    if !root.exists() {
        return "<missing>".to_string();
    }
    let mut lines = Vec::new();
    collect(root, "", &mut lines);
    lines.sort();
    lines.join("\n")
}

fn collect(dir: &Path, prefix: &str, lines: &mut Vec<String>) {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Could not list {}: {e}", dir.display()));
    for entry in entries {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().unwrap();
        if file_type.is_dir() {
            lines.push(format!("{relative}/"));
            collect(&entry.path(), &relative, lines);
        } else if file_type.is_symlink() {
            lines.push(format!("{relative} -> link"));
        } else {
            let content = fs::read(entry.path()).unwrap();
            lines.push(format!("{relative} = {}", String::from_utf8_lossy(&content)));
        }
    }
}
