// Writes the displayed markup to disk. No network involved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn svg_file_name(template: &str) -> String {
    format!("now-playing-{template}.svg")
}

pub fn png_file_name(template: &str) -> String {
    format!("now-playing-{template}.png")
}

/// Download directory, then home, then the working directory.
pub fn export_dir() -> PathBuf {
    match directories::UserDirs::new() {
        Some(dirs) => dirs
            .download_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
        None => PathBuf::from("."),
    }
}

pub fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_template_id() {
        assert_eq!(svg_file_name("modern-card"), "now-playing-modern-card.svg");
        assert_eq!(png_file_name("default"), "now-playing-default.png");
    }

    #[test]
    fn test_write_export() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_export(tmp.path(), "now-playing-default.svg", b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
        assert!(path.ends_with("now-playing-default.svg"));
    }
}
