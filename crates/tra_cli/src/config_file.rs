//! Reading and writing `TRAE.arg` on disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Location of the argument file relative to the root of the game's drive.
const CONFIG_RELATIVE_PATH: [&str; 4] = ["TRAE", "GAME", "PC", "TRAE.arg"];

/// The game reads its arguments from `<drive root>/TRAE/GAME/PC/TRAE.arg`,
/// whatever directory it is installed in.
pub fn config_path_for_executable(exe: &Path) -> io::Result<PathBuf> {
    let exe = std::path::absolute(exe)?;
    let mut path: PathBuf = exe
        .components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    path.extend(CONFIG_RELATIVE_PATH);
    Ok(path)
}

/// `Ok(None)` when the file does not exist.
pub fn read_config_text(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes `line` verbatim (no trailing newline), creating parent directories.
pub fn write_config_text(path: &Path, line: &str) -> io::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("could not create config directory {}: {e}", dir.display()),
            )
        })?;
    }
    fs::write(path, line)
}

/// Returns `false` if there was nothing to remove.
pub fn remove_config(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{config_path_for_executable, read_config_text, remove_config, write_config_text};

    #[cfg(unix)]
    #[test]
    fn config_path_sits_at_filesystem_root() {
        let path = config_path_for_executable(Path::new("/games/Tomb Raider - Anniversary/tra.exe"))
            .expect("absolute path should resolve");
        assert_eq!(path, PathBuf::from("/TRAE/GAME/PC/TRAE.arg"));
    }

    #[cfg(windows)]
    #[test]
    fn config_path_sits_at_drive_root() {
        let path = config_path_for_executable(Path::new(r"D:\Games\TRA\tra.exe"))
            .expect("absolute path should resolve");
        assert_eq!(path, PathBuf::from(r"D:\TRAE\GAME\PC\TRAE.arg"));
    }

    #[test]
    fn write_read_remove_cycle() {
        let root = temp_test_dir("config_file_cycle");
        let path = root.join("TRAE").join("GAME").join("PC").join("TRAE.arg");

        assert_eq!(read_config_text(&path).expect("missing file is not an error"), None);

        write_config_text(&path, "ma3 -NOMAINMENU").expect("write should create directories");
        assert_eq!(
            fs::read(&path).expect("file should exist"),
            b"ma3 -NOMAINMENU".to_vec()
        );
        assert_eq!(
            read_config_text(&path).expect("file should be readable"),
            Some("ma3 -NOMAINMENU".to_string())
        );

        assert!(remove_config(&path).expect("remove should succeed"));
        assert!(!remove_config(&path).expect("second remove is a no-op"));

        let _ = fs::remove_dir_all(&root);
    }

    fn temp_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{}_{}", std::process::id(), nanos))
    }
}
