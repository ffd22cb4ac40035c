//! Held WhatsApp session id, remembered between invocations.

use std::io::ErrorKind;
use std::path::Path;

use crate::Result;

/// Id stored at `path`, if any.
pub fn load(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let id = contents.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Remember `id` at `path`, or forget it when `None`.
pub fn save(path: &Path, id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, id)?;
            log::debug!("held session {id} saved to {}", path.display());
        }
        None => match std::fs::remove_file(path) {
            Ok(()) => log::debug!("held session forgotten"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_forget() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session");

        assert!(load(&path).is_none());
        save(&path, Some("s-1")).unwrap();
        assert_eq!(load(&path).as_deref(), Some("s-1"));

        save(&path, None).unwrap();
        assert!(!path.exists());
        save(&path, None).unwrap();
    }
}
