use std::path::PathBuf;

use url::Url;

use crate::foundation::error::{CardError, CardResult};

/// Executor for the platform side effects the reducer emits: saving the
/// exported image and opening a share URL. Keeping these behind a trait keeps
/// the render pipeline free of platform I/O.
pub trait EffectHost {
    fn save_image(&mut self, filename: &str, png: &[u8]) -> CardResult<()>;
    fn open_url(&mut self, url: &Url) -> CardResult<()>;
}

/// Filesystem host used by the CLI: images land in a directory, and share
/// URLs are printed instead of opening a browsing context.
#[derive(Debug)]
pub struct FsEffectHost {
    dir: PathBuf,
    /// Paths written so far, newest last.
    pub saved: Vec<PathBuf>,
    /// URLs "opened" so far, newest last.
    pub opened: Vec<Url>,
}

impl FsEffectHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
            opened: Vec::new(),
        }
    }
}

impl EffectHost for FsEffectHost {
    fn save_image(&mut self, filename: &str, png: &[u8]) -> CardResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CardError::store(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        let path = self.dir.join(filename);
        std::fs::write(&path, png)
            .map_err(|e| CardError::store(format!("write image '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), "card saved");
        self.saved.push(path);
        Ok(())
    }

    fn open_url(&mut self, url: &Url) -> CardResult<()> {
        println!("{url}");
        self.opened.push(url.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_image_writes_into_the_directory() {
        let dir = std::env::temp_dir().join(format!("suicard_effects_{}", std::process::id()));
        let mut host = FsEffectHost::new(&dir);
        host.save_image("sui-is-for-friends.png", &[9, 9, 9]).unwrap();
        assert_eq!(host.saved.len(), 1);
        assert_eq!(std::fs::read(&host.saved[0]).unwrap(), vec![9, 9, 9]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
