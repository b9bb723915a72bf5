//! 出力ディレクトリへ書き出す FileSaver 実装

use crate::error::Error;
use crate::ports::outbound::{FileSaver, FileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 指定ディレクトリ直下にファイルとして保存する
pub struct DirFileSaver {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl DirFileSaver {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSaver for DirFileSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Error> {
        // パス区切りを含む名前は受け付けない（出力ディレクトリ外へ書かない）
        let name = Path::new(file_name);
        if name.file_name().map(|n| n != name.as_os_str()).unwrap_or(true) {
            return Err(Error::invalid_argument(format!(
                "Invalid file name: {}",
                file_name
            )));
        }
        self.fs.create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        self.fs.write(&path, bytes)?;
        Ok(path)
    }
}
