//! Resolution of language codes to local source files.

use std::path::{Path, PathBuf};

use crate::error::{PolyglexError, Result};
use crate::ingest::config::SourceFormat;

/// Supplies the local path of a language's raw source.
///
/// Errors are per-language: the pipeline skips a language whose fetch fails
/// and carries on with the rest.
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, language: &str, format: SourceFormat) -> Result<PathBuf>;
}

/// Looks sources up in a cache directory laid out as
/// `<cache>/<lang>/<lang>.dic` and `<cache>/<lang>/<lang>_cursewords.txt`.
#[derive(Debug, Clone)]
pub struct CacheDirFetcher {
    cache_dir: PathBuf,
}

impl CacheDirFetcher {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Where the source for `language` is expected to be.
    pub fn source_path(&self, language: &str, format: SourceFormat) -> PathBuf {
        let file_name = match format {
            SourceFormat::Hunspell => format!("{language}.dic"),
            SourceFormat::PlainList => format!("{language}_cursewords.txt"),
        };
        self.cache_dir.join(language).join(file_name)
    }
}

impl SourceFetcher for CacheDirFetcher {
    fn fetch(&self, language: &str, format: SourceFormat) -> Result<PathBuf> {
        let path = self.source_path(language, format);
        if path.is_file() {
            log::debug!("[{language}] using cached source {}", path.display());
            Ok(path)
        } else {
            Err(PolyglexError::fetch(format!(
                "no {} source for '{language}' at {}",
                format.dict_prefix(),
                path.display()
            )))
        }
    }
}
