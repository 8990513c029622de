// src/fetch/urls.rs
use crate::schema::DatasetName;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};
use url::Url;

/// Where the producer's CSVs live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Source {
    /// Base URL; each dataset is fetched from `<base>/<file>`.
    Http(Url),
    /// Local directory holding `<file>` for each dataset.
    Dir(PathBuf),
}

/// Resolved location of one dataset document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Url(Url),
    Path(PathBuf),
}

impl Source {
    /// `http://` and `https://` strings are URL bases, anything else a directory.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let mut url = Url::parse(raw).with_context(|| format!("parsing source URL {}", raw))?;
            // join() replaces the last segment unless the base ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Source::Http(url))
        } else {
            Ok(Source::Dir(PathBuf::from(raw)))
        }
    }

    pub fn locate(&self, name: DatasetName) -> Result<Locator> {
        let file = name.file_name();
        match self {
            Source::Http(base) => base
                .join(&file)
                .map(Locator::Url)
                .with_context(|| format!("joining {} onto {}", file, base)),
            Source::Dir(dir) => Ok(Locator::Path(dir.join(file))),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Dir(PathBuf::from("public/data"))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => write!(f, "{}", url),
            Source::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Url(url) => write!(f, "{}", url),
            Locator::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl TryFrom<String> for Source {
    type Error = anyhow::Error;

    fn try_from(raw: String) -> Result<Self> {
        Source::parse(&raw)
    }
}

impl From<Source> for String {
    fn from(source: Source) -> String {
        source.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_base_gets_trailing_slash() {
        let src = Source::parse("https://example.org/dashboard/data").unwrap();
        let loc = src.locate(DatasetName::TaxBase).unwrap();
        assert_eq!(
            loc,
            Locator::Url(Url::parse("https://example.org/dashboard/data/tax_base.csv").unwrap())
        );
    }

    #[test]
    fn test_dir_source() {
        let src = Source::parse("public/data").unwrap();
        assert_eq!(
            src.locate(DatasetName::WinnersLosers).unwrap(),
            Locator::Path(PathBuf::from("public/data/winners_losers.csv"))
        );
    }

    #[test]
    fn test_bad_url_is_an_error() {
        assert!(Source::parse("http://").is_err());
    }
}
