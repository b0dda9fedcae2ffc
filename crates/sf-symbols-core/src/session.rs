//! Provides the `Session` type, which represents the user's state during an
//! execution of sfsymbols: the working directory, the `sfsymbols.json` that
//! applies to it and the name catalog in use.

use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use once_cell::unsync::OnceCell;
use sf_symbol_catalog::{self as catalog, Catalog, NameList, WellFormed};

use crate::config::Config;
use crate::error::{Context, ErrorKind, Fallible, SymbolsError};

/// Environment variable naming a catalog file, overriding the config.
pub const CATALOG_ENV: &str = "SFSYMBOLS_CATALOG";

/// Where the catalog in use was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Flag(PathBuf),
    Environment(PathBuf),
    Config(PathBuf),
    /// No catalog was configured; names are only checked for well-formedness.
    WellFormed,
}

impl CatalogSource {
    /// Picks the catalog by precedence: the command-line flag, then the
    /// environment, then the config file.
    #[must_use]
    pub fn resolve(flag: Option<&Path>, env: Option<PathBuf>, config: Option<&Config>) -> Self {
        if let Some(path) = flag {
            Self::Flag(path.to_owned())
        } else if let Some(path) = env {
            Self::Environment(path)
        } else if let Some(path) = config.and_then(Config::catalog) {
            Self::Config(path)
        } else {
            Self::WellFormed
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Environment(path) | Self::Config(path) => Some(path),
            Self::WellFormed => None,
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (from --catalog)", path.display()),
            Self::Environment(path) => write!(f, "{} (from {CATALOG_ENV})", path.display()),
            Self::Config(path) => write!(f, "{} (from config)", path.display()),
            Self::WellFormed => f.write_str("well-formed names"),
        }
    }
}

/// Represents the user's state during an execution of sfsymbols. The config
/// and the catalog are loaded on first use and kept for the rest of the run.
pub struct Session {
    cwd: OnceCell<PathBuf>,
    config: OnceCell<Option<Config>>,
    catalog: OnceCell<Box<dyn Catalog>>,
}

impl Session {
    /// Constructs a new `Session` for the current directory.
    #[must_use]
    pub fn init() -> Self {
        Self {
            cwd: OnceCell::new(),
            config: OnceCell::new(),
            catalog: OnceCell::new(),
        }
    }

    /// Constructs a `Session` rooted at `dir` instead of the current directory.
    #[must_use]
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: OnceCell::with_value(dir.into()),
            ..Self::init()
        }
    }

    /// The directory the session was started in.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn cwd(&self) -> Fallible<&Path> {
        self.cwd
            .get_or_try_init(|| env::current_dir().with_context(|| ErrorKind::CurrentDirError))
            .map(PathBuf::as_path)
    }

    /// The closest `sfsymbols.json`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn config(&self) -> Fallible<Option<&Config>> {
        self.config
            .get_or_try_init(|| Config::find(self.cwd()?))
            .map(Option::as_ref)
    }

    /// The name catalog, loaded on first use. `flag` is the `--catalog` value
    /// of the running command; only the first call resolves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or the catalog file cannot be loaded.
    pub fn catalog(&self, flag: Option<&Path>) -> Fallible<&dyn Catalog> {
        self.catalog
            .get_or_try_init(|| {
                let env = env::var_os(CATALOG_ENV)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from);
                let source = CatalogSource::resolve(flag, env, self.config()?);
                load_catalog(&source)
            })
            .map(|catalog| &**catalog)
    }
}

fn load_catalog(source: &CatalogSource) -> Fallible<Box<dyn Catalog>> {
    let Some(path) = source.path() else {
        warn!("No SF Symbol catalog configured, accepting every well-formed name");
        return Ok(Box::new(WellFormed));
    };

    debug!("Loading SF Symbol catalog {source}");
    let names = NameList::load(path).map_err(|err| {
        let file = path.to_owned();
        let kind = match err {
            catalog::Error::Io(_) => ErrorKind::CatalogReadError { file },
            catalog::Error::Json(_) | catalog::Error::Layout(_) => {
                ErrorKind::CatalogParseError { file }
            }
        };
        SymbolsError::from_source(err, kind)
    })?;
    debug!("Catalog holds {} names", names.len());

    Ok(Box::new(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flag_takes_precedence() {
        let flag = Path::new("flag.txt");
        assert_eq!(
            CatalogSource::resolve(Some(flag), Some("env.txt".into()), None),
            CatalogSource::Flag(flag.to_owned())
        );
        assert_eq!(
            CatalogSource::resolve(None, Some("env.txt".into()), None),
            CatalogSource::Environment("env.txt".into())
        );
        assert_eq!(
            CatalogSource::resolve(None, None, None),
            CatalogSource::WellFormed
        );
    }

    #[test]
    fn config_catalog_is_used_last() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE),
            r#"{ "catalog": "symbols.txt" }"#,
        )
        .unwrap();
        let config = Config::find(root.path()).unwrap();

        assert_eq!(
            CatalogSource::resolve(None, None, config.as_ref()),
            CatalogSource::Config(root.path().join("symbols.txt"))
        );
        assert_eq!(
            CatalogSource::resolve(None, Some("env.txt".into()), config.as_ref()),
            CatalogSource::Environment("env.txt".into())
        );
    }

    #[test]
    fn flag_catalog_is_loaded() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("symbols.txt");
        fs::write(&file, "star\nheart\n").unwrap();

        let session = Session::for_dir(root.path());
        let catalog = session.catalog(Some(&file)).unwrap();
        assert!(catalog.contains("star"));
        assert!(!catalog.contains("star.fill"));
    }

    #[test]
    fn missing_catalog_is_a_read_error() {
        let root = TempDir::new().unwrap();
        let session = Session::for_dir(root.path());
        let err = session
            .catalog(Some(&root.path().join("missing.txt")))
            .err()
            .unwrap();
        assert!(matches!(err.kind(), ErrorKind::CatalogReadError { .. }));
    }

    #[test]
    fn malformed_json_catalog_is_a_parse_error() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("symbols.json");
        fs::write(&file, "[1, 2]").unwrap();

        let session = Session::for_dir(root.path());
        let err = session.catalog(Some(&file)).err().unwrap();
        assert!(matches!(err.kind(), ErrorKind::CatalogParseError { .. }));
    }

    #[test]
    fn config_is_found_from_the_session_directory() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CONFIG_FILE), r#"{ "names": ["star"] }"#).unwrap();

        let session = Session::for_dir(root.path().join("nested"));
        assert!(session.config().unwrap().unwrap().has_names());
    }
}
