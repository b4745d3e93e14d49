use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const MONGODB_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];
const DATABASE_NAME_FORBIDDEN: [char; 7] = ['/', '\\', '.', ' ', '"', '$', '\0'];
const DATABASE_NAME_MAX_BYTES: usize = 64;

/// Store configuration, loaded from the YAML file given with `-m`.
///
/// ```yaml
/// database:
///   uri: mongodb://localhost:27017
///   name: dns_audit
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

impl StoreConfig {
    /// Load and validate a [`StoreConfig`] from the YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened.
    ///
    /// Returns [`Error::InvalidYAML`] if the file isn't YAML or a `database` key is missing.
    ///
    /// Returns [`Error::InvalidConfig`] if a value fails validation.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p.as_ref())?;
        let reader = BufReader::new(f);
        let mut conf: StoreConfig = serde_yaml::from_reader(reader)?;
        conf.database.uri = conf.database.uri.trim().to_string();
        conf.validate().map_err(|reason| Error::InvalidConfig {
            path: p.as_ref().to_path_buf(),
            reason,
        })?;
        Ok(conf)
    }

    fn validate(&self) -> Result<(), String> {
        let uri = &self.database.uri;
        if uri.is_empty() {
            return Err("database.uri is empty".to_string());
        }
        if !MONGODB_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
            return Err(format!(
                "database.uri must start with one of {}",
                MONGODB_SCHEMES.join(" or ")
            ));
        }

        let name = &self.database.name;
        if name.is_empty() {
            return Err("database.name is empty".to_string());
        }
        if name.len() >= DATABASE_NAME_MAX_BYTES {
            return Err(format!(
                "database.name must be shorter than {DATABASE_NAME_MAX_BYTES} bytes"
            ));
        }
        if let Some(c) = name.chars().find(|c| DATABASE_NAME_FORBIDDEN.contains(c)) {
            return Err(format!("database.name contains forbidden character {c:?}"));
        }
        Ok(())
    }
}
