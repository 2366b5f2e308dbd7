use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};

/// Environment variable holding the Vimeo API token
pub const TOKEN_ENV: &str = "VIMEO_ACCESS_TOKEN";

/// Overrides the directory `showreel.json` is read from
pub const CONFIG_DIR_ENV: &str = "SHOWREEL_CONFIG_DIR";

const CONFIG_FILENAME: &str = "showreel.json";

/// Optional settings read from `showreel.json`, every key may be omitted
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ConfigFile {
    web_host: Option<String>,
    web_port: Option<String>,
    api_prefix: Option<String>,
    collection: Option<String>,
    per_page: Option<u32>,
    access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub web_host: String,
    pub web_port: String,
    pub api_prefix: String,
    /// Curated collection (Vimeo channel) the carousel reads from
    pub collection: String,
    pub per_page: u32,
    pub access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            web_host: "0.0.0.0".into(),
            web_port: "8448".into(),
            api_prefix: "https://api.vimeo.com".into(),
            collection: "staffpicks".into(),
            per_page: 10,
            access_token: None,
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let pd = ProjectDirs::from("com", "showreel", "showreel")
        .ok_or_else(|| anyhow::anyhow!("Unable to determine configuration directories"))?;
    Ok(pd.config_dir().to_path_buf())
}

impl Config {
    pub fn load() -> Result<Config> {
        let dir = config_dir()?;
        Config::load_from(&dir, std::env::var(TOKEN_ENV).ok())
    }

    /// Defaults, then `showreel.json` in `dir` if present, then `token_override`
    pub fn load_from(dir: &Path, token_override: Option<String>) -> Result<Config> {
        let mut cfg = Config::default();

        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            debug!("Loading config from {:?}", &path);
            let f = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open {:?}", &path))?;
            let file: ConfigFile = serde_json::from_reader(f)
                .with_context(|| format!("Failed to parse config file {:?}", &path))?;
            cfg.apply(file);
        } else {
            debug!("No config file at {:?}, using defaults", &path);
        }

        if let Some(token) = token_override.filter(|t| !t.is_empty()) {
            cfg.access_token = Some(token);
        }
        if cfg.access_token.is_none() {
            warn!("No Vimeo access token configured (set {})", TOKEN_ENV);
        }

        Ok(cfg)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(v) = file.web_host {
            self.web_host = v;
        }
        if let Some(v) = file.web_port {
            self.web_port = v;
        }
        if let Some(v) = file.api_prefix {
            self.api_prefix = v;
        }
        if let Some(v) = file.collection {
            self.collection = v;
        }
        if let Some(v) = file.per_page {
            self.per_page = v;
        }
        if let Some(v) = file.access_token {
            self.access_token = Some(v);
        }
    }

    pub fn web_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let cfg = Config::load_from(tmp.path(), None)?;
        assert_eq!(cfg.web_addr(), "0.0.0.0:8448");
        assert_eq!(cfg.collection, "staffpicks");
        assert_eq!(cfg.per_page, 10);
        assert_eq!(cfg.access_token, None);
        Ok(())
    }

    #[test]
    fn test_file_and_token_override() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"{"web_port": "9000", "collection": "animation", "access_token": "from-file"}"#,
        )?;

        let cfg = Config::load_from(tmp.path(), None)?;
        assert_eq!(cfg.web_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.collection, "animation");
        assert_eq!(cfg.api_prefix, "https://api.vimeo.com");
        assert_eq!(cfg.access_token.as_deref(), Some("from-file"));

        let cfg = Config::load_from(tmp.path(), Some("from-env".into()))?;
        assert_eq!(cfg.access_token.as_deref(), Some("from-env"));

        // Empty environment value doesn't clobber the file
        let cfg = Config::load_from(tmp.path(), Some("".into()))?;
        assert_eq!(cfg.access_token.as_deref(), Some("from-file"));
        Ok(())
    }

    #[test]
    fn test_bad_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(tmp.path().join(CONFIG_FILENAME), "{ nope")?;
        assert!(Config::load_from(tmp.path(), None).is_err());
        Ok(())
    }
}
