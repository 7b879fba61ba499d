use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub tags: TagsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Public prefix of every generated URL, e.g. `/wiki` behind a proxy that
    /// strips it. `~` in asset paths expands to this.
    #[serde(default = "default_app_root")]
    pub app_root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            app_root: default_app_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Header a fronting proxy sets to the authenticated user name.
    #[serde(default = "default_user_header")]
    pub user_header: String,
    #[serde(default)]
    pub admins: Vec<String>,
    /// The proxy owns the login, so no logout link is rendered.
    #[serde(default)]
    pub windows_authentication: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            admins: Vec::new(),
            windows_authentication: false,
        }
    }
}

impl AuthConfig {
    pub fn is_admin(&self, username: &str) -> bool {
        self.admins.iter().any(|a| a == username)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    /// Directory on disk served under `/assets`.
    #[serde(default = "default_assets_dir")]
    pub dir: String,
    #[serde(default = "default_css_path")]
    pub css_path: String,
    #[serde(default = "default_scripts_path")]
    pub scripts_path: String,
    #[serde(default = "default_theme_path")]
    pub theme_path: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            css_path: default_css_path(),
            scripts_path: default_scripts_path(),
            theme_path: default_theme_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagsConfig {
    /// Tag fields of existing pages, one entry per page, e.g. `"rust;web"`.
    #[serde(default)]
    pub seed: Vec<String>,
}

fn default_title() -> String {
    "Wiki".to_string()
}

fn default_app_root() -> String {
    "/".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_user_header() -> String {
    "x-remote-user".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_css_path() -> String {
    "~/assets/css/".to_string()
}

fn default_scripts_path() -> String {
    "~/assets/scripts/".to_string()
}

fn default_theme_path() -> String {
    "~/assets/themes/default".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read config file '{}': {}", path.display(), e)
        })?;
        let config = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.site.app_root.starts_with('/') {
            anyhow::bail!("site.app_root must start with '/'");
        }
        if self.auth.user_header.trim().is_empty() {
            anyhow::bail!("auth.user_header must not be empty");
        }
        if axum::http::HeaderName::from_bytes(self.auth.user_header.as_bytes()).is_err() {
            anyhow::bail!("auth.user_header '{}' is not a valid header name", self.auth.user_header);
        }
        for (key, value) in [
            ("assets.css_path", &self.assets.css_path),
            ("assets.scripts_path", &self.assets.scripts_path),
            ("assets.theme_path", &self.assets.theme_path),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} must not be empty", key);
            }
        }
        Ok(())
    }
}
