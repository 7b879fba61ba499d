use crate::config::{AssetsConfig, SiteConfig};
use crate::services::html::html_escape;

/// Resolves `~`-relative asset paths against the site's app root.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    app_root: String,
    css_path: String,
    scripts_path: String,
    theme_path: String,
}

impl AssetPaths {
    pub fn new(site: &SiteConfig, assets: &AssetsConfig) -> Self {
        Self {
            app_root: site.app_root.clone(),
            css_path: assets.css_path.clone(),
            scripts_path: assets.scripts_path.clone(),
            theme_path: assets.theme_path.clone(),
        }
    }

    /// Expand a leading `~` to the app root. Other paths pass through.
    pub fn content(&self, path: &str) -> String {
        match path.strip_prefix('~') {
            Some(rest) => {
                let root = self.app_root.trim_end_matches('/');
                if rest.starts_with('/') {
                    format!("{}{}", root, rest)
                } else {
                    format!("{}/{}", root, rest)
                }
            }
            None => path.to_string(),
        }
    }

    pub fn css_link(&self, path: &str) -> String {
        let path = self.under(&self.css_path, path);
        format!(
            r#"<link href="{}" rel="stylesheet" type="text/css" />"#,
            html_escape(&self.content(&path))
        )
    }

    pub fn script_link(&self, path: &str) -> String {
        let path = self.under(&self.scripts_path, path);
        format!(
            r#"<script type="text/javascript" src="{}"></script>"#,
            html_escape(&self.content(&path))
        )
    }

    pub fn theme_content(&self, path: &str) -> String {
        self.content(&format!("{}/{}", self.theme_path, path))
    }

    fn under(&self, dir: &str, path: &str) -> String {
        if path.starts_with('~') {
            path.to_string()
        } else {
            format!("{}{}", dir, path)
        }
    }
}
