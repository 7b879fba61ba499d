use crate::services::assets::AssetPaths;
use crate::services::html::{format_file_size, LinkBuilder};
use crate::services::markup::{MarkdownRenderer, MarkupRenderer};
use crate::services::pages::PageStore;
use crate::services::slug::encode_title;
use crate::services::tags::{tag_cloud_class, TagRegistry};
use crate::Config;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub templates: Tera,
    pub links: LinkBuilder,
    pub assets: AssetPaths,
    pub markup: Arc<dyn MarkupRenderer>,
    pub tags: TagRegistry,
    pub pages: PageStore,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let links = LinkBuilder::new(&config.site.app_root);
        let markup = Arc::new(MarkdownRenderer::new(links.clone()));
        Self::with_renderer(config, markup)
    }

    pub fn with_renderer(config: Config, markup: Arc<dyn MarkupRenderer>) -> Result<Self> {
        let mut templates = Tera::default();

        templates.register_filter("encode_title", encode_title_filter);
        templates.register_filter("tagcloud_class", tagcloud_class_filter);
        templates.register_filter("file_size", file_size_filter);
        templates.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("home.html", include_str!("../../templates/home.html")),
            ("tag.html", include_str!("../../templates/tag.html")),
            ("edit.html", include_str!("../../templates/edit.html")),
            ("page.html", include_str!("../../templates/page.html")),
            ("preview.html", include_str!("../../templates/preview.html")),
        ])?;

        let links = LinkBuilder::new(&config.site.app_root);
        let assets = AssetPaths::new(&config.site, &config.assets);
        let tags = TagRegistry::seeded(&config.tags.seed);
        tracing::info!("Loaded {} tag(s) from config", tags.len());

        Ok(Self {
            config,
            templates,
            links,
            assets,
            markup,
            tags,
            pages: PageStore::new(),
        })
    }
}

fn encode_title_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let title = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("encode_title requires a string"))?;
    Ok(Value::String(encode_title(title)))
}

fn tagcloud_class_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("tagcloud_class requires a non-negative number"))?;
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    Ok(Value::String(tag_cloud_class(count).to_string()))
}

fn file_size_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let bytes = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("file_size requires a non-negative number"))?;
    Ok(Value::String(format_file_size(bytes)))
}
