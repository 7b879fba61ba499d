use crate::services::html::LinkBuilder;
use crate::services::slug::is_valid_slug;
use crate::services::tags::parse_tags;
use crate::web::AppState;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "\x1b[32m✓ OK\x1b[0m"),
            CheckStatus::Warn => write!(f, "\x1b[33m⚠ WARN\x1b[0m"),
            CheckStatus::Fail => write!(f, "\x1b[31m✗ FAIL\x1b[0m"),
        }
    }
}

struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

pub fn run(config_path: &Path) -> Result<()> {
    println!("\n  tagwiki check\n");

    let mut results: Vec<CheckResult> = Vec::new();

    let config = match super::load_config(config_path) {
        Ok(c) => {
            results.push(CheckResult {
                name: "Configuration".into(),
                status: CheckStatus::Ok,
                detail: format!("Loaded from {}", config_path.display()),
            });
            c
        }
        Err(e) => {
            results.push(CheckResult {
                name: "Configuration".into(),
                status: CheckStatus::Fail,
                detail: format!("{:#}", e),
            });
            return finish(&results);
        }
    };

    let assets_dir = Path::new(&config.assets.dir);
    results.push(if assets_dir.is_dir() {
        CheckResult {
            name: "Asset directory".into(),
            status: CheckStatus::Ok,
            detail: assets_dir.display().to_string(),
        }
    } else {
        CheckResult {
            name: "Asset directory".into(),
            status: CheckStatus::Warn,
            detail: format!("{} does not exist; /assets will return 404", assets_dir.display()),
        }
    });

    let links = LinkBuilder::new(&config.site.app_root);
    let bad_tags: Vec<String> = config
        .tags
        .seed
        .iter()
        .flat_map(|field| parse_tags(field))
        .filter(|tag| !is_valid_slug(&crate::encode_title(tag)))
        .collect();
    results.push(if bad_tags.is_empty() {
        CheckResult {
            name: "Tag seeds".into(),
            status: CheckStatus::Ok,
            detail: format!("{} page tag field(s), home at {}", config.tags.seed.len(), links.home()),
        }
    } else {
        CheckResult {
            name: "Tag seeds".into(),
            status: CheckStatus::Warn,
            detail: format!("No URL-safe characters in: {}", bad_tags.join(", ")),
        }
    });

    match AppState::new(config) {
        Ok(_) => results.push(CheckResult {
            name: "Templates".into(),
            status: CheckStatus::Ok,
            detail: "All templates compiled".into(),
        }),
        Err(e) => results.push(CheckResult {
            name: "Templates".into(),
            status: CheckStatus::Fail,
            detail: format!("{:#}", e),
        }),
    }

    finish(&results)
}

fn finish(results: &[CheckResult]) -> Result<()> {
    print_results(results);
    if results.iter().any(|r| r.status == CheckStatus::Fail) {
        println!("\n  \x1b[31mSome checks failed.\x1b[0m\n");
        anyhow::bail!("check failed");
    }
    println!("\n  \x1b[32mAll checks passed.\x1b[0m\n");
    Ok(())
}

fn print_results(results: &[CheckResult]) {
    let max_name_len = results.iter().map(|r| r.name.len()).max().unwrap_or(20);

    for (i, result) in results.iter().enumerate() {
        println!(
            "  {:>2}. {:<width$}  {}  {}",
            i + 1,
            result.name,
            result.status,
            result.detail,
            width = max_name_len,
        );
    }
}
