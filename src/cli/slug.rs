use crate::services::slug::encode_title;

pub fn run(titles: &[String], verbose: bool) {
    for title in titles {
        let slug = encode_title(title);
        if slug.is_empty() {
            tracing::warn!("'{}' encodes to an empty slug", title);
        }
        if verbose {
            println!("{}\t{}", title, slug);
        } else {
            println!("{}", slug);
        }
    }
}
