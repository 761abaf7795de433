//! Short link commands

use colored::Colorize;
use serde_json::Value;

use crate::cli::CliError;
use crate::errors::EmbedlinkerError;
use crate::services::{EmbedData, generate_embed_html, is_instagram_url_expired};
use crate::storage::{LinkStore, Metadata};

pub fn shorten_link(store: &mut LinkStore, url: &str, meta: &[String]) -> Result<(), CliError> {
    let metadata = parse_meta_pairs(meta)?;
    let metadata = (!metadata.is_empty()).then_some(metadata);

    let id = store.shorten_url(url, metadata);

    println!(
        "{} Short link created: {} -> {}",
        "✓".bold().green(),
        id.cyan(),
        url.blue().underline()
    );
    Ok(())
}

pub fn resolve_link(store: &LinkStore, id: &str) -> Result<(), CliError> {
    let url = store.resolve_url(id).ok_or_else(|| link_not_found(id))?;

    if is_instagram_url_expired(url) {
        eprintln!(
            "{} Instagram CDN link is expired or expires within the hour",
            "⚠".bold().yellow()
        );
    }

    println!("{}", url);
    Ok(())
}

pub fn show_metadata(store: &LinkStore, id: &str) -> Result<(), CliError> {
    if !store.contains(id) {
        return Err(link_not_found(id));
    }

    match store.get_url_metadata(id) {
        Some(metadata) => {
            let json = serde_json::to_string_pretty(metadata).map_err(EmbedlinkerError::from)?;
            println!("{}", json);
        }
        None => println!(
            "{} {} is a legacy entry without metadata",
            "ℹ".bold().blue(),
            id.cyan()
        ),
    }
    Ok(())
}

pub fn update_link(store: &mut LinkStore, id: &str, url: &str) -> Result<(), CliError> {
    let old_url = store
        .resolve_url(id)
        .map(str::to_string)
        .ok_or_else(|| link_not_found(id))?;

    if !store.update_url(id, url) {
        return Err(link_not_found(id));
    }

    println!(
        "{} Short link updated from {} to {}",
        "✓".bold().green(),
        old_url.dimmed().underline(),
        url.blue().underline()
    );
    Ok(())
}

pub fn render_embed(store: &LinkStore, id: &str) -> Result<(), CliError> {
    let url = store.resolve_url(id).ok_or_else(|| link_not_found(id))?;

    let data = match store.get_url_metadata(id) {
        Some(metadata) => EmbedData::from_metadata(url, metadata),
        None => EmbedData::new(url),
    };

    print!("{}", generate_embed_html(&data));
    Ok(())
}

pub fn check_expiry(url: &str) -> Result<(), CliError> {
    if is_instagram_url_expired(url) {
        println!("{}", "expired".red().bold());
    } else {
        println!("{}", "valid".green().bold());
    }
    Ok(())
}

fn link_not_found(id: &str) -> CliError {
    EmbedlinkerError::not_found(format!("Short link does not exist: {}", id)).into()
}

/// 解析 `key=value` 形式的元数据
///
/// 值能按 JSON 解析时保留其类型（数字、布尔），否则作为字符串保存。
pub fn parse_meta_pairs(pairs: &[String]) -> Result<Metadata, CliError> {
    let mut metadata = Metadata::new();

    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            CliError::ParseError(format!("Metadata must be KEY=VALUE, got '{}'", pair))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::ParseError(format!(
                "Metadata key cannot be empty: '{}'",
                pair
            )));
        }

        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
            _ => Value::String(raw.to_string()),
        };
        metadata.insert(key.to_string(), value);
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meta_pairs_keeps_scalar_types() {
        let pairs = vec![
            "title=Hello=World".to_string(),
            "videoWidth=640".to_string(),
            "nsfw=false".to_string(),
            "empty=".to_string(),
        ];
        let metadata = parse_meta_pairs(&pairs).unwrap();

        assert_eq!(metadata["title"], "Hello=World");
        assert_eq!(metadata["videoWidth"], 640);
        assert_eq!(metadata["nsfw"], false);
        assert_eq!(metadata["empty"], "");
    }

    #[test]
    fn test_parse_meta_pairs_rejects_malformed() {
        assert!(matches!(
            parse_meta_pairs(&["novalue".to_string()]),
            Err(CliError::ParseError(_))
        ));
        assert!(matches!(
            parse_meta_pairs(&["=value".to_string()]),
            Err(CliError::ParseError(_))
        ));
    }
}
