//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::post::{Author, OgImage};

/// Why a post's front-matter was rejected
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front-matter block at the start of the file")]
    Missing,
    #[error("front-matter block is not terminated")]
    Unterminated,
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<Author>,
    pub cover_image: Option<String>,
    pub path: Option<String>,
    pub og_image: Option<OgImage>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter is fenced by ;;;
        if content.starts_with(";;;") {
            return Self::parse_json(content);
        }

        Err(FrontMatterError::Missing)
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches([' ', '\t']);
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or(FrontMatterError::Unterminated)?;

        let (yaml_content, remaining) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else {
            let end_pos = rest
                .find("\n---")
                .ok_or(FrontMatterError::Unterminated)?;
            (&rest[..end_pos], &rest[end_pos + 4..])
        };

        // Drop the rest of the closing fence line
        let remaining = match remaining.find('\n') {
            Some(pos) => &remaining[pos + 1..],
            None => "",
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..];
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
        let json_content = &rest[..end_pos];
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)?;
        Ok((fm, remaining))
    }

    /// Take a required text field, treating blank values as missing
    pub fn required(
        value: Option<String>,
        name: &'static str,
    ) -> Result<String, FrontMatterError> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or(FrontMatterError::MissingField(name))
    }

    /// Parse the date string, failing on unrecognised formats
    pub fn parse_date(&self) -> Result<DateTime<FixedOffset>, FrontMatterError> {
        let raw = self
            .date
            .as_deref()
            .ok_or(FrontMatterError::MissingField("date"))?;
        parse_date_string(raw).ok_or_else(|| FrontMatterError::InvalidDate(raw.to_string()))
    }
}

/// Parse an ISO-8601 date or datetime; naive values are taken as UTC
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let utc = |naive: NaiveDateTime| naive.and_utc().fixed_offset();

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(utc(dt));
        }
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: 'A first post'
date: '2021-06-01T05:35:07.322Z'
author:
  name: Jane Doe
  picture: /assets/authors/jane.png
coverImage: /assets/hello/cover.jpg
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.description, Some("A first post".to_string()));
        assert_eq!(fm.author.unwrap().name, "Jane Doe");
        assert_eq!(fm.cover_image, Some("/assets/hello/cover.jpg".to_string()));
        assert!(fm.og_image.is_none());
        assert_eq!(remaining.trim(), "This is the content.");
    }

    #[test]
    fn test_parse_og_image_override() {
        let content = "---\ntitle: T\nogImage:\n  url: /og.png\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.og_image.unwrap().url, "/og.png");
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Test Post", "date": "2021-01-01"}
;;;

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = "---\ntitle: T\ntags: [rust, web]\nlayout: post\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(remaining.trim(), "body");
    }

    #[test]
    fn test_missing_and_unterminated() {
        assert!(matches!(
            FrontMatter::parse("# Just markdown"),
            Err(FrontMatterError::Missing)
        ));
        assert!(matches!(
            FrontMatter::parse("---\ntitle: Open\n\nbody"),
            Err(FrontMatterError::Unterminated)
        ));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_author_requires_picture() {
        let content = "---\ntitle: T\nauthor:\n  name: Jane\n---\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(FrontMatter::required(Some("  ".to_string()), "title").is_err());
        assert_eq!(
            FrontMatter::required(Some("T".to_string()), "title").unwrap(),
            "T"
        );
    }

    #[test]
    fn test_parse_date_formats() {
        let date_only = parse_date_string("2021-06-01").unwrap();
        assert_eq!(date_only.format("%Y-%m-%d %H:%M").to_string(), "2021-06-01 00:00");

        let zulu = parse_date_string("2020-03-16T05:35:07.322Z").unwrap();
        assert_eq!(zulu.format("%Y-%m-%d").to_string(), "2020-03-16");

        let offset = parse_date_string("2021-01-01T09:00:00+09:00").unwrap();
        assert_eq!(offset, parse_date_string("2021-01-01T00:00:00Z").unwrap());

        assert!(parse_date_string("2024-01-15 10:30:00").is_some());
        assert!(parse_date_string("yesterday").is_none());
    }

    #[test]
    fn test_parse_date_invalid() {
        let fm = FrontMatter {
            date: Some("June 1st".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            fm.parse_date(),
            Err(FrontMatterError::InvalidDate(_))
        ));
    }
}
