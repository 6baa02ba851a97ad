//! Post model and explicit field selection

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Post author, embedded by value in every post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub picture: String,
}

/// Open Graph image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgImage {
    pub url: String,
}

/// A fully loaded blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// Slug (file name without extension)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary shown on index pages
    pub description: String,

    /// Publication date exactly as written in the front-matter
    pub date: String,

    /// Parsed publication date, used for ordering
    pub published: DateTime<FixedOffset>,

    pub author: Author,

    /// Cover image path
    pub cover_image: String,

    /// Repository-relative source path
    pub path: String,

    pub og_image: OgImage,

    /// Raw markdown body
    pub content: String,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    /// Copy exactly the requested fields into a partial record
    pub fn select(&self, fields: FieldSet) -> PartialPost {
        let pick = |field: Field, value: &String| fields.contains(field).then(|| value.clone());

        PartialPost {
            slug: pick(Field::Slug, &self.slug),
            title: pick(Field::Title, &self.title),
            description: pick(Field::Description, &self.description),
            date: pick(Field::Date, &self.date),
            author: fields
                .contains(Field::Author)
                .then(|| self.author.clone()),
            path: pick(Field::Path, &self.path),
            cover_image: pick(Field::CoverImage, &self.cover_image),
            og_image: fields
                .contains(Field::OgImage)
                .then(|| self.og_image.clone()),
            content: pick(Field::Content, &self.content),
        }
    }
}

/// A selectable post field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Slug,
    Title,
    Description,
    Date,
    Author,
    Path,
    CoverImage,
    OgImage,
    Content,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Slug,
        Field::Title,
        Field::Description,
        Field::Date,
        Field::Author,
        Field::Path,
        Field::CoverImage,
        Field::OgImage,
        Field::Content,
    ];

    /// Key used in front-matter and in serialized props
    pub fn key(self) -> &'static str {
        match self {
            Field::Slug => "slug",
            Field::Title => "title",
            Field::Description => "description",
            Field::Date => "date",
            Field::Author => "author",
            Field::Path => "path",
            Field::CoverImage => "coverImage",
            Field::OgImage => "ogImage",
            Field::Content => "content",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown post field `{}`", s))
    }
}

/// A set of fields requested from the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet(u16);

impl FieldSet {
    pub const EMPTY: FieldSet = FieldSet(0);

    /// Just enough to enumerate routes
    pub const SLUG: FieldSet = FieldSet::of(&[Field::Slug]);

    /// What index pages and preview cards need; no body
    pub const PREVIEW: FieldSet = FieldSet::of(&[
        Field::Slug,
        Field::Title,
        Field::Description,
        Field::Date,
        Field::Author,
        Field::CoverImage,
    ]);

    pub const FULL: FieldSet = FieldSet::of(&Field::ALL);

    pub const fn of(fields: &[Field]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < fields.len() {
            bits |= fields[i].bit();
            i += 1;
        }
        FieldSet(bits)
    }

    pub const fn with(self, field: Field) -> Self {
        FieldSet(self.0 | field.bit())
    }

    pub const fn without(self, field: Field) -> Self {
        FieldSet(self.0 & !field.bit())
    }

    pub const fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        iter.into_iter().fold(FieldSet::EMPTY, FieldSet::with)
    }
}

impl FromStr for FieldSet {
    type Err = String;

    /// Parse a comma-separated list of keys, e.g. `slug,title,coverImage`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Field::from_str)
            .collect()
    }
}

/// A post with only the requested fields populated
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PartialPost {
    /// The set of fields that are populated
    pub fn fields(&self) -> FieldSet {
        let present = [
            (Field::Slug, self.slug.is_some()),
            (Field::Title, self.title.is_some()),
            (Field::Description, self.description.is_some()),
            (Field::Date, self.date.is_some()),
            (Field::Author, self.author.is_some()),
            (Field::Path, self.path.is_some()),
            (Field::CoverImage, self.cover_image.is_some()),
            (Field::OgImage, self.og_image.is_some()),
            (Field::Content, self.content.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(field, set)| set.then_some(field))
            .collect()
    }
}
