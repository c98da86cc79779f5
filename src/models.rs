use serde::{Deserialize, Deserializer};
use std::fmt;

/// Metadata describing a meme as returned by the metadata API.
///
/// Fields that are missing or `null` in the response keep their zero value.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MemeMetadata {
    #[serde(rename = "postLink", deserialize_with = "null_as_default")]
    pub post_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subreddit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "url", deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(rename = "nsfw", deserialize_with = "null_as_default")]
    pub is_nsfw: bool,
    #[serde(rename = "spoiler", deserialize_with = "null_as_default")]
    pub is_spoiler: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(rename = "ups", deserialize_with = "null_as_default")]
    pub upvote_count: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MemeMetadata {
    /// Last path segment of the image URL, used to name the staged file.
    pub fn image_file_name(&self) -> String {
        let path = match url::Url::parse(&self.image_url) {
            Ok(url) => url.path().to_string(),
            Err(_) => self.image_url.clone(),
        };
        match path.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment.to_string(),
            _ => "meme".to_string(),
        }
    }
}

/// Downloaded image plus the metadata it was found with.
#[derive(Debug, Clone)]
pub struct Meme {
    pub image_bytes: Vec<u8>,
    pub metadata: MemeMetadata,
}

/// Identifier of media uploaded to the publish target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(String);

impl MediaHandle {
    /// Wraps a server-issued id; empty ids are rejected.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the media upload response. Only the id is read.
#[derive(Deserialize, Debug)]
pub struct MediaResponse {
    #[serde(default)]
    pub id: String,
}

/// A status ready to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPost {
    pub text: String,
    pub sensitive: bool,
    pub spoiler_text: String,
}

impl StatusPost {
    pub fn for_meme(metadata: &MemeMetadata) -> Self {
        let text = format!(
            "#meme posted by {} at {}\n\n\"{}\"",
            metadata.author, metadata.post_link, metadata.title
        );
        let spoiler_text = if metadata.is_nsfw { "nsfw".to_string() } else { String::new() };
        Self {
            text,
            sensitive: metadata.is_nsfw,
            spoiler_text,
        }
    }
}
