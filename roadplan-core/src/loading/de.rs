use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::Error;

pub(crate) fn read_json_file<T>(path: &Path) -> Result<T, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// OSM exports store `highway` either as a single tag or as a list of tags
/// for merged ways; the first tag wins.
pub(crate) fn deserialize_highway<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(value.and_then(|tag| match tag {
        OneOrMany::One(tag) => Some(tag),
        OneOrMany::Many(tags) => tags.into_iter().next(),
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
    Other(Value),
}

/// Accepts any JSON value and keeps its textual form, so parsing (and its
/// failure) can be handled by the caller. Null reads as absent.
pub(crate) fn deserialize_lenient_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Lenient>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        Lenient::Number(number) => number.to_string(),
        Lenient::Text(text) => text,
        Lenient::Other(other) => other.to_string(),
    }))
}

/// Reads an optional field whose malformed value should not reject the
/// surrounding document. A value of the wrong shape is logged and read as
/// absent.
pub(crate) fn deserialize_or_ignore<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match T::deserialize(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!("Ignoring malformed field: {e}");
            Ok(None)
        }
    }
}
