use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` as the type's default value.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<i64>,
    }

    #[test]
    fn null_becomes_default() {
        let record: Record = serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();
        assert!(record.name.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn present_values_pass_through() {
        let record: Record = serde_json::from_str(r#"{"name": "x", "tags": [1]}"#).unwrap();
        assert_eq!(record.name, "x");
        assert_eq!(record.tags, vec![1]);
    }
}
