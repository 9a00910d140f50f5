use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Render a YAML scalar as text.
///
/// Integers and booleans keep their source text. Floats are rendered from
/// their value, so `1.10` reads back as `1.1`; fields where that matters go
/// through [`version_text`] instead.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Truthiness for default values: `false`, `0`, `""` and null
/// mean "no default".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(tagged) => is_falsy(&tagged.value),
    }
}

/// Text of a version scalar.
///
/// Strings and integers are taken as written. An unquoted dotted number such
/// as `2.10` has already become the float `2.1` and is rejected.
pub fn version_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) if number.is_u64() || number.is_i64() => Ok(number.to_string()),
        Value::Number(number) => Err(format!(
            "version {number} must be quoted (write '{number}' as a string) so trailing zeros are kept"
        )),
        Value::Tagged(tagged) => version_text(&tagged.value),
        _ => Err("expected a version string".to_string()),
    }
}

pub fn de_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    version_text(&value).map_err(serde::de::Error::custom)
}

pub fn de_opt_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    version_text(&value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

pub fn de_scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    values
        .iter()
        .map(|value| {
            scalar_to_string(value)
                .ok_or_else(|| serde::de::Error::custom("list entries must be scalars"))
        })
        .collect()
}

/// Deserialize a default value, dropping falsy scalars.
pub fn de_default_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    Ok(scalar_to_string(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_keep_their_text() {
        let value: Value = serde_yaml::from_str("2.5").unwrap();
        assert_eq!(scalar_to_string(&value).as_deref(), Some("2.5"));
        let value: Value = serde_yaml::from_str("3").unwrap();
        assert_eq!(scalar_to_string(&value).as_deref(), Some("3"));
        let value: Value = serde_yaml::from_str("[1, 2]").unwrap();
        assert_eq!(scalar_to_string(&value), None);
    }

    #[test]
    fn versions_keep_their_text_or_must_be_quoted() {
        let value: Value = serde_yaml::from_str("'2.10'").unwrap();
        assert_eq!(version_text(&value).as_deref(), Ok("2.10"));
        let value: Value = serde_yaml::from_str("3").unwrap();
        assert_eq!(version_text(&value).as_deref(), Ok("3"));
        let value: Value = serde_yaml::from_str("2.10").unwrap();
        let err = version_text(&value).unwrap_err();
        assert!(err.contains("must be quoted"), "{err}");
    }

    #[test]
    fn falsy_defaults() {
        for text in ["false", "0", "''", "~"] {
            let value: Value = serde_yaml::from_str(text).unwrap();
            assert!(is_falsy(&value), "{text} should be falsy");
        }
        let value: Value = serde_yaml::from_str("westus").unwrap();
        assert!(!is_falsy(&value));
    }
}
