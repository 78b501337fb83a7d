use serde::Deserialize;
use serde::de::Error as DeError;

/// Boolean flag returned by Pushover as `0`/`1`.
///
/// JSON booleans are accepted as well; any non-zero number counts as set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportFlag(bool);

impl TransportFlag {
    pub fn is_set(self) -> bool {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Bool(value) => Ok(Self(value)),
            serde_json::Value::Number(value) => match value.as_i64() {
                Some(value) => Ok(Self(value != 0)),
                None => Err(D::Error::custom("expected integer flag")),
            },
            _ => Err(D::Error::custom(
                "expected flag field to be JSON number or boolean",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::TransportFlag;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        acknowledged: TransportFlag,
    }

    #[test]
    fn accepts_integers_and_booleans() {
        let parsed: Wrapper = serde_json::from_str(r#"{"acknowledged": 1}"#).unwrap();
        assert!(parsed.acknowledged.is_set());
        let parsed: Wrapper = serde_json::from_str(r#"{"acknowledged": 0}"#).unwrap();
        assert!(!parsed.acknowledged.is_set());
        let parsed: Wrapper = serde_json::from_str(r#"{"acknowledged": true}"#).unwrap();
        assert!(parsed.acknowledged.is_set());
    }

    #[test]
    fn rejects_strings() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"acknowledged": "yes"}"#).is_err());
    }
}
