use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt {
    Number(i64),
    Text(String),
}

impl RawInt {
    fn parse<E: de::Error>(self, what: &str) -> Result<i64, E> {
        match self {
            RawInt::Number(n) => Ok(n),
            RawInt::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid {} '{}'", what, s))),
        }
    }
}

/// Ids arrive as JSON numbers from some endpoints and numeric strings from others
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawInt::deserialize(deserializer)?.parse("id")
}

pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawInt>::deserialize(deserializer)?
        .map(|raw| raw.parse("id"))
        .transpose()
}

/// Aggregate counts; `COUNT(*)` comes back as a string from some database drivers
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawInt::deserialize(deserializer)?.parse("count")
}
