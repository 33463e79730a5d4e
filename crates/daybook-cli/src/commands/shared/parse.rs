use chrono::NaiveDate;
use daybook_core::blocks::Direction;
use serde::de::DeserializeOwned;

/// Parse a `snake_case` enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// `YYYY-MM-DD`.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// `KEY=VALUE` where the key parses as `K`. The value may contain `=`.
pub fn parse_assignment<K: std::str::FromStr>(raw: &str, what: &str) -> anyhow::Result<(K, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid {what} '{raw}' (expected KEY=VALUE)"))?;
    let key = key
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid {what} '{raw}': '{key}' is not a valid key"))?;
    Ok((key, value.to_string()))
}

/// `INDEX:up` or `INDEX:down`.
pub fn parse_move(raw: &str) -> anyhow::Result<(usize, Direction)> {
    let (index, direction) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid move '{raw}' (expected INDEX:up or INDEX:down)"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid move '{raw}': '{index}' is not an index"))?;
    let direction = match direction.trim().to_ascii_lowercase().as_str() {
        "up" => Direction::Up,
        "down" => Direction::Down,
        other => anyhow::bail!("invalid move '{raw}': '{other}' is not up or down"),
    };
    Ok((index, direction))
}
