use serde::{Deserialize, Deserializer};

pub const FIRST_PAGE: i64 = 1;

fn first_page() -> i64 {
    FIRST_PAGE
}

// whatever ends up in the address bar is accepted, anything that is not an integer means the
// first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().parse().unwrap_or(FIRST_PAGE))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}
