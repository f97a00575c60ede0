use serde::{Deserialize, Deserializer, Serialize};

/// Serializd catalog id of a show (the TMDB show id).
pub type ShowId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// 1-based, follows the catalog's numbering rather than release order
    pub season_number: u32,
}

/// Missing and `null` both read as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Show metadata as needed by the export: display name plus seasons in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowDetails {
    pub id: ShowId,
    pub name: String,
    pub seasons: Vec<Season>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_season_name_may_be_null_or_missing() {
        let seasons: Vec<Season> = serde_json::from_value(json!([
            {"id": 1, "name": null, "seasonNumber": 1},
            {"id": 2, "seasonNumber": 2},
            {"id": 3, "name": "Specials", "seasonNumber": 0}
        ]))
        .unwrap();

        assert_eq!(seasons[0].name, "");
        assert_eq!(seasons[1].name, "");
        assert_eq!(seasons[2].name, "Specials");
    }
}
