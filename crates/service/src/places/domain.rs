use serde::{Deserialize, Deserializer};

pub use models::place::Model as Place;

/// Body of add/update requests. All four fields are written together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "coordinate")]
    pub lng: f64,
}

/// Accepts a JSON number or a numeric string. Map forms post coordinates as text.
pub fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let a: PlaceInput = serde_json::from_str(r#"{"name":"A","description":"d","lat":51.507351,"lng":"-0.127758"}"#).unwrap();
        assert_eq!(a.lat, 51.507351);
        assert_eq!(a.lng, -0.127758);

        let b: PlaceInput = serde_json::from_str(r#"{"name":"B","lat":" 12.5 ","lng":"3"}"#).unwrap();
        assert_eq!(b.description, "");
        assert_eq!(b.lat, 12.5);
        assert_eq!(b.lng, 3.0);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let err = serde_json::from_str::<PlaceInput>(r#"{"name":"A","lat":"north","lng":"1"}"#).unwrap_err();
        assert!(err.to_string().contains("not a number") || err.is_data());
        assert!(serde_json::from_str::<PlaceInput>(r#"{"name":"A","lat":"","lng":"1"}"#).is_err());
    }
}
