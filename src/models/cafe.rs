use serde_json::{Map, Value};

use crate::domain::CafeId;

/// A stored cafe record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cafe {
    pub id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// A cafe that has not been persisted yet, so it has no id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl Cafe {
    /// Column names in declaration order. Matches the key order of [`Cafe::to_map`].
    pub const FIELDS: [&'static str; 11] = [
        "id",
        "name",
        "map_url",
        "img_url",
        "location",
        "seats",
        "has_toilet",
        "has_wifi",
        "has_sockets",
        "can_take_calls",
        "coffee_price",
    ];

    #[must_use]
    pub const fn cafe_id(&self) -> CafeId {
        CafeId::new(self.id)
    }

    /// Converts the record into a field-name to value mapping covering every
    /// column. `coffee_price` maps to `null` when unset.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(Self::FIELDS.len());
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("name".to_string(), Value::from(self.name.clone()));
        map.insert("map_url".to_string(), Value::from(self.map_url.clone()));
        map.insert("img_url".to_string(), Value::from(self.img_url.clone()));
        map.insert("location".to_string(), Value::from(self.location.clone()));
        map.insert("seats".to_string(), Value::from(self.seats.clone()));
        map.insert("has_toilet".to_string(), Value::from(self.has_toilet));
        map.insert("has_wifi".to_string(), Value::from(self.has_wifi));
        map.insert("has_sockets".to_string(), Value::from(self.has_sockets));
        map.insert(
            "can_take_calls".to_string(),
            Value::from(self.can_take_calls),
        );
        map.insert(
            "coffee_price".to_string(),
            self.coffee_price.clone().map_or(Value::Null, Value::from),
        );
        map
    }
}
