use serde_json::{json, Value};

/// Body of the index creation request.
///
/// `name`, `brand` and `business` are copied into the analyzed `all` field,
/// which is the one queried by the full text listing. `address` and `pic`
/// are stored but not indexed.
pub fn hotel_index_body(analyzer: &str) -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "name": {
                    "type": "text",
                    "analyzer": analyzer,
                    "copy_to": "all"
                },
                "address": { "type": "keyword", "index": false },
                "price": { "type": "integer" },
                "score": { "type": "integer" },
                "brand": { "type": "keyword", "copy_to": "all" },
                "city": { "type": "keyword" },
                "starName": { "type": "keyword" },
                "business": { "type": "keyword", "copy_to": "all" },
                "pic": { "type": "keyword", "index": false },
                "location": { "type": "geo_point" },
                "all": { "type": "text", "analyzer": analyzer }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_configured_analyzer() {
        let body = hotel_index_body("ik_max_word");
        let properties = &body["mappings"]["properties"];
        assert_eq!(properties["name"]["analyzer"], "ik_max_word");
        assert_eq!(properties["all"]["analyzer"], "ik_max_word");
        assert_eq!(properties["all"]["type"], "text");
    }

    #[test]
    fn should_copy_searchable_fields_to_all() {
        let body = hotel_index_body("standard");
        let properties = body["mappings"]["properties"].as_object().unwrap();
        let mut copied = properties
            .iter()
            .filter(|(_, property)| property["copy_to"] == "all")
            .map(|(field, _)| field.as_str())
            .collect::<Vec<_>>();
        copied.sort_unstable();
        assert_eq!(copied, vec!["brand", "business", "name"]);
    }

    #[test]
    fn should_not_index_address_and_picture() {
        let body = hotel_index_body("standard");
        let properties = &body["mappings"]["properties"];
        assert_eq!(properties["address"]["index"], false);
        assert_eq!(properties["pic"]["index"], false);
        assert_eq!(properties["location"]["type"], "geo_point");
        assert_eq!(properties["starName"]["type"], "keyword");
    }
}
