use serde_json::{json, Value};

use crate::domain::model::search::SearchRequest;

pub const HIGHLIGHT_PRE_TAG: &str = "<em>";
pub const HIGHLIGHT_POST_TAG: &str = "</em>";

/// Builds the search body of a full text listing.
pub fn build_search_query(request: &SearchRequest) -> Value {
    let keyword = request.keyword();

    let mut query = json!({
        "query": build_string_query(keyword),
        "from": request.offset(),
        "size": request.size(),
    });

    if let Some((field, order)) = request.sort_mode().sort_key() {
        query["sort"] = json!([{ field: { "order": order } }]);
    }

    if keyword.is_some() {
        query["highlight"] = build_highlight();
    }

    query
}

fn build_string_query(keyword: Option<&str>) -> Value {
    match keyword {
        Some(keyword) => json!({
            "match": {
                "all": {
                    "query": keyword
                }
            }
        }),
        None => json!({ "match_all": {} }),
    }
}

fn build_highlight() -> Value {
    json!({
        "fields": {
            "name": {
                "require_field_match": false
            }
        },
        "pre_tags": [HIGHLIGHT_PRE_TAG],
        "post_tags": [HIGHLIGHT_POST_TAG]
    })
}
