use crate::domain::model::ObjectId;
use crate::domain::ports::SuiApi;
use crate::utils::error::{Result, ScriptError};
use serde::Serialize;
use serde_json::Value;

/// One child of a dynamic-field collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicFieldEntry {
    #[serde(serialize_with = "as_hex")]
    pub object_id: ObjectId,
    pub name: Value,
    pub fields: Value,
}

// JSON output shows ids the way explorers do, not as byte arrays.
fn as_hex<S>(id: &ObjectId, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(id)
}

/// Reads the `UID` of the collection stored under `field_name` in a Move
/// object's content: `fields[field_name].fields.id.id`.
pub fn collection_id(content_fields: &Value, field_name: &str) -> Result<ObjectId> {
    let raw = content_fields
        .get(field_name)
        .and_then(|f| f.get("fields"))
        .and_then(|f| f.get("id"))
        .and_then(|id| id.get("id"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScriptError::FieldNotFound {
            field: field_name.to_string(),
        })?;

    raw.parse::<ObjectId>()
        .map_err(|e| ScriptError::response(format!("{} id '{}': {}", field_name, raw, e)))
}

/// Lists every dynamic field under `collection`, following page cursors.
pub async fn list_dynamic_fields<A: SuiApi + ?Sized>(
    api: &A,
    collection: &ObjectId,
) -> Result<Vec<(ObjectId, Value)>> {
    let mut children = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = api
            .get_dynamic_fields(collection, cursor.as_deref(), None)
            .await?;
        tracing::debug!(
            "Dynamic fields page under {}: {} entries",
            collection,
            page.data.len()
        );
        for info in page.data {
            let object_id = info
                .object_id
                .parse::<ObjectId>()
                .map_err(|e| ScriptError::response(e.to_string()))?;
            children.push((object_id, info.name));
        }
        match page.next_cursor {
            Some(next) if page.has_next_page => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(ScriptError::response(format!(
                        "dynamic fields cursor {} did not advance under {}",
                        next, collection
                    )));
                }
                cursor = Some(next);
            }
            _ => break,
        }
    }
    Ok(children)
}

/// Fetches `parent`, locates the collection under `field_name` and returns
/// the `value.fields` of each child, in the order the node lists them.
pub async fn fetch_dynamic_field_values<A: SuiApi + ?Sized>(
    api: &A,
    parent: &ObjectId,
    field_name: &str,
) -> Result<Vec<DynamicFieldEntry>> {
    let parent_data = api.get_object(parent).await?.into_data(parent)?;
    let collection = parent_data
        .fields()
        .ok_or_else(|| ScriptError::FieldNotFound {
            field: field_name.to_string(),
        })
        .and_then(|fields| collection_id(fields, field_name))?;
    tracing::debug!("{} of {} lives at {}", field_name, parent, collection);

    let children = list_dynamic_fields(api, &collection).await?;

    let mut entries = Vec::with_capacity(children.len());
    for (object_id, name) in children {
        let child = api.get_object(&object_id).await?.into_data(&object_id)?;
        let fields = child
            .fields()
            .and_then(|f| f.get("value"))
            .and_then(|v| v.get("fields"))
            .cloned()
            .ok_or_else(|| ScriptError::FieldNotFound {
                field: format!("value of dynamic field {}", object_id),
            })?;
        entries.push(DynamicFieldEntry {
            object_id,
            name,
            fields,
        });
    }

    tracing::info!("Fetched {} entries from {}", entries.len(), field_name);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{self, MockSuiApi};
    use serde_json::json;

    fn game_with_table(game: ObjectId, table: ObjectId) -> Value {
        testing::shared_object(
            game,
            3,
            json!({
                "id": {"id": game.to_string()},
                "user_datas": {
                    "type": "0x2::table::Table<address, 0x1::moveark::UserData>",
                    "fields": {"id": {"id": table.to_string()}, "size": "2"}
                }
            }),
        )
    }

    fn user_entry(child: ObjectId, owner: &str, staked: &str) -> Value {
        testing::owned_object(
            child,
            4,
            json!({
                "id": {"id": child.to_string()},
                "name": owner,
                "value": {
                    "type": "0x1::moveark::UserData",
                    "fields": {"owner": owner, "staked": staked}
                }
            }),
        )
    }

    fn field_info(child: ObjectId, owner: &str) -> Value {
        json!({
            "name": {"type": "address", "value": owner},
            "objectId": child.to_string(),
            "objectType": "0x2::dynamic_field::Field<address, 0x1::moveark::UserData>",
            "version": "4",
            "digest": testing::digest(4)
        })
    }

    #[test]
    fn test_collection_id_extracts_nested_uid() {
        let table = testing::id(0x21);
        let fields = json!({"user_datas": {"fields": {"id": {"id": table.to_string()}}}});
        assert_eq!(collection_id(&fields, "user_datas").unwrap(), table);
    }

    #[test]
    fn test_collection_id_missing_field() {
        let fields = json!({"other": {}});
        let err = collection_id(&fields, "user_datas").unwrap_err();
        assert_eq!(err.to_string(), "user_datas not found");
    }

    #[tokio::test]
    async fn test_fetches_children_in_listed_order() {
        let game = testing::id(0x10);
        let table = testing::id(0x20);
        let (alice, bob) = (testing::id(0x31), testing::id(0x32));

        let mut api = MockSuiApi::new()
            .with_object(game, game_with_table(game, table))
            .with_object(alice, user_entry(alice, "0xa11ce", "100"))
            .with_object(bob, user_entry(bob, "0xb0b", "250"));
        api.dynamic_fields.insert(
            table,
            vec![vec![field_info(bob, "0xb0b")], vec![field_info(alice, "0xa11ce")]],
        );

        let entries = fetch_dynamic_field_values(&api, &game, "user_datas")
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].object_id, bob);
        assert_eq!(entries[0].fields["staked"], "250");
        assert_eq!(entries[1].fields["owner"], "0xa11ce");
        assert_eq!(entries[1].name["value"], "0xa11ce");

        let calls = api.recorded_calls().await;
        let page_calls = calls
            .iter()
            .filter(|c| c.starts_with("get_dynamic_fields"))
            .count();
        assert_eq!(page_calls, 2);
    }

    #[tokio::test]
    async fn test_missing_field_raises() {
        let game = testing::id(0x10);
        let api = MockSuiApi::new().with_object(
            game,
            testing::shared_object(game, 3, json!({"id": {"id": game.to_string()}})),
        );

        let err = fetch_dynamic_field_values(&api, &game, "user_datas")
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::FieldNotFound { .. }));
        assert_eq!(err.to_string(), "user_datas not found");
    }

    #[tokio::test]
    async fn test_child_without_value_raises() {
        let game = testing::id(0x10);
        let table = testing::id(0x20);
        let child = testing::id(0x31);

        let mut api = MockSuiApi::new()
            .with_object(game, game_with_table(game, table))
            .with_object(child, testing::owned_object(child, 4, json!({"name": "0x1"})));
        api.dynamic_fields
            .insert(table, vec![vec![field_info(child, "0x1")]]);

        let err = fetch_dynamic_field_values(&api, &game, "user_datas")
            .await
            .unwrap_err();
        assert!(matches!(err, ScriptError::FieldNotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let game = testing::id(0x10);
        let table = testing::id(0x20);
        let api = MockSuiApi::new().with_object(game, game_with_table(game, table));

        let entries = fetch_dynamic_field_values(&api, &game, "user_datas")
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_cursor_stops_paging() {
        let table = testing::id(0x20);
        let mut api = MockSuiApi::new();
        api.stalled_cursor = true;

        let err = list_dynamic_fields(&api, &table).await.unwrap_err();
        assert!(matches!(err, ScriptError::ResponseError { .. }));
        assert!(err.to_string().contains("did not advance"));

        let page_calls = api
            .recorded_calls()
            .await
            .into_iter()
            .filter(|c| c.starts_with("get_dynamic_fields"))
            .count();
        assert_eq!(page_calls, 2);
    }
}
