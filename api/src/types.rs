//! Wire types for the shopping-list service.
//!
//! Fields are camelCase on the wire and snake_case here. Quantities travel
//! as strings, timestamps as RFC 3339. The member id is spelled
//! `groupMemberShipId` by the service; that spelling is part of the
//! contract and is preserved exactly.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login response. The token is opaque and lives until logout; there is no
/// refresh or expiry protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub xtoken: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub shopping_list_id: i64,
    pub shopping_list_name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Group backing the list; membership ops hang off `group_id`.
    #[serde(default)]
    pub user_group: Option<UserGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub group_id: i64,
}

/// Request body for creating a list; PATCH uses the same shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPayload {
    pub shopping_list_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub shopping_list_product_id: i64,
    pub product_name: String,
    /// Free-form on the wire ("2", "1.5", "a few").
    pub quantity: String,
    pub unit: String,
    pub purchase: bool,
}

/// Request body for creating a product under a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub shopping_list: ListRef,
    pub product_name: String,
    pub quantity: String,
    pub unit: String,
    pub purchase: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRef {
    pub shopping_list_id: i64,
}

/// No password field on purpose: the client never holds password-derived
/// material for a stored profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    /// Service spelling: `groupMemberShipId`.
    pub group_member_ship_id: i64,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopping_list_parses_service_payload() {
        let raw = r#"{
            "shoppingListId": 1,
            "shoppingListName": "Groceries",
            "description": "weekly run",
            "createdAt": "2024-03-01T10:15:00Z",
            "userGroup": { "groupId": 4, "extraField": true }
        }"#;

        let list: ShoppingList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.shopping_list_id, 1);
        assert_eq!(list.shopping_list_name, "Groceries");
        assert_eq!(list.user_group.as_ref().unwrap().group_id, 4);
    }

    #[test]
    fn shopping_list_tolerates_missing_optional_fields() {
        let raw = r#"{
            "shoppingListId": 2,
            "shoppingListName": "Hardware",
            "createdAt": "2024-03-02T08:00:00Z"
        }"#;

        let list: ShoppingList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.description, "");
        assert!(list.user_group.is_none());
    }

    #[test]
    fn member_id_keeps_service_spelling() {
        let member = GroupMember {
            group_member_ship_id: 9,
            user: UserProfile {
                user_id: 3,
                user_name: "ana".into(),
                email: "ana@example.com".into(),
                phone_number: None,
            },
        };

        let raw = serde_json::to_value(&member).unwrap();
        assert!(raw.get("groupMemberShipId").is_some());
    }
}
