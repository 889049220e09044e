//! Typed surface over the service's REST endpoints. Every call funnels
//! through the dispatcher; no method here touches headers or retries.
use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use crate::dispatcher::{Auth, Dispatcher, TokenProvider};
use crate::error::ApiError;
use crate::types::{
    AuthPayload, GroupMember, ListPayload, NewAccount, NewProduct, Notification, Product,
    ShoppingList, UserProfile,
};

pub struct ApiClient<P> {
    dispatcher: Dispatcher<P>,
}

impl<P: TokenProvider> ApiClient<P> {
    pub fn new(base_url: &str, tokens: Arc<P>) -> Result<Self, ApiError> {
        Ok(Self {
            dispatcher: Dispatcher::new(base_url, tokens)?,
        })
    }

    // ---- Account ----

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = json!({ "email": email, "password": password });
        let resp = self
            .dispatcher
            .send_json(Method::POST, "/user/login", &body, Auth::Anonymous)
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn create_account(&self, account: &NewAccount) -> Result<UserProfile, ApiError> {
        let resp = self
            .dispatcher
            .send_json(Method::POST, "/user", account, Auth::Anonymous)
            .await?;
        Ok(resp.json().await?)
    }

    /// Profile of the user the current token belongs to.
    pub async fn logged_user(&self) -> Result<UserProfile, ApiError> {
        let resp = self
            .dispatcher
            .send(Method::GET, "/user/logged", Auth::Required)
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn all_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        let resp = self
            .dispatcher
            .send(Method::GET, "/user", Auth::Required)
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn update_password(&self, user_id: i64, password: &str) -> Result<(), ApiError> {
        let body = json!({ "password": password });
        self.dispatcher
            .send_json(
                Method::PATCH,
                &format!("/user/id/{user_id}"),
                &body,
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    // ---- Shopping lists ----

    /// Full list set for the logged-in user, the snapshot source.
    pub async fn lists_all(&self) -> Result<Vec<ShoppingList>, ApiError> {
        let resp = self
            .dispatcher
            .send(Method::GET, "/shoppingList/user/all", Auth::Required)
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn list_by_id(&self, id: i64) -> Result<ShoppingList, ApiError> {
        let resp = self
            .dispatcher
            .send(Method::GET, &format!("/shoppingList/id/{id}"), Auth::Required)
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn create_list(&self, list: &ListPayload) -> Result<(), ApiError> {
        self.dispatcher
            .send_json(Method::POST, "/shoppingList", list, Auth::Required)
            .await?;
        Ok(())
    }

    pub async fn update_list(&self, id: i64, list: &ListPayload) -> Result<(), ApiError> {
        self.dispatcher
            .send_json(
                Method::PATCH,
                &format!("/shoppingList/id/{id}"),
                list,
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    pub async fn delete_list(&self, id: i64) -> Result<(), ApiError> {
        self.dispatcher
            .send(
                Method::DELETE,
                &format!("/shoppingList/id/{id}"),
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    // ---- Products ----

    pub async fn products_for_list(&self, list_id: i64) -> Result<Vec<Product>, ApiError> {
        let resp = self
            .dispatcher
            .send(
                Method::GET,
                &format!("/shoppingList/product/shoppingListId/{list_id}"),
                Auth::Required,
            )
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let resp = self
            .dispatcher
            .send_json(Method::POST, "/shoppingList/product", product, Auth::Required)
            .await?;
        Ok(resp.json().await?)
    }

    /// Sends the whole product, id included, as the service expects.
    pub async fn update_product(&self, product: &Product) -> Result<(), ApiError> {
        self.dispatcher
            .send_json(
                Method::PATCH,
                &format!(
                    "/shoppingList/product/id/{}",
                    product.shopping_list_product_id
                ),
                product,
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        self.dispatcher
            .send(
                Method::DELETE,
                &format!("/shoppingList/product/id/{product_id}"),
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    // ---- Group members ----

    pub async fn members_for_group(&self, group_id: i64) -> Result<Vec<GroupMember>, ApiError> {
        let resp = self
            .dispatcher
            .send(
                Method::GET,
                &format!("/group/member/groupId/{group_id}"),
                Auth::Required,
            )
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn add_member(&self, group_id: i64, user_id: i64) -> Result<(), ApiError> {
        let body = json!({
            "userGroup": { "groupId": group_id },
            "user": { "userId": user_id },
        });
        self.dispatcher
            .send_json(Method::POST, "/group/member", &body, Auth::Required)
            .await?;
        Ok(())
    }

    pub async fn remove_member(&self, membership_id: i64) -> Result<(), ApiError> {
        self.dispatcher
            .send(
                Method::DELETE,
                &format!("/group/member/id/{membership_id}"),
                Auth::Required,
            )
            .await?;
        Ok(())
    }

    // ---- Notifications ----

    /// Oldest-first, exactly as the service returns them.
    pub async fn notifications_for_user(&self, user_id: i64) -> Result<Vec<Notification>, ApiError> {
        let resp = self
            .dispatcher
            .send(
                Method::GET,
                &format!("/notification/user/{user_id}"),
                Auth::Required,
            )
            .await?;
        Ok(resp.json().await?)
    }
}
