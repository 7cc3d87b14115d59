use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::store::Thread;

/// Body shared by thread creation and update. `price` arrives as raw JSON so
/// a numeric string coerces the way the source API did; `user_id` is only
/// meaningful (and required) on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRequest {
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub base64_banner: Option<String>,
    pub desc: Option<String>,
    pub price: Option<Value>,
    pub user_id: Option<String>,
}

/// Coerces a JSON number or numeric string into a finite price.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

/// Wire projection of a thread record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadView {
    pub id: Uuid,
    pub title: String,
    pub sub_title: String,
    pub base64_banner: String,
    pub desc: String,
    pub price: f64,
    pub user_id: Uuid,
}

impl From<Thread> for ThreadView {
    fn from(t: Thread) -> Self {
        Self {
            id: t.id,
            title: t.title,
            sub_title: t.sub_title,
            base64_banner: t.banner_image,
            desc: t.description,
            price: t.price,
            user_id: t.owner_user_id,
        }
    }
}

/// Envelope for `/thread/all`: stamped with the response instant in unix
/// milliseconds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllThreadsResponse {
    pub updated_at: i64,
    pub threads: Vec<ThreadView>,
    pub length: usize,
}

/// Envelope for `/thread/user`. The source stamped this one `iat` instead of
/// `updatedAt`; preserved as-is.
#[derive(Debug, Serialize)]
pub struct UserThreadsResponse {
    pub iat: i64,
    pub threads: Vec<ThreadView>,
    pub length: usize,
}
