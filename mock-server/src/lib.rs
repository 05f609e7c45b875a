use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct FindPerson {
    pub email: Option<String>,
}

pub type Db = Arc<HashMap<String, Person>>;

/// People known to the mock, keyed by email.
pub fn seed() -> Db {
    let people = [("alex@clearbit.com", "Alex MacCaw"), ("harlow@clearbit.com", "Harlow Ward")];
    Arc::new(
        people
            .into_iter()
            .map(|(email, name)| {
                let person = Person {
                    id: Uuid::new_v4(),
                    email: email.to_string(),
                    name: name.to_string(),
                };
                (person.email.clone(), person)
            })
            .collect(),
    )
}

pub fn app() -> Router {
    Router::new()
        .route("/v2/people/find", get(find_person))
        .route("/v1/quota", get(quota))
        .route("/v1/broken", get(broken))
        .with_state(seed())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Unknown people come back as an array of errors, bad input as a single
/// wrapped error, matching the two shapes the real API uses.
async fn find_person(State(db): State<Db>, Query(query): Query<FindPerson>) -> Response {
    let email = match query.email {
        Some(email) if email.contains('@') => email,
        other => {
            tracing::debug!(email = ?other, "rejecting lookup");
            let body = json!({"error": {"type": "invalid_email", "message": "Email is invalid"}});
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };

    match db.get(&email) {
        Some(person) => Json(person.clone()).into_response(),
        None => {
            tracing::debug!(%email, "person not found");
            let body = json!([{"type": "not_found", "message": "Person not found"}]);
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

async fn quota() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::PAYMENT_REQUIRED, Json(json!([])))
}

async fn broken() -> (StatusCode, Json<&'static str>) {
    tracing::warn!("serving unrecognized error body");
    (StatusCode::INTERNAL_SERVER_ERROR, Json("unexpected"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_keyed_by_email() {
        let db = seed();
        assert_eq!(db.len(), 2);
        assert_eq!(db["alex@clearbit.com"].name, "Alex MacCaw");
    }

    #[test]
    fn person_serializes_to_json() {
        let person = Person {
            id: Uuid::nil(),
            email: "alex@clearbit.com".to_string(),
            name: "Alex MacCaw".to_string(),
        };
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["email"], "alex@clearbit.com");
    }

    #[test]
    fn find_person_email_is_optional() {
        let query: FindPerson = serde_json::from_str("{}").unwrap();
        assert!(query.email.is_none());
    }
}
