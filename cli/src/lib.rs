//! The demo sequence run by `crudapi-demo`.
//!
//! Exercises every verb once against a live API: probe, create a post and a
//! user, list and fetch the post, then rename and delete the user.

use crudapi_core::{ApiError, ApiResponse, CrudClient, Transport};
use serde_json::{json, Value};

/// One labelled result of the demo sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: &'static str,
    pub result: Value,
}

impl Step {
    fn new(label: &'static str, response: ApiResponse) -> Self {
        Self {
            label,
            result: response.into_json(),
        }
    }

    fn skipped(label: &'static str) -> Self {
        Self {
            label,
            result: Value::Null,
        }
    }
}

/// `_uuid` of the first item in a bulk-create response, if any.
pub fn first_uuid(response: &Value) -> Option<String> {
    response["items"][0]["_uuid"].as_str().map(str::to_string)
}

/// Run the demo against `client`, stopping at the first failure.
///
/// The update and delete steps only run when creating the user returned an
/// item; otherwise they are reported as `null`.
pub fn run_demo<T: Transport>(client: &CrudClient<T>) -> Result<Vec<Step>, ApiError> {
    let mut steps = Vec::with_capacity(7);

    let probe = client.list("probe", None)?;
    steps.push(Step::new("GET probe", probe));

    let saved = client.create("posts", &json!({ "title": "My first post" }))?.into_json();
    let post_id = first_uuid(&saved);
    steps.push(Step { label: "POST posts", result: saved });

    let created = client.create("users", &json!({ "name": "Juan Doe" }))?.into_json();
    let user_id = first_uuid(&created);
    steps.push(Step { label: "POST users", result: created });

    let posts = client.list("posts", None)?;
    steps.push(Step::new("GET posts", posts));

    let by_id = client.list("posts", post_id.as_deref())?;
    steps.push(Step::new("GET posts/{id}", by_id));

    match user_id {
        Some(id) => {
            let edited = client.update("users", &id, &json!({ "name": "John Doe" }))?;
            steps.push(Step::new("PUT users/{id}", edited));
            let deleted = client.remove("users", &id)?;
            steps.push(Step::new("DELETE users/{id}", deleted));
        }
        None => {
            steps.push(Step::skipped("PUT users/{id}"));
            steps.push(Step::skipped("DELETE users/{id}"));
        }
    }

    Ok(steps)
}
