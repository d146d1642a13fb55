use scratchinfo::api::ScratchApi;
use scratchinfo::error::LookupError;
use scratchinfo::handlers::{aggregate_profile, resolve_and_aggregate};
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn alice_profile() -> Value {
    json!({
        "id": 42,
        "username": "alice",
        "scratchteam": false,
        "history": {"joined": "2015-04-01T09:00:00.000Z"},
        "profile": {"status": "making games", "bio": "hello", "country": "Japan"}
    })
}

fn alice_projects() -> Value {
    json!([
        {
            "id": 104,
            "title": "Maze",
            "instructions": "arrow keys",
            "description": "a maze",
            "history": {
                "created": "2020-01-01T00:00:00.000Z",
                "modified": "2020-01-03T15:30:00.000Z",
                "shared": "2020-01-02T03:04:05.000Z"
            },
            "stats": {"views": 10, "loves": 2}
        },
        {
            "id": 105,
            "title": "Unshared draft",
            "history": {"created": "2021-01-01T00:00:00.000Z", "shared": null}
        }
    ])
}

async fn mount_json(mock_server: &MockServer, at: &str, status: u16, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_aggregate_profile_success() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/users/alice", 200, alice_profile(), 1).await;
    mount_json(&mock_server, "/users/alice/projects", 200, alice_projects(), 1).await;

    let profile = aggregate_profile(&api, "alice").await.unwrap();

    assert_eq!(profile.resolved_username, "alice");
    assert_eq!(profile.account_profile, alice_profile());
    assert_eq!(profile.projects.len(), 2);

    let maze = &profile.projects[0];
    assert_eq!(maze.published_date, "2020/01/02 12:04");
    assert_eq!(maze.modified_date, "2020/01/04 00:30");
    assert_eq!(maze.project["title"], "Maze");
    assert_eq!(maze.project["stats"]["views"], 10);

    let draft = &profile.projects[1];
    assert_eq!(draft.published_date, "不明");
    assert_eq!(draft.modified_date, "不明");
}

#[tokio::test]
async fn test_enriched_projects_keep_every_original_field() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/users/alice", 200, alice_profile(), 1).await;
    mount_json(&mock_server, "/users/alice/projects", 200, alice_projects(), 1).await;

    let profile = aggregate_profile(&api, "alice").await.unwrap();
    let serialized = serde_json::to_value(&profile).unwrap();

    let originals = alice_projects();
    for (original, enriched) in originals
        .as_array()
        .unwrap()
        .iter()
        .zip(serialized["projects"].as_array().unwrap())
    {
        for (key, value) in original.as_object().unwrap() {
            assert_eq!(&enriched[key], value, "field {key}");
        }
        assert!(enriched["published_date"].is_string());
        assert!(enriched["modified_date"].is_string());
    }
}

#[tokio::test]
async fn test_missing_account_stops_before_project_list() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/users/ghost", 404, json!({"code": "NotFound"}), 1).await;
    mount_json(&mock_server, "/users/ghost/projects", 200, json!([]), 0).await;

    let result = aggregate_profile(&api, "ghost").await;

    assert!(matches!(result, Err(LookupError::UserNotFound)));
}

#[tokio::test]
async fn test_failed_project_list_degrades_to_empty() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/users/alice", 200, alice_profile(), 1).await;
    mount_json(&mock_server, "/users/alice/projects", 500, json!({"code": "Internal"}), 1).await;

    let profile = aggregate_profile(&api, "alice").await.unwrap();

    assert_eq!(profile.resolved_username, "alice");
    assert!(profile.projects.is_empty());
    assert_eq!(profile.account_profile["username"], "alice");
}

#[tokio::test]
async fn test_malformed_account_payload_is_unexpected() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = aggregate_profile(&api, "alice").await;

    assert!(matches!(result, Err(LookupError::Http(_))));
}

#[tokio::test]
async fn test_project_url_end_to_end() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(
        &mock_server,
        "/projects/104",
        200,
        json!({"id": 104, "author": {"username": "alice"}}),
        1,
    )
    .await;
    mount_json(&mock_server, "/users/alice", 200, alice_profile(), 1).await;
    mount_json(&mock_server, "/users/alice/projects", 200, alice_projects(), 1).await;

    let profile = resolve_and_aggregate(&api, "https://scratch.mit.edu/projects/104")
        .await
        .unwrap();

    assert_eq!(profile.resolved_username, "alice");
    assert_eq!(profile.account_profile["profile"]["country"], "Japan");
    assert_eq!(profile.projects.len(), 2);
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    for input in ["", "   ", "\n\t", "ab", "???"] {
        let result = resolve_and_aggregate(&api, input).await;
        assert!(
            matches!(result, Err(LookupError::UsernameRequired)),
            "input {input:?}"
        );
    }
}

#[tokio::test]
async fn test_unresolvable_project_is_username_required() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/projects/7", 404, json!({"code": "NotFound"}), 1).await;

    let result = resolve_and_aggregate(&api, "turbowarp.org/7").await;

    assert!(matches!(result, Err(LookupError::UsernameRequired)));
}

#[tokio::test]
async fn test_null_project_detail_is_username_required() {
    let mock_server = MockServer::start().await;
    let api = ScratchApi::new_with_base_url(mock_server.uri()).unwrap();
    mount_json(&mock_server, "/projects/104", 200, Value::Null, 1).await;

    let result = resolve_and_aggregate(&api, "projects/104").await;

    assert!(matches!(result, Err(LookupError::UsernameRequired)));
}
