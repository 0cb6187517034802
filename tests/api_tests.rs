// tests/api_tests.rs

use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use travelmate::{config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345"), or None when
/// no test database is configured, in which case the test is skipped.
async fn spawn_app() -> Option<String> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    Some(address)
}

/// Registers a fresh user and logs in. Returns (token, user_id).
async fn register_and_login(address: &str, client: &reqwest::Client) -> (String, i64) {
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password123";

    let response = client
        .post(format!("{}/login/register", address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .post(format!("{}/login/login", address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let user_id = body["data"]["user_info"]["user_id"].as_i64().unwrap();
    (token, user_id)
}

#[tokio::test]
async fn protected_routes_require_token() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/users/getUserInfo/1", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn register_and_login_flow() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    let response = client
        .post(format!("{}/login/register", address))
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Duplicate username is rejected.
    let response = client
        .post(format!("{}/login/register", address))
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    // Wrong password is rejected.
    let response = client
        .post(format!("{}/login/login", address))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .post(format!("{}/login/login", address))
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn dynamic_post_like_and_comment_flow() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token_a, user_a) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token_a));

    // Publish a dynamic post with two images.
    let response = auth(client.post(format!("{}/post/publishDynamicPost", address)))
        .json(&json!({
            "user_id": user_a,
            "content": "hello",
            "image_urls": ["a.png", "b.png"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let post_id = body["data"]["dynamic_post_id"].as_i64().unwrap();

    // Composite read returns the images in association order, no likes yet.
    let response = auth(client.get(format!("{}/post/getDynamicPost/{}", address, post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let post = &body["data"]["post"];
    let urls: Vec<&str> = post["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["image_url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["a.png", "b.png"]);
    assert_eq!(post["like_userIds"].as_array().unwrap().len(), 0);

    // Like toggles on, then off; row count per pair is 0 or 1 throughout.
    for expected in [true, false] {
        let response = auth(client.post(format!("{}/like/likeDynamicPost", address)))
            .json(&json!({ "user_id": user_b, "post_id": post_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["liked"].as_bool().unwrap(), expected);

        let response = auth(client.get(format!(
            "{}/like/getLikeDynamicPostUsers/{}",
            address, post_id
        )))
        .send()
        .await
        .unwrap();
        let body: Value = response.json().await.unwrap();
        let liked_count = body["data"].as_array().unwrap().len();
        assert_eq!(liked_count, if expected { 1 } else { 0 });
    }

    // B comments on A's post.
    let response = auth(client.post(format!("{}/comment/publishDynamicComment", address)))
        .json(&json!({ "user_id": user_b, "post_id": post_id, "content": "nice trip" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.post(format!("{}/comment/getPostDynamicComments", address)))
        .json(&json!({ "post_id": post_id }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let comment_id = body["data"][0]["comment_id"].as_i64().unwrap();

    // Only the author may delete the comment.
    let response = auth(client.post(format!("{}/comment/deleteDynamicComment", address)))
        .json(&json!({ "comment_id": comment_id, "user_id": user_a }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let response = auth(client.post(format!("{}/comment/deleteDynamicComment", address)))
        .json(&json!({ "comment_id": comment_id, "user_id": user_b }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Deleting again: the row is gone.
    let response = auth(client.post(format!("{}/comment/deleteDynamicComment", address)))
        .json(&json!({ "comment_id": comment_id, "user_id": user_b }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn join_team_is_idempotent_rejecting() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token_a, user_a) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token_a));

    let response = auth(client.post(format!("{}/post/publishTeamPost", address)))
        .json(&json!({
            "user_id": user_a,
            "title": "Lake loop",
            "start_location": "North gate",
            "end_location": "South gate",
            "duration_day": 2,
            "team_size": 4,
            "payment_method": "AA",
            "theme_id": 1,
            "image_urls": ["cover.png"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let post_id = body["data"]["post_id"].as_i64().unwrap();

    // The documented path carries a trailing slash; both spellings work.
    let response = auth(client.post(format!("{}/users/joinTeam/", address)))
        .json(&json!({ "user_id": user_b, "post_id": post_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Second join with the same pair is rejected and inserts nothing.
    let response = auth(client.post(format!("{}/users/joinTeam", address)))
        .json(&json!({ "user_id": user_b, "post_id": post_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = auth(client.get(format!("{}/post/getJoinTeamUsers/{}", address, post_id)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let members = body["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"].as_i64().unwrap(), user_b);
}

#[tokio::test]
async fn notification_classification_flow() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token_a, user_a) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token_a));

    let send = |from: i64, to: i64, kind: &str, content: &str| {
        auth(client.post(format!("{}/message/sendMessage", address))).json(&json!({
            "sender_type": if kind == "admin_notification" { "admin" } else { "user" },
            "sender_id": from,
            "receiver_type": "user",
            "receiver_id": to,
            "content": content,
            "type": kind,
        }))
    };

    for req in [
        send(user_a, user_b, "private_message", "hi b"),
        send(user_b, user_a, "private_message", "hi a"),
        send(0, user_a, "admin_notification", "welcome"),
        send(user_b, user_a, "dynamic_post_like", "b liked your post"),
    ] {
        let response = req.send().await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = auth(client.get(format!("{}/message/getNotification/{}", address, user_a)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let n = &body["data"]["notifications"];
    assert_eq!(n["messages"]["send"].as_array().unwrap().len(), 1);
    assert_eq!(n["messages"]["received"].as_array().unwrap().len(), 1);
    assert_eq!(n["admin_notifications"].as_array().unwrap().len(), 1);
    assert_eq!(n["interactive"]["dynamic_post_like"].as_array().unwrap().len(), 1);

    // Conversation history between the two users.
    let response = auth(client.post(format!("{}/message/getMessagesBetweenUsers", address)))
        .json(&json!({ "user1_id": user_a, "user2_id": user_b, "page": 1, "limit": 1 }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["list"].as_array().unwrap().len(), 1);
    let pagination = &body["data"]["pagination"];
    // The like event also lands in the pair filter, so 3 rows total.
    assert_eq!(pagination["totalCount"].as_i64().unwrap(), 3);
    assert_eq!(pagination["totalPages"].as_i64().unwrap(), 3);
    assert_eq!(pagination["pageSize"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn admin_notification_pagination_invariant() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token));

    for i in 0..3 {
        let response = auth(client.post(format!("{}/message/sendMessage", address)))
            .json(&json!({
                "sender_type": "admin",
                "sender_id": 0,
                "receiver_type": "user",
                "receiver_id": user_id,
                "content": format!("notice {i}"),
                "type": "admin_notification",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = auth(client.post(format!("{}/message/getUserAdminNotifications", address)))
        .json(&json!({ "user_id": user_id, "page": 1, "limit": 2 }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["adminNotifications"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["totalCount"].as_i64().unwrap(), 3);
    assert_eq!(body["data"]["pagination"]["totalPages"].as_i64().unwrap(), 2);

    let response = auth(client.post(format!("{}/message/getUserAdminNotifications", address)))
        .json(&json!({ "user_id": user_id, "page": 2, "limit": 2 }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["adminNotifications"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["current_page"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn team_post_sparse_update_keeps_untouched_fields() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token));

    let response = auth(client.post(format!("{}/post/publishTeamPost", address)))
        .json(&json!({
            "user_id": user_id,
            "title": "Lake loop",
            "description": "Easy walk",
            "start_location": "North gate",
            "end_location": "South gate",
            "duration_day": 2,
            "team_size": 4,
            "payment_method": "AA",
            "theme_id": 1,
            "image_urls": ["cover.png"],
            "itinerary": "route.png",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let post_id = body["data"]["post_id"].as_i64().unwrap();

    // Patch mixing a new value, an empty string and absent fields.
    let response = auth(client.post(format!("{}/post/updateTeamPost", address)))
        .json(&json!({
            "user_id": user_id,
            "post_id": post_id,
            "title": "Ridge loop",
            "description": "",
            "team_size": 6,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.get(format!("{}/post/getTeamPost/{}", address, post_id)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let post = &body["data"]["post"];
    assert_eq!(post["title"].as_str().unwrap(), "Ridge loop");
    // Empty string is dropped from the patch, not written.
    assert_eq!(post["description"].as_str().unwrap(), "Easy walk");
    // Absent fields stay untouched.
    assert_eq!(post["duration_day"].as_i64().unwrap(), 2);
    assert_eq!(post["team_size"].as_i64().unwrap(), 6);
    assert_eq!(post["itinerary"].as_str().unwrap(), "route.png");

    // A patch carrying nothing is rejected.
    let response = auth(client.post(format!("{}/post/updateTeamPost", address)))
        .json(&json!({ "user_id": user_id, "post_id": post_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Someone else's patch never reaches the row.
    let response = auth(client.post(format!("{}/post/updateTeamPost", address)))
        .json(&json!({ "user_id": user_b, "post_id": post_id, "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn dynamic_post_update_ignores_empty_content() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token));

    let response = auth(client.post(format!("{}/post/publishDynamicPost", address)))
        .json(&json!({ "user_id": user_id, "content": "first", "image_urls": ["a.png"] }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let post_id = body["data"]["dynamic_post_id"].as_i64().unwrap();

    // Empty content is dropped; the image replacement still applies.
    let response = auth(client.post(format!("{}/post/updateDynamicPost", address)))
        .json(&json!({
            "user_id": user_id,
            "dynamic_post_id": post_id,
            "content": "",
            "image_urls": ["b.png"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.get(format!("{}/post/getDynamicPost/{}", address, post_id)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let post = &body["data"]["post"];
    assert_eq!(post["content"].as_str().unwrap(), "first");
    let urls: Vec<&str> = post["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["image_url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["b.png"]);

    // Nothing to patch at all is a 400, matching the team path.
    let response = auth(client.post(format!("{}/post/updateDynamicPost", address)))
        .json(&json!({ "user_id": user_id, "dynamic_post_id": post_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn dynamic_feed_allowlist_and_follow_flag() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token_a, user_a) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let (_token_c, viewer) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token_a));

    for author in [user_a, user_b] {
        let response = auth(client.post(format!("{}/post/publishDynamicPost", address)))
            .json(&json!({ "user_id": author, "content": format!("by {author}") }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    // The viewer follows only the first author.
    let response = auth(client.post(format!("{}/users/follow", address)))
        .json(&json!({ "follower_id": viewer, "following_id": user_a, "action": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.post(format!("{}/post/getDynamicPostsForPage", address)))
        .json(&json!({
            "user_id": viewer,
            "follow_user_ids": [user_a, user_b],
            "page": 1,
            "limit": 10,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let posts = body["data"]["posts"].as_array().unwrap();
    // The allowlist restricts the feed to these two fresh authors.
    assert_eq!(posts.len(), 2);
    assert_eq!(body["data"]["pagination"]["totalCount"].as_i64().unwrap(), 2);
    for post in posts {
        let followed = post["user_id"].as_i64().unwrap() == user_a;
        assert_eq!(post["isFollowed"].as_bool().unwrap(), followed);
    }
}

#[tokio::test]
async fn team_feed_filters_by_theme() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token));

    // Theme ids derived from the fresh user id so parallel runs never collide.
    let theme_x = user_id * 1000 + 1;
    let theme_y = user_id * 1000 + 2;

    let mut expected_post_id = 0;
    for theme_id in [theme_x, theme_y] {
        let response = auth(client.post(format!("{}/post/publishTeamPost", address)))
            .json(&json!({
                "user_id": user_id,
                "title": format!("Trip {theme_id}"),
                "start_location": "A",
                "end_location": "B",
                "duration_day": 1,
                "team_size": 2,
                "payment_method": "AA",
                "theme_id": theme_id,
                "image_urls": ["cover.png"],
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        if theme_id == theme_x {
            expected_post_id = body["data"]["post_id"].as_i64().unwrap();
        }
    }

    let response = auth(client.post(format!("{}/post/getTeamPostsForPage", address)))
        .json(&json!({ "theme_id": theme_x, "page": 1, "limit": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["post_id"].as_i64().unwrap(), expected_post_id);
    assert_eq!(body["data"]["pagination"]["totalCount"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn follow_and_profile_flow() {
    let Some(address) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let (token_a, user_a) = register_and_login(&address, &client).await;
    let (_token_b, user_b) = register_and_login(&address, &client).await;
    let auth = |req: reqwest::RequestBuilder| req.header("Authorization", format!("Bearer {}", token_a));

    // Self-follow is rejected.
    let response = auth(client.post(format!("{}/users/follow", address)))
        .json(&json!({ "follower_id": user_a, "following_id": user_a, "action": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Follow twice; the edge stays unique.
    for _ in 0..2 {
        let response = auth(client.post(format!("{}/users/follow", address)))
            .json(&json!({ "follower_id": user_a, "following_id": user_b, "action": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = auth(client.get(format!("{}/users/getFollows/{}", address, user_a)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let follows = body["data"]["follows"].as_array().unwrap();
    assert_eq!(follows.len(), 1);
    assert_eq!(follows[0]["user_id"].as_i64().unwrap(), user_b);
    assert!(follows[0]["tags"].as_array().unwrap().is_empty());

    let response = auth(client.get(format!("{}/users/getFans/{}", address, user_b)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["fans"].as_array().unwrap().len(), 1);

    // Unfollow empties the list again.
    let response = auth(client.post(format!("{}/users/follow", address)))
        .json(&json!({ "follower_id": user_a, "following_id": user_b, "action": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.get(format!("{}/users/getFollows/{}", address, user_a)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["follows"].as_array().unwrap().is_empty());

    // Profile update is a full overwrite and is visible on read.
    let response = auth(client.post(format!("{}/users/update", address)))
        .json(&json!({
            "user_id": user_a,
            "nickname": "Wanderer",
            "gender": "other",
            "bio": "always outside",
            "region_name": "Chengdu",
            "region_code": "510100",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = auth(client.get(format!("{}/users/getUserInfo/{}", address, user_a)))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["nickname"].as_str().unwrap(), "Wanderer");
    assert_eq!(body["data"]["address"]["name"].as_str().unwrap(), "Chengdu");
}
