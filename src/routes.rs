// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, comment, like, message, post as post_handlers, user},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (login, users, post, comment, like, message).
/// * Applies global middleware (Trace, CORS) and rate limiting on login.
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(5)
        .burst_size(20)
        .finish()
        .unwrap();

    let login_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(GovernorLayer::new(governor_conf));

    let user_routes = Router::new()
        .route("/getUserInfo/{id}", get(user::get_user_info))
        .route("/getFollows/{user_id}", get(user::get_follows))
        .route("/getFans/{user_id}", get(user::get_fans))
        .route("/follow", post(user::follow))
        .route("/update", post(user::update_profile))
        .route("/joinTeam", post(user::join_team))
        // Registered with and without the trailing slash; existing
        // clients call the slashed form.
        .route("/joinTeam/", post(user::join_team))
        .route("/getJoinedTeams/{user_id}", get(user::get_joined_teams))
        .route("/getMyposts", post(user::get_my_posts));

    let post_routes = Router::new()
        .route("/publishDynamicPost", post(post_handlers::publish_dynamic_post))
        .route("/publishTeamPost", post(post_handlers::publish_team_post))
        .route("/updateDynamicPost", post(post_handlers::update_dynamic_post))
        .route("/updateTeamPost", post(post_handlers::update_team_post))
        .route(
            "/getDynamicPost/{dynamic_post_id}",
            get(post_handlers::get_dynamic_post),
        )
        .route("/getTeamPost/{post_id}", get(post_handlers::get_team_post))
        .route(
            "/getDynamicPostsForPage",
            post(post_handlers::get_dynamic_posts_for_page),
        )
        .route(
            "/getTeamPostsForPage",
            post(post_handlers::get_team_posts_for_page),
        )
        .route(
            "/getJoinTeamUsers/{post_id}",
            get(post_handlers::get_team_members),
        );

    let comment_routes = Router::new()
        .route("/publishDynamicComment", post(comment::publish_dynamic_comment))
        .route("/publishTeamComment", post(comment::publish_team_comment))
        .route("/deleteDynamicComment", post(comment::delete_dynamic_comment))
        .route("/deleteTeamComment", post(comment::delete_team_comment))
        .route(
            "/getUserDynamicComments",
            post(comment::get_user_dynamic_comments),
        )
        .route(
            "/getPostDynamicComments",
            post(comment::get_post_dynamic_comments),
        );

    let like_routes = Router::new()
        .route("/likeDynamicPost", post(like::like_dynamic_post))
        .route("/likeTeamPost", post(like::like_team_post))
        .route(
            "/getLikeDynamicPostUsers/{post_id}",
            get(like::get_like_dynamic_post_users),
        )
        .route(
            "/getLikeTeamPostUsers/{post_id}",
            get(like::get_like_team_post_users),
        )
        .route(
            "/getUserLikedDynamicPosts/{user_id}",
            get(like::get_user_liked_dynamic_posts),
        )
        .route(
            "/getUserLikedTeamPosts/{user_id}",
            get(like::get_user_liked_team_posts),
        );

    let message_routes = Router::new()
        .route("/sendMessage", post(message::send_message))
        .route("/getNotification/{user_id}", get(message::get_notification))
        .route(
            "/getMessagesBetweenUsers",
            post(message::get_messages_between_users),
        )
        .route(
            "/getUserAdminNotifications",
            post(message::get_user_admin_notifications),
        )
        .route(
            "/getUserInteractiveNotifications",
            post(message::get_user_interactive_notifications),
        );

    // Everything except login requires a valid token.
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/post", post_routes)
        .nest("/comment", comment_routes)
        .nest("/like", like_routes)
        .nest("/message", message_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/login", login_routes)
        .merge(protected)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
