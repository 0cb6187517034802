use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        pagination::{PageParams, Pagination},
        post::{PostKind, TeamPost},
        user::{
            FollowRequest, JoinTeamRequest, MyPostsRequest, UpdateProfileRequest, User, UserInfo,
        },
    },
    response,
    utils::{
        exists::{missing_tag_ids, post_exists, user_exists},
        tags::user_tags_for,
    },
};

/// Fetch a user's profile together with their resolved tag names.
pub async fn get_user_info(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&pool)
        .await?;

    let user = user.ok_or(AppError::NotFound("User not found".to_string()))?;

    let mut tags = user_tags_for(&pool, &[user_id]).await?;
    let user_info = UserInfo::from_user(user, tags.remove(&user_id).unwrap_or_default());

    Ok(response::ok("User info fetched", user_info))
}

/// Shared follower/fan expansion: resolve one side of the follow edge
/// set into enriched profiles. Returns an empty list when the user has
/// no connections.
async fn edge_profiles(
    pool: &PgPool,
    user_id: i64,
    select_column: &str,
    filter_column: &str,
) -> Result<Vec<UserInfo>, AppError> {
    let sql = format!("SELECT {select_column} FROM user_follows WHERE {filter_column} = $1");
    let ids: Vec<i64> = sqlx::query_scalar(&sql).bind(user_id).fetch_all(pool).await?;

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let users: Vec<User> = sqlx::query_as("SELECT * FROM users WHERE user_id = ANY($1)")
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    let mut tag_map = user_tags_for(pool, &ids).await?;

    Ok(users
        .into_iter()
        .map(|u| {
            let tags = tag_map.remove(&u.user_id).unwrap_or_default();
            UserInfo::from_user(u, tags)
        })
        .collect())
}

/// Users this user follows.
pub async fn get_follows(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let follows = edge_profiles(&pool, user_id, "following_id", "follower_id").await?;
    Ok(response::ok("Follow list fetched", json!({ "follows": follows })))
}

/// Users following this user.
pub async fn get_fans(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let fans = edge_profiles(&pool, user_id, "follower_id", "following_id").await?;
    Ok(response::ok("Fan list fetched", json!({ "fans": fans })))
}

/// Follow (action = 1) or unfollow (action = 0) another user.
/// The unique constraint on the edge makes a repeated follow a no-op.
pub async fn follow(
    State(pool): State<PgPool>,
    Json(payload): Json<FollowRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }
    if payload.follower_id == payload.following_id {
        return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
    }

    let (follower_ok, following_ok) = tokio::try_join!(
        user_exists(&pool, payload.follower_id),
        user_exists(&pool, payload.following_id),
    )?;
    if !follower_ok || !following_ok {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if payload.action == 1 {
        sqlx::query(
            "INSERT INTO user_follows (follower_id, following_id) VALUES ($1, $2)
             ON CONFLICT (follower_id, following_id) DO NOTHING",
        )
        .bind(payload.follower_id)
        .bind(payload.following_id)
        .execute(&pool)
        .await?;
        Ok(response::ok_msg("Followed"))
    } else {
        sqlx::query("DELETE FROM user_follows WHERE follower_id = $1 AND following_id = $2")
            .bind(payload.follower_id)
            .bind(payload.following_id)
            .execute(&pool)
            .await?;
        Ok(response::ok_msg("Unfollowed"))
    }
}

/// Overwrites the whole profile, then (when `tags` is supplied) replaces
/// the tag set. Invalid tag ids are all collected before failing; the
/// delete + bulk insert runs inside one transaction.
pub async fn update_profile(
    State(pool): State<PgPool>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }

    if !user_exists(&pool, payload.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    sqlx::query(
        r#"
        UPDATE users
        SET avatar_url = $1, nickname = $2, gender = $3, bio = $4, birthday = $5,
            region_name = $6, region_code = $7, contact_phone = $8, contact_email = $9
        WHERE user_id = $10
        "#,
    )
    .bind(&payload.avatar_url)
    .bind(&payload.nickname)
    .bind(&payload.gender)
    .bind(&payload.bio)
    .bind(payload.birthday)
    .bind(&payload.region_name)
    .bind(&payload.region_code)
    .bind(&payload.contact_phone)
    .bind(&payload.contact_email)
    .bind(payload.user_id)
    .execute(&pool)
    .await?;

    if let Some(tag_ids) = &payload.tags {
        let invalid = missing_tag_ids(&pool, tag_ids).await?;
        if !invalid.is_empty() {
            let ids = invalid
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::BadRequest(format!("Tags {ids} do not exist")));
        }

        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_tags WHERE user_id = $1")
            .bind(payload.user_id)
            .execute(&mut *tx)
            .await?;

        if !tag_ids.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO user_tags (user_id, tag_id) ");
            builder.push_values(tag_ids, |mut b, tag_id| {
                b.push_bind(payload.user_id).push_bind(tag_id);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
    }

    Ok(response::ok_msg("Profile updated"))
}

/// Join a team post. Idempotent-rejecting: a second join for the same
/// pair returns 400 and inserts nothing.
pub async fn join_team(
    State(pool): State<PgPool>,
    Json(payload): Json<JoinTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user_ok, post_ok) = tokio::try_join!(
        user_exists(&pool, payload.user_id),
        post_exists(&pool, PostKind::Team, payload.post_id),
    )?;
    if !user_ok {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if !post_ok {
        return Err(AppError::NotFound("Team post not found".to_string()));
    }

    let inserted = sqlx::query(
        "INSERT INTO team_activity_participants (post_id, user_id) VALUES ($1, $2)
         ON CONFLICT (post_id, user_id) DO NOTHING",
    )
    .bind(payload.post_id)
    .bind(payload.user_id)
    .execute(&pool)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Err(AppError::BadRequest("Already joined the team".to_string()));
    }

    Ok(response::ok_msg("Joined the team"))
}

#[derive(Debug, FromRow, Serialize)]
struct JoinedTeamRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    post: TeamPost,
    joined_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Paginated list of team posts the user participates in.
/// Page params ride in the (optional) JSON body.
pub async fn get_joined_teams(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
    body: Option<Json<PageParams>>,
) -> Result<impl IntoResponse, AppError> {
    let page = body.map(|Json(p)| p).unwrap_or_default();

    let rows: Vec<JoinedTeamRow> = sqlx::query_as(
        r#"
        SELECT tp.*, p.joined_at
        FROM team_activity_participants p
        JOIN team_activity_posts tp ON p.post_id = tp.post_id
        WHERE p.user_id = $1
        ORDER BY p.joined_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM team_activity_participants WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await?;

    let mut teams = Vec::with_capacity(rows.len());
    for row in rows {
        let images: Vec<String> = sqlx::query_scalar(
            "SELECT image_url FROM team_activity_images WHERE post_id = $1 ORDER BY image_id",
        )
        .bind(row.post.post_id)
        .fetch_all(&pool)
        .await?;

        let mut value = serde_json::to_value(&row)?;
        value["image_urls"] = json!(images);
        teams.push(value);
    }

    Ok(response::ok(
        "Joined teams fetched",
        json!({
            "teams": teams,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}

#[derive(Debug, FromRow, Serialize)]
struct MyPostRow {
    post_id: i64,
    kind: String,
    content: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Paginated union of the user's dynamic and team posts, newest first,
/// each row carrying its structured image list.
pub async fn get_my_posts(
    State(pool): State<PgPool>,
    Json(payload): Json<MyPostsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let rows: Vec<MyPostRow> = sqlx::query_as(
        r#"
        SELECT post_id, kind, content, created_at FROM (
            SELECT dynamic_post_id AS post_id, 'dynamic'::TEXT AS kind, content, created_at
            FROM dynamic_posts WHERE user_id = $1
            UNION ALL
            SELECT post_id, 'team'::TEXT AS kind, title AS content, created_at
            FROM team_activity_posts WHERE user_id = $1
        ) p
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(payload.user_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM dynamic_posts WHERE user_id = $1)
             + (SELECT COUNT(*) FROM team_activity_posts WHERE user_id = $1)
        "#,
    )
    .bind(payload.user_id)
    .fetch_one(&pool)
    .await?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        let kind = if row.kind == "dynamic" {
            PostKind::Dynamic
        } else {
            PostKind::Team
        };
        let sql = format!(
            "SELECT image_url FROM {} WHERE {} = $1 ORDER BY image_id",
            kind.image_table(),
            kind.id_column()
        );
        let images: Vec<String> = sqlx::query_scalar(&sql)
            .bind(row.post_id)
            .fetch_all(&pool)
            .await?;

        let mut value = serde_json::to_value(&row)?;
        value["image_urls"] = json!(images);
        posts.push(value);
    }

    Ok(response::ok(
        "Posts fetched",
        json!({
            "posts": posts,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}
