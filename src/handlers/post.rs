use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        comment::CommentWithAuthor,
        pagination::Pagination,
        post::{
            AuthorInfo, DynamicFeedItem, DynamicFeedRequest, PostImage, PostKind,
            PublishDynamicPostRequest, PublishTeamPostRequest, TeamFeedRequest, TeamPost,
            UpdateDynamicPostRequest, UpdateTeamPostRequest,
        },
    },
    response,
    utils::exists::{post_exists, user_exists},
};

/// Inserts one image row per URL for the given post.
async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    kind: PostKind,
    post_id: i64,
    image_urls: &[String],
) -> Result<(), AppError> {
    if image_urls.is_empty() {
        return Ok(());
    }
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}, image_url) ",
        kind.image_table(),
        kind.id_column()
    ));
    builder.push_values(image_urls, |mut b, url| {
        b.push_bind(post_id).push_bind(url);
    });
    builder.build().execute(&mut **tx).await?;
    Ok(())
}

/// Replaces the post's whole image set. Runs inside the caller's
/// transaction so a failed insert never leaves the post imageless.
async fn replace_images(
    tx: &mut Transaction<'_, Postgres>,
    kind: PostKind,
    post_id: i64,
    image_urls: &[String],
) -> Result<(), AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = $1",
        kind.image_table(),
        kind.id_column()
    );
    sqlx::query(&sql).bind(post_id).execute(&mut **tx).await?;
    insert_images(tx, kind, post_id, image_urls).await
}

/// Sets the team post's single itinerary image.
async fn set_itinerary(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    image_url: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO itineraries (post_id, image_url) VALUES ($1, $2)
         ON CONFLICT (post_id) DO UPDATE SET image_url = EXCLUDED.image_url",
    )
    .bind(post_id)
    .bind(image_url)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Publish a dynamic (status-update) post with its images.
/// Post row and image rows are written in one transaction.
pub async fn publish_dynamic_post(
    State(pool): State<PgPool>,
    Json(payload): Json<PublishDynamicPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }
    if !user_exists(&pool, payload.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let mut tx = pool.begin().await?;

    let post_id: i64 = sqlx::query_scalar(
        "INSERT INTO dynamic_posts (user_id, content) VALUES ($1, $2) RETURNING dynamic_post_id",
    )
    .bind(payload.user_id)
    .bind(&payload.content)
    .fetch_one(&mut *tx)
    .await?;

    insert_images(&mut tx, PostKind::Dynamic, post_id, &payload.image_urls).await?;

    tx.commit().await?;

    Ok(response::ok(
        "Dynamic post published",
        json!({ "dynamic_post_id": post_id }),
    ))
}

/// Sparse update of a dynamic post. Ownership-scoped: the row must
/// belong to the requesting user. Empty-string content is ignored, and
/// a patch carrying nothing at all is rejected.
pub async fn update_dynamic_post(
    State(pool): State<PgPool>,
    Json(payload): Json<UpdateDynamicPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let owned: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM dynamic_posts WHERE dynamic_post_id = $1 AND user_id = $2)",
    )
    .bind(payload.dynamic_post_id)
    .bind(payload.user_id)
    .fetch_one(&pool)
    .await?;
    if !owned {
        return Err(AppError::NotFound(
            "Post not found or no permission".to_string(),
        ));
    }

    let content = payload.content.as_deref().filter(|c| !c.is_empty());
    if content.is_none() && payload.image_urls.is_none() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let mut tx = pool.begin().await?;

    if let Some(content) = content {
        sqlx::query("UPDATE dynamic_posts SET content = $1 WHERE dynamic_post_id = $2")
            .bind(content)
            .bind(payload.dynamic_post_id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(image_urls) = &payload.image_urls {
        replace_images(&mut tx, PostKind::Dynamic, payload.dynamic_post_id, image_urls).await?;
    }

    tx.commit().await?;

    Ok(response::ok_msg("Dynamic post updated"))
}

/// Publish a team (trip-recruitment) post with images and an optional
/// itinerary image, all in one transaction.
pub async fn publish_team_post(
    State(pool): State<PgPool>,
    Json(payload): Json<PublishTeamPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }
    if !user_exists(&pool, payload.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let mut tx = pool.begin().await?;

    let post_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO team_activity_posts
            (user_id, title, description, start_location, end_location, duration_day,
             team_size, estimated_expense, gender_requirement, payment_method, theme_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING post_id
        "#,
    )
    .bind(payload.user_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.start_location)
    .bind(&payload.end_location)
    .bind(payload.duration_day)
    .bind(payload.team_size)
    .bind(payload.estimated_expense)
    .bind(&payload.gender_requirement)
    .bind(&payload.payment_method)
    .bind(payload.theme_id)
    .fetch_one(&mut *tx)
    .await?;

    insert_images(&mut tx, PostKind::Team, post_id, &payload.image_urls).await?;

    if let Some(itinerary) = payload.itinerary.as_deref().filter(|i| !i.is_empty()) {
        set_itinerary(&mut tx, post_id, itinerary).await?;
    }

    tx.commit().await?;

    Ok(response::ok(
        "Team post published",
        json!({ "post_id": post_id }),
    ))
}

/// Sparse update of a team post. Only supplied (non-empty) fields are
/// written; images and itinerary are replaced wholesale when present.
pub async fn update_team_post(
    State(pool): State<PgPool>,
    Json(payload): Json<UpdateTeamPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let owned: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM team_activity_posts WHERE post_id = $1 AND user_id = $2)",
    )
    .bind(payload.post_id)
    .bind(payload.user_id)
    .fetch_one(&pool)
    .await?;
    if !owned {
        return Err(AppError::NotFound(
            "Post not found or no permission".to_string(),
        ));
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE team_activity_posts SET ");
    let mut separated = builder.separated(", ");
    let mut has_fields = false;

    macro_rules! patch_text {
        ($field:ident) => {
            if let Some(v) = payload.$field.as_deref().filter(|v| !v.is_empty()) {
                separated.push(concat!(stringify!($field), " = "));
                separated.push_bind_unseparated(v.to_owned());
                has_fields = true;
            }
        };
    }
    macro_rules! patch_num {
        ($field:ident) => {
            if let Some(v) = payload.$field {
                separated.push(concat!(stringify!($field), " = "));
                separated.push_bind_unseparated(v);
                has_fields = true;
            }
        };
    }

    patch_text!(title);
    patch_text!(description);
    patch_text!(start_location);
    patch_text!(end_location);
    patch_num!(duration_day);
    patch_num!(team_size);
    patch_num!(estimated_expense);
    patch_text!(gender_requirement);
    patch_text!(payment_method);
    patch_num!(theme_id);

    if !has_fields && payload.image_urls.is_none() && payload.itinerary.is_none() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let mut tx = pool.begin().await?;

    if has_fields {
        builder.push(" WHERE post_id = ").push_bind(payload.post_id);
        builder.build().execute(&mut *tx).await?;
    }

    if let Some(image_urls) = &payload.image_urls {
        replace_images(&mut tx, PostKind::Team, payload.post_id, image_urls).await?;
    }

    if let Some(itinerary) = payload.itinerary.as_deref().filter(|i| !i.is_empty()) {
        set_itinerary(&mut tx, payload.post_id, itinerary).await?;
    }

    tx.commit().await?;

    Ok(response::ok_msg("Team post updated"))
}

#[derive(Debug, FromRow)]
struct DynamicPostDetail {
    dynamic_post_id: i64,
    user_id: i64,
    content: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    nickname: Option<String>,
    avatar_url: Option<String>,
}

fn comment_views(comments: Vec<CommentWithAuthor>) -> Vec<serde_json::Value> {
    comments
        .into_iter()
        .map(|c| {
            json!({
                "comment_id": c.comment_id,
                "user_info": {
                    "user_id": c.user_id,
                    "nickname": c.nickname,
                    "avatar": c.avatar_url,
                },
                "content": c.content,
                "created_at": c.created_at,
            })
        })
        .collect()
}

async fn fetch_images(
    pool: &PgPool,
    kind: PostKind,
    post_id: i64,
) -> Result<Vec<PostImage>, AppError> {
    let sql = format!(
        "SELECT image_id, image_url FROM {} WHERE {} = $1 ORDER BY image_id",
        kind.image_table(),
        kind.id_column()
    );
    Ok(sqlx::query_as(&sql).bind(post_id).fetch_all(pool).await?)
}

async fn fetch_comments(
    pool: &PgPool,
    kind: PostKind,
    post_id: i64,
) -> Result<Vec<CommentWithAuthor>, AppError> {
    let sql = format!(
        r#"
        SELECT c.comment_id, c.user_id, c.content, c.created_at, u.nickname, u.avatar_url
        FROM {} c
        LEFT JOIN users u ON c.user_id = u.user_id
        WHERE c.{} = $1
        ORDER BY c.created_at
        "#,
        kind.comment_table(),
        kind.id_column()
    );
    Ok(sqlx::query_as(&sql).bind(post_id).fetch_all(pool).await?)
}

async fn fetch_liker_ids(
    pool: &PgPool,
    kind: PostKind,
    post_id: i64,
) -> Result<Vec<i64>, AppError> {
    let sql = format!(
        "SELECT user_id FROM {} WHERE {} = $1",
        kind.like_table(),
        kind.id_column()
    );
    Ok(sqlx::query_scalar(&sql).bind(post_id).fetch_all(pool).await?)
}

/// Composite read of one dynamic post: post row, author profile, images,
/// enriched comments and the liking user ids.
pub async fn get_dynamic_post(
    State(pool): State<PgPool>,
    Path(dynamic_post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post: Option<DynamicPostDetail> = sqlx::query_as(
        r#"
        SELECT dp.dynamic_post_id, dp.user_id, dp.content, dp.created_at,
               u.nickname, u.avatar_url
        FROM dynamic_posts dp
        LEFT JOIN users u ON dp.user_id = u.user_id
        WHERE dp.dynamic_post_id = $1
        "#,
    )
    .bind(dynamic_post_id)
    .fetch_optional(&pool)
    .await?;

    let post = post.ok_or(AppError::NotFound("Post not found".to_string()))?;

    let images = fetch_images(&pool, PostKind::Dynamic, dynamic_post_id).await?;
    let comments = fetch_comments(&pool, PostKind::Dynamic, dynamic_post_id).await?;
    let like_user_ids = fetch_liker_ids(&pool, PostKind::Dynamic, dynamic_post_id).await?;

    Ok(response::ok(
        "Post fetched",
        json!({
            "post": {
                "user_id": post.user_id,
                "dynamic_post_id": post.dynamic_post_id,
                "content": post.content,
                "images": images,
                "created_at": post.created_at,
                "user_info": { "nickname": post.nickname, "avatar": post.avatar_url },
                "comments": comment_views(comments),
                "like_userIds": like_user_ids,
            }
        }),
    ))
}

/// Composite read of one team post, including the itinerary image URL
/// (empty string when none is set).
pub async fn get_team_post(
    State(pool): State<PgPool>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post: Option<TeamPost> =
        sqlx::query_as("SELECT * FROM team_activity_posts WHERE post_id = $1")
            .bind(post_id)
            .fetch_optional(&pool)
            .await?;

    let post = post.ok_or(AppError::NotFound("Post not found".to_string()))?;

    let author: AuthorInfo =
        sqlx::query_as("SELECT nickname, avatar_url FROM users WHERE user_id = $1")
            .bind(post.user_id)
            .fetch_optional(&pool)
            .await?
            .unwrap_or(AuthorInfo {
                nickname: None,
                avatar_url: None,
            });

    let images = fetch_images(&pool, PostKind::Team, post_id).await?;

    let itinerary: Option<String> =
        sqlx::query_scalar("SELECT image_url FROM itineraries WHERE post_id = $1")
            .bind(post_id)
            .fetch_optional(&pool)
            .await?;

    let comments = fetch_comments(&pool, PostKind::Team, post_id).await?;
    let like_user_ids = fetch_liker_ids(&pool, PostKind::Team, post_id).await?;

    let mut post_value = serde_json::to_value(&post)?;
    post_value["user_info"] = json!({ "nickname": author.nickname, "avatar": author.avatar_url });
    post_value["images"] = serde_json::to_value(&images)?;
    post_value["itinerary"] = json!(itinerary.unwrap_or_default());
    post_value["comments"] = json!(comment_views(comments));
    post_value["like_userIds"] = json!(like_user_ids);

    Ok(response::ok("Post fetched", json!({ "post": post_value })))
}

/// Paginated dynamic feed. An optional author allowlist restricts the
/// feed; when the requesting user is known each row carries whether they
/// follow the author. Both parts are fully parameterized.
pub async fn get_dynamic_posts_for_page(
    State(pool): State<PgPool>,
    Json(payload): Json<DynamicFeedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT dp.dynamic_post_id, dp.user_id, dp.content, dp.created_at, \
         u.nickname, u.avatar_url",
    );
    match payload.user_id {
        Some(viewer) => {
            builder
                .push(", EXISTS(SELECT 1 FROM user_follows WHERE follower_id = ")
                .push_bind(viewer)
                .push(" AND following_id = dp.user_id) AS is_followed");
        }
        None => {
            builder.push(", FALSE AS is_followed");
        }
    }
    builder.push(" FROM dynamic_posts dp LEFT JOIN users u ON dp.user_id = u.user_id");
    if !payload.follow_user_ids.is_empty() {
        builder
            .push(" WHERE dp.user_id = ANY(")
            .push_bind(payload.follow_user_ids.clone())
            .push(")");
    }
    builder
        .push(" ORDER BY dp.created_at DESC LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    let posts: Vec<DynamicFeedItem> = builder.build_query_as().fetch_all(&pool).await?;

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM dynamic_posts dp");
    if !payload.follow_user_ids.is_empty() {
        count_builder
            .push(" WHERE dp.user_id = ANY(")
            .push_bind(payload.follow_user_ids.clone())
            .push(")");
    }
    let total: i64 = count_builder.build_query_scalar().fetch_one(&pool).await?;

    Ok(response::ok(
        "Dynamic feed fetched",
        json!({
            "posts": posts,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}

/// Paginated team feed, optionally filtered by theme.
pub async fn get_team_posts_for_page(
    State(pool): State<PgPool>,
    Json(payload): Json<TeamFeedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT * FROM team_activity_posts");
    if let Some(theme_id) = payload.theme_id {
        builder.push(" WHERE theme_id = ").push_bind(theme_id);
    }
    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    let posts: Vec<TeamPost> = builder.build_query_as().fetch_all(&pool).await?;

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM team_activity_posts");
    if let Some(theme_id) = payload.theme_id {
        count_builder.push(" WHERE theme_id = ").push_bind(theme_id);
    }
    let total: i64 = count_builder.build_query_scalar().fetch_one(&pool).await?;

    Ok(response::ok(
        "Team feed fetched",
        json!({
            "posts": posts,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}

#[derive(Debug, FromRow, Serialize)]
struct TeamMember {
    user_id: i64,
    nickname: Option<String>,
    avatar_url: Option<String>,
    joined_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Roster of users who joined a team post, in join order.
pub async fn get_team_members(
    State(pool): State<PgPool>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !post_exists(&pool, PostKind::Team, post_id).await? {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let members: Vec<TeamMember> = sqlx::query_as(
        r#"
        SELECT u.user_id, u.nickname, u.avatar_url, p.joined_at
        FROM users u
        INNER JOIN team_activity_participants p ON u.user_id = p.user_id
        WHERE p.post_id = $1
        ORDER BY p.joined_at
        "#,
    )
    .bind(post_id)
    .fetch_all(&pool)
    .await?;

    Ok(response::ok("Team members fetched", members))
}
