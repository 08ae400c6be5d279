//! Routes of the in-process API fixture. Mirrors the endpoints the client
//! talks to, with just enough behavior to exercise it.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

pub(crate) type Shared = Arc<Mutex<Db>>;

pub(crate) const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Default)]
pub(crate) struct UserRow {
    pub(crate) id: u64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) nickname: String,
    /// Dietary tag names.
    pub(crate) dietary_preferences: Vec<String>,
    /// Ingredient names.
    pub(crate) disliked_ingredients: Vec<String>,
}

impl UserRow {
    pub(crate) fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "nickname": self.nickname,
            "dietary_preferences": self.dietary_preferences,
            "disliked_ingredients": self.disliked_ingredients,
            "date_joined": "2026-01-01T00:00:00Z",
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct Db {
    next_id: u64,
    pub(crate) users: Vec<UserRow>,
    /// access token -> user id
    pub(crate) sessions: HashMap<String, u64>,
    pub(crate) ingredients: Vec<Value>,
    pub(crate) tags: Vec<Value>,
    pub(crate) inventory: Vec<Value>,
    pub(crate) shopping: Vec<Value>,
    pub(crate) recipes: Vec<Value>,
    /// (recipe id, review)
    pub(crate) reviews: Vec<(u64, Value)>,
    pub(crate) favorites: BTreeSet<u64>,
    pub(crate) fail_next: VecDeque<u16>,
    pub(crate) requests: Vec<String>,
}

impl Db {
    pub(crate) fn seeded() -> Self {
        let mut db = Db {
            next_id: 1000,
            ..Default::default()
        };
        for (id, name, category) in [
            (1, "Egg", "Dairy & Eggs"),
            (2, "Milk", "Dairy & Eggs"),
            (3, "Flour", "Baking"),
            (4, "Sugar", "Baking"),
            (5, "Brown Sugar", "Baking"),
            (6, "Salt", "Spices"),
            (7, "Tomato", "Produce"),
        ] {
            db.ingredients
                .push(json!({ "id": id, "name": name, "category_display": category }));
        }
        for (id, name) in [(1, "vegan"), (2, "vegetarian"), (3, "gluten-free")] {
            db.tags.push(json!({ "id": id, "name": name }));
        }
        db
    }

    pub(crate) fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn ingredient(&self, id: u64) -> Option<&Value> {
        self.ingredients.iter().find(|i| i["id"] == id)
    }

    /// Mints a JWT-shaped token pair for the user.
    pub(crate) fn issue_tokens(&mut self, user_id: u64) -> Value {
        let jti = self.next_id();
        let access = jwt(json!({
            "token_type": "access",
            "exp": unix_now() + 3600,
            "user_id": user_id,
            "jti": jti,
        }));
        let refresh = jwt(json!({
            "token_type": "refresh",
            "exp": unix_now() + 86_400,
            "user_id": user_id,
            "jti": jti,
        }));
        self.sessions.insert(access.clone(), user_id);
        json!({ "access": access, "refresh": refresh })
    }

    fn user(&self, id: u64) -> Option<&UserRow> {
        self.users.iter().find(|u| u.id == id)
    }

    pub(crate) fn pantry_row(&mut self, body: &Value, extra: Value) -> Result<Value, Response> {
        let Some(ingredient_id) = body.get("ingredient").and_then(Value::as_u64) else {
            return Err(bad_request(json!({ "ingredient": ["This field is required."] })));
        };
        let Some(ingredient) = self.ingredient(ingredient_id).cloned() else {
            return Err(bad_request(json!({
                "ingredient": [format!("Invalid pk \"{}\" - object does not exist.", ingredient_id)]
            })));
        };
        let quantity = body.get("quantity").cloned().unwrap_or(Value::Null);
        if let Some(q) = quantity.as_str()
            && q.parse::<f64>().is_err()
        {
            return Err(bad_request(json!({ "quantity": ["A valid number is required."] })));
        }
        let mut row = json!({
            "id": self.next_id(),
            "ingredient": ingredient_id,
            "ingredient_name": ingredient["name"],
            "category": ingredient["category_display"],
            "quantity": quantity,
            "unit": body.get("unit").cloned().unwrap_or(Value::Null),
        });
        if let (Some(row), Some(extra)) = (row.as_object_mut(), extra.as_object()) {
            row.extend(extra.clone());
        }
        Ok(row)
    }

    fn recipe_out(&self, row: &Value) -> Value {
        let mut out = row.clone();
        let fav = row["id"].as_u64().is_some_and(|id| self.favorites.contains(&id));
        out["is_favorited"] = json!(fav);
        out
    }

    fn recipe_index(&self, id: u64) -> Option<usize> {
        self.recipes.iter().position(|r| r["id"] == id)
    }
}

pub(crate) fn jwt(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.fixture", header, payload)
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

pub(crate) fn lock(db: &Shared) -> MutexGuard<'_, Db> {
    db.lock().unwrap_or_else(|e| e.into_inner())
}

fn ok(v: Value) -> Response {
    Json(v).into_response()
}

fn created(v: Value) -> Response {
    (StatusCode::CREATED, Json(v)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn bad_request(v: Value) -> Response {
    (StatusCode::BAD_REQUEST, Json(v)).into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "No object matches the given query." })),
    )
        .into_response()
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

pub(crate) fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/users/register/", post(register))
        .route("/api/users/login/", post(login))
        .route("/api/users/profile/", get(profile).put(update_profile))
        .route("/api/users/inventory/", get(list_inventory).post(add_inventory))
        .route("/api/users/inventory/:id/", delete(delete_inventory))
        .route("/api/users/shopping-list/", get(list_shopping).post(add_shopping))
        .route(
            "/api/users/shopping-list/clear_purchased/",
            delete(clear_purchased),
        )
        .route(
            "/api/users/shopping-list/:id/",
            delete(delete_shopping).patch(update_shopping),
        )
        .route("/api/recipes/ingredients/", get(list_ingredients))
        .route("/api/recipes/dietary-tags/", get(list_tags))
        .route("/api/recipes/recipes/", get(list_recipes).post(create_recipe))
        .route("/api/recipes/recipes/favorites/", get(list_favorites))
        .route(
            "/api/recipes/recipes/:id/",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/recipes/:id/favorite/",
            post(favorite).delete(unfavorite),
        )
        .route(
            "/api/recipes/recipes/:id/add_to_shopping_list/",
            post(add_recipe_to_list),
        )
        .route(
            "/api/recipes/recipes/:id/reviews/",
            get(list_reviews).post(add_review),
        )
        .route(
            "/api/recipes/recipes/:id/reviews/:review/",
            delete(delete_review).patch(update_review),
        )
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .with_state(state)
}

/// Records the request, enforces bearer auth and serves injected failures.
async fn gate(State(db): State<Shared>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    {
        let mut db = lock(&db);
        db.requests.push(format!("{} {}", method, path));

        let public = path == "/api/users/login/" || path == "/api/users/register/";
        if !public {
            let known = bearer.as_ref().is_some_and(|t| db.sessions.contains_key(t));
            if !known {
                return unauthorized("Given token not valid for any token type");
            }
        }
        if method != axum::http::Method::GET
            && let Some(status) = db.fail_next.pop_front()
        {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(json!({ "detail": "Injected failure" }))).into_response();
        }
    }
    next.run(req).await
}

async fn register(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut db = lock(&db);
    let username = body["username"].as_str().unwrap_or_default().trim().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if username.is_empty() {
        return bad_request(json!({ "username": ["This field may not be blank."] }));
    }
    if password.len() < 8 {
        return bad_request(json!({ "password": ["This password is too short."] }));
    }
    if db.users.iter().any(|u| u.username == username) {
        return bad_request(json!({ "username": ["A user with that username already exists."] }));
    }
    let id = db.next_id();
    db.users.push(UserRow {
        id,
        username: username.clone(),
        email: email.clone(),
        password,
        ..Default::default()
    });
    created(json!({ "id": id, "username": username, "email": email }))
}

async fn login(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut db = lock(&db);
    let user = db
        .users
        .iter()
        .find(|u| u.username == body["username"] && u.password == body["password"])
        .map(|u| u.id);
    match user {
        Some(id) => ok(db.issue_tokens(id)),
        None => unauthorized("No active account found with the given credentials"),
    }
}

async fn profile(State(db): State<Shared>, req: Request) -> Response {
    let db = lock(&db);
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    let Some(user) = db.sessions.get(token).and_then(|id| db.user(*id)) else {
        return not_found();
    };
    ok(user.to_json())
}

async fn update_profile(
    State(db): State<Shared>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut db = lock(&db);
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    let Some(id) = db.sessions.get(token).copied() else {
        return not_found();
    };
    // Names must exist, like a slug-related serializer field.
    let names = |field: &str, known: &[Value]| -> Result<Option<Vec<String>>, Response> {
        let Some(list) = body.get(field).and_then(Value::as_array) else {
            return Ok(None);
        };
        let mut out = Vec::new();
        for name in list.iter().filter_map(Value::as_str) {
            if !known.iter().any(|k| k["name"] == name) {
                let mut errors = serde_json::Map::new();
                errors.insert(
                    field.to_string(),
                    json!([format!("Object with name={} does not exist.", name)]),
                );
                return Err(bad_request(Value::Object(errors)));
            }
            out.push(name.to_string());
        }
        Ok(Some(out))
    };
    let diet = match names("dietary_preferences", &db.tags) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let disliked = match names("disliked_ingredients", &db.ingredients) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(user) = db.users.iter_mut().find(|u| u.id == id) else {
        return not_found();
    };
    if let Some(email) = body["email"].as_str() {
        if !email.contains('@') {
            return bad_request(json!({ "email": ["Enter a valid email address."] }));
        }
        user.email = email.to_string();
    }
    if let Some(nickname) = body["nickname"].as_str() {
        user.nickname = nickname.to_string();
    }
    if let Some(diet) = diet {
        user.dietary_preferences = diet;
    }
    if let Some(disliked) = disliked {
        user.disliked_ingredients = disliked;
    }
    ok(user.to_json())
}

async fn list_inventory(State(db): State<Shared>) -> Response {
    ok(Value::Array(lock(&db).inventory.clone()))
}

async fn add_inventory(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut db = lock(&db);
    if db.inventory.iter().any(|i| i["ingredient"] == body["ingredient"]) {
        return bad_request(json!({ "detail": "Ingredient already in inventory." }));
    }
    match db.pantry_row(&body, json!({})) {
        Ok(row) => {
            db.inventory.push(row.clone());
            created(row)
        }
        Err(resp) => resp,
    }
}

async fn delete_inventory(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    let before = db.inventory.len();
    db.inventory.retain(|i| i["id"] != id);
    if db.inventory.len() == before {
        return not_found();
    }
    no_content()
}

async fn list_shopping(
    State(db): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let db = lock(&db);
    let wanted = q.get("is_purchased").map(|v| v == "true");
    let results = db
        .shopping
        .iter()
        .filter(|i| wanted.is_none_or(|w| i["is_purchased"] == w))
        .cloned()
        .collect::<Vec<_>>();
    ok(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    }))
}

async fn add_shopping(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut db = lock(&db);
    if db.shopping.iter().any(|i| i["ingredient"] == body["ingredient"]) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "detail": "Ingredient already on the shopping list." })),
        )
            .into_response();
    }
    match db.pantry_row(&body, json!({ "is_purchased": false, "source_recipe": null })) {
        Ok(row) => {
            db.shopping.push(row.clone());
            created(row)
        }
        Err(resp) => resp,
    }
}

async fn update_shopping(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut db = lock(&db);
    let Some(row) = db.shopping.iter_mut().find(|i| i["id"] == id) else {
        return not_found();
    };
    let Some(changes) = body.as_object() else {
        return bad_request(json!({ "detail": "Expected an object." }));
    };
    for (field, value) in changes {
        match field.as_str() {
            "is_purchased" if !value.is_boolean() => {
                return bad_request(json!({ "is_purchased": ["Must be a valid boolean."] }));
            }
            "is_purchased" | "quantity" | "unit" => row[field] = value.clone(),
            _ => {}
        }
    }
    ok(row.clone())
}

async fn delete_shopping(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    let before = db.shopping.len();
    db.shopping.retain(|i| i["id"] != id);
    if db.shopping.len() == before {
        return not_found();
    }
    no_content()
}

async fn clear_purchased(State(db): State<Shared>) -> Response {
    lock(&db).shopping.retain(|i| i["is_purchased"] != true);
    no_content()
}

async fn list_ingredients(State(db): State<Shared>) -> Response {
    ok(Value::Array(lock(&db).ingredients.clone()))
}

async fn list_tags(State(db): State<Shared>) -> Response {
    ok(Value::Array(lock(&db).tags.clone()))
}

fn contains_ci(v: &Value, needle: &str) -> bool {
    v.as_str()
        .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase()))
}

async fn list_recipes(
    State(db): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let db = lock(&db);
    let matching = db
        .recipes
        .iter()
        .filter(|r| {
            q.get("search")
                .is_none_or(|s| contains_ci(&r["title"], s) || contains_ci(&r["description"], s))
        })
        .filter(|r| {
            q.get("cuisine_type__icontains")
                .is_none_or(|c| contains_ci(&r["cuisine_type"], c))
        })
        .filter(|r| q.get("difficulty").is_none_or(|d| r["difficulty"] == d.as_str()))
        .filter(|r| {
            q.get("cooking_time_minutes__lte")
                .and_then(|m| m.parse::<u64>().ok())
                .is_none_or(|m| r["cooking_time_minutes"].as_u64().is_some_and(|t| t <= m))
        })
        .map(|r| db.recipe_out(r))
        .collect::<Vec<_>>();

    let page = q
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let start = (page - 1) * PAGE_SIZE;
    if start > 0 && start >= matching.len() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Invalid page." })),
        )
            .into_response();
    }
    let results = matching
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect::<Vec<_>>();
    let next = (start + PAGE_SIZE < matching.len()).then(|| format!("?page={}", page + 1));
    let previous = (page > 1).then(|| format!("?page={}", page - 1));
    ok(json!({
        "count": matching.len(),
        "next": next,
        "previous": previous,
        "results": results,
    }))
}

async fn list_favorites(State(db): State<Shared>) -> Response {
    let db = lock(&db);
    let favs = db
        .recipes
        .iter()
        .filter(|r| r["id"].as_u64().is_some_and(|id| db.favorites.contains(&id)))
        .map(|r| db.recipe_out(r))
        .collect::<Vec<_>>();
    ok(Value::Array(favs))
}

async fn create_recipe(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut db = lock(&db);
    let title = body["title"].as_str().unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return bad_request(json!({ "title": ["This field may not be blank."] }));
    }
    let mut ingredients = Vec::new();
    for ri in body["ingredients"].as_array().cloned().unwrap_or_default() {
        let id = ri["ingredient"].as_u64().unwrap_or_default();
        let Some(ingredient) = db.ingredient(id) else {
            return bad_request(json!({ "ingredients": [format!("Unknown ingredient {}", id)] }));
        };
        ingredients.push(json!({
            "ingredient_id": id,
            "ingredient_name": ingredient["name"],
            "quantity": ri["quantity"],
            "unit": ri["unit"],
            "notes": null,
        }));
    }
    let tags = body["dietary_tags"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|id| db.tags.iter().find(|t| t["id"] == *id))
        .map(|t| t["name"].clone())
        .collect::<Vec<_>>();
    let author = db.users.first().map(|u| u.username.clone());
    let row = json!({
        "id": db.next_id(),
        "title": title,
        "description": body["description"].as_str().unwrap_or_default(),
        "cooking_time_minutes": body["cooking_time_minutes"],
        "difficulty": body["difficulty"],
        "cuisine_type": body["cuisine_type"],
        "author_username": author,
        "dietary_tags": tags,
        "recipe_ingredients": ingredients,
        "steps": body["steps"].as_array().cloned().unwrap_or_default(),
        "main_image": null,
    });
    db.recipes.push(row.clone());
    created(db.recipe_out(&row))
}

async fn get_recipe(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let db = lock(&db);
    match db.recipe_index(id) {
        Some(i) => ok(db.recipe_out(&db.recipes[i])),
        None => not_found(),
    }
}

async fn update_recipe(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut db = lock(&db);
    let Some(i) = db.recipe_index(id) else {
        return not_found();
    };
    if let Some(changes) = body.as_object() {
        for (field, value) in changes {
            if field != "id" && field != "is_favorited" {
                db.recipes[i][field] = value.clone();
            }
        }
    }
    ok(db.recipe_out(&db.recipes[i]))
}

async fn delete_recipe(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    let Some(i) = db.recipe_index(id) else {
        return not_found();
    };
    db.recipes.remove(i);
    db.favorites.remove(&id);
    db.reviews.retain(|(rid, _)| *rid != id);
    no_content()
}

async fn favorite(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    if db.recipe_index(id).is_none() {
        return not_found();
    }
    if !db.favorites.insert(id) {
        return bad_request(json!({ "detail": "Recipe is already in favorites." }));
    }
    created(json!({ "detail": "Recipe added to favorites." }))
}

async fn unfavorite(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    if !db.favorites.remove(&id) {
        return not_found();
    }
    no_content()
}

async fn add_recipe_to_list(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut db = lock(&db);
    let Some(i) = db.recipe_index(id) else {
        return not_found();
    };
    let recipe = db.recipes[i].clone();
    let mut added = 0;
    for ri in recipe["recipe_ingredients"].as_array().cloned().unwrap_or_default() {
        if db.shopping.iter().any(|s| s["ingredient"] == ri["ingredient_id"]) {
            continue;
        }
        let body = json!({
            "ingredient": ri["ingredient_id"],
            "quantity": ri["quantity"],
            "unit": ri["unit"],
        });
        let extra = json!({ "is_purchased": false, "source_recipe": recipe["title"] });
        if let Ok(row) = db.pantry_row(&body, extra) {
            db.shopping.push(row);
            added += 1;
        }
    }
    ok(json!({ "detail": format!("Added {} ingredients to your shopping list.", added) }))
}

async fn list_reviews(State(db): State<Shared>, Path(id): Path<u64>) -> Response {
    let db = lock(&db);
    if db.recipe_index(id).is_none() {
        return not_found();
    }
    let reviews = db
        .reviews
        .iter()
        .filter(|(rid, _)| *rid == id)
        .map(|(_, r)| r.clone())
        .collect::<Vec<_>>();
    ok(Value::Array(reviews))
}

fn check_rating(v: &Value) -> Option<Response> {
    match v.as_u64() {
        Some(1..=5) => None,
        _ => Some(bad_request(json!({
            "rating": ["Ensure this value is between 1 and 5."]
        }))),
    }
}

async fn add_review(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut db = lock(&db);
    if db.recipe_index(id).is_none() {
        return not_found();
    }
    if let Some(resp) = check_rating(&body["rating"]) {
        return resp;
    }
    let author = db.users.first().map(|u| u.username.clone());
    let review = json!({
        "id": db.next_id(),
        "rating": body["rating"],
        "comment": body["comment"].as_str().unwrap_or_default(),
        "author_username": author,
        "created_at": "2026-01-01T00:00:00Z",
    });
    db.reviews.push((id, review.clone()));
    created(review)
}

async fn update_review(
    State(db): State<Shared>,
    Path((rid, id)): Path<(u64, u64)>,
    Json(body): Json<Value>,
) -> Response {
    let mut db = lock(&db);
    if let Some(rating) = body.get("rating")
        && let Some(resp) = check_rating(rating)
    {
        return resp;
    }
    let Some((_, review)) = db
        .reviews
        .iter_mut()
        .find(|(r, rev)| *r == rid && rev["id"] == id)
    else {
        return not_found();
    };
    for field in ["rating", "comment"] {
        if let Some(v) = body.get(field) {
            review[field] = v.clone();
        }
    }
    ok(review.clone())
}

async fn delete_review(
    State(db): State<Shared>,
    Path((rid, id)): Path<(u64, u64)>,
) -> Response {
    let mut db = lock(&db);
    let before = db.reviews.len();
    db.reviews.retain(|(r, rev)| !(*r == rid && rev["id"] == id));
    if db.reviews.len() == before {
        return not_found();
    }
    no_content()
}
