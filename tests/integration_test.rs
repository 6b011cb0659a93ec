// Integration tests for crud-console
// An in-process axum server stands in for the REST backend.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crud_console::ApiError;
use crud_console::api::{ApiClient, EntityId, ProductDraft, UserDraft};
use crud_console::app::effects::execute;
use crud_console::app::keymap::{KeyAction, Keymap};
use crud_console::app::list::ListState;
use crud_console::app::update::{apply_response, handle_key};
use crud_console::app::{ActivePage, AppRequest, AppState, Theme};

const CREATED_AT: &str = "2024-05-01T12:00:00Z";

#[derive(Default)]
struct Store {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
    fail: bool,
}

type Shared = Arc<Mutex<Store>>;

/// Passwords are stored but never returned.
fn public(v: &Value) -> Value {
    let mut v = v.clone();
    if let Some(obj) = v.as_object_mut() {
        obj.remove("password");
    }
    v
}

async fn list(State(store): State<Shared>, Path(collection): Path<String>) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = store.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if store.fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let items = store.collections.get(&collection).map(|c| c.iter().map(public).collect()).unwrap_or_default();
    Ok(Json(items))
}

async fn create(
    State(store): State<Shared>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut store = store.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if store.fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let Value::Object(mut obj) = body else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    store.next_id += 1;
    if collection == "users" {
        if !obj.contains_key("password") {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        // string ids on this side, numeric ids for products
        obj.insert("id".into(), json!(format!("u{}", store.next_id)));
        obj.insert("created_at".into(), json!(CREATED_AT));
    } else {
        obj.insert("id".into(), json!(store.next_id));
    }
    let entity = Value::Object(obj);
    store.collections.entry(collection).or_default().push(entity.clone());
    Ok((StatusCode::CREATED, Json(public(&entity))))
}

fn id_matches(v: &Value, id: &str) -> bool {
    match &v["id"] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

async fn update(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = store.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if store.fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let items = store.collections.get_mut(&collection).ok_or(StatusCode::NOT_FOUND)?;
    let existing = items.iter_mut().find(|v| id_matches(v, &id)).ok_or(StatusCode::NOT_FOUND)?;
    let (Some(target), Value::Object(patch)) = (existing.as_object_mut(), body) else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    for (k, v) in patch {
        if k != "id" && k != "created_at" {
            target.insert(k, v);
        }
    }
    Ok(Json(public(existing)))
}

async fn remove(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> StatusCode {
    let Ok(mut store) = store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };
    if store.fail {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let Some(items) = store.collections.get_mut(&collection) else {
        return StatusCode::NOT_FOUND;
    };
    let before = items.len();
    items.retain(|v| !id_matches(v, &id));
    if items.len() == before { StatusCode::NOT_FOUND } else { StatusCode::NO_CONTENT }
}

async fn spawn_backend() -> (ApiClient, Shared) {
    let store = Shared::default();
    let app = Router::new()
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", put(update).delete(remove))
        .with_state(store.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (ApiClient::new(format!("http://{addr}/")), store)
}

fn stored(store: &Shared, collection: &str) -> Vec<Value> {
    store.lock().expect("lock").collections.get(collection).cloned().unwrap_or_default()
}

fn lamp() -> ProductDraft {
    ProductDraft {
        name: "Lamp".into(),
        description: "Desk lamp".into(),
        price: 19.99,
        category: "home".into(),
        tags: vec!["light".into()],
        in_stock: true,
    }
}

/// Execute `req` and every follow-up request it triggers.
async fn settle(app: &mut AppState, api: &ApiClient, req: Option<AppRequest>) {
    let mut next = req;
    while let Some(req) = next {
        let resp = execute(api, req).await;
        next = apply_response(app, resp);
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut AppState, s: &str) {
    for c in s.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}

fn save() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
}

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    std::env::temp_dir().join(format!("crud_console_{}_{}_{}", name, std::process::id(), nanos))
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[tokio::test]
    async fn product_lifecycle_against_backend() {
        let (api, store) = spawn_backend().await;
        let products = api.products();
        assert!(products.list().await.expect("list").is_empty());

        let created = products.create(&lamp()).await.expect("create");
        assert_eq!(created.name, "Lamp");
        assert_eq!(created.tags, vec!["light"]);
        let listed = products.list().await.expect("list");
        assert_eq!(listed, vec![created.clone()]);

        let mut draft = lamp();
        draft.price = 24.5;
        draft.in_stock = false;
        let updated = products.update(&created.id, &draft).await.expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 24.5);
        assert!(!updated.in_stock);

        products.create(&lamp()).await.expect("second create");
        products.delete(&created.id).await.expect("delete");
        let rest = products.list().await.expect("list");
        assert_eq!(rest.len(), 1);
        assert_ne!(rest[0].id, created.id);
        assert_eq!(stored(&store, "products").len(), 1);
    }

    #[tokio::test]
    async fn user_update_without_password_keeps_it() {
        let (api, store) = spawn_backend().await;
        let users = api.users();
        let created = users
            .create(&UserDraft {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: Some("first-secret".into()),
            })
            .await
            .expect("create");
        assert_eq!(created.id.as_str(), "u1");
        assert_eq!(created.created_at, CREATED_AT);

        let updated = users
            .update(
                &created.id,
                &UserDraft { name: "Ada L.".into(), email: "ada@example.com".into(), password: None },
            )
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.created_at, CREATED_AT);
        assert_eq!(stored(&store, "users")[0]["password"], "first-secret");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (api, store) = spawn_backend().await;
        store.lock().expect("lock").fail = true;
        match api.products().list().await {
            Err(ApiError::Status { status, url, .. }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(url.ends_with("/products"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        store.lock().expect("lock").fail = false;
        let missing = api.products().delete(&EntityId::new("404")).await;
        assert!(matches!(missing, Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let api = ApiClient::new("http://127.0.0.1:1");
        assert!(matches!(api.users().list().await, Err(ApiError::Http(_))));
    }
}

#[cfg(test)]
mod flow_tests {
    use super::*;

    fn product_names(app: &AppState) -> Vec<String> {
        match &app.page {
            ActivePage::Products(p) => p.list.items().iter().map(|p| p.name.clone()).collect(),
            ActivePage::Users(_) => panic!("not on products"),
        }
    }

    #[tokio::test]
    async fn create_then_delete_through_the_keyboard() {
        let (api, store) = spawn_backend().await;
        let (mut app, first) = AppState::new(api.base_url(), Theme::dark(), Keymap::default());
        settle(&mut app, &api, Some(first)).await;
        assert!(product_names(&app).is_empty());

        handle_key(&mut app, key(KeyCode::Char('i')));
        for (i, text) in ["Lamp", "Desk lamp", "19.99", "home", "light, desk"].iter().enumerate() {
            if i > 0 {
                handle_key(&mut app, key(KeyCode::Tab));
            }
            type_text(&mut app, text);
        }
        let req = handle_key(&mut app, save());
        assert!(req.is_some());
        settle(&mut app, &api, req).await;

        assert_eq!(product_names(&app), vec!["Lamp"]);
        assert_eq!(stored(&store, "products")[0]["tags"], json!(["light", "desk"]));

        // back to the list, decline once, then confirm
        handle_key(&mut app, key(KeyCode::Esc));
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(handle_key(&mut app, key(KeyCode::Char('n'))).is_none());
        assert_eq!(product_names(&app), vec!["Lamp"]);

        handle_key(&mut app, key(KeyCode::Char('d')));
        let req = handle_key(&mut app, key(KeyCode::Char('y')));
        settle(&mut app, &api, req).await;
        assert!(product_names(&app).is_empty());
        assert!(stored(&store, "products").is_empty());
    }

    #[tokio::test]
    async fn editing_a_user_with_blank_password_keeps_it() {
        let (api, store) = spawn_backend().await;
        api.users()
            .create(&UserDraft {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: Some("first-secret".into()),
            })
            .await
            .expect("seed");

        let (mut app, first) = AppState::new(api.base_url(), Theme::dark(), Keymap::default());
        settle(&mut app, &api, Some(first)).await;
        let req = handle_key(&mut app, key(KeyCode::Tab));
        settle(&mut app, &api, req).await;

        handle_key(&mut app, key(KeyCode::Enter));
        type_text(&mut app, " Lovelace");
        let req = handle_key(&mut app, save());
        settle(&mut app, &api, req).await;

        let ActivePage::Users(page) = &app.page else {
            panic!("not on users");
        };
        assert!(page.edit_target.is_none());
        assert_eq!(page.refresh, 1);
        let users = page.list.items();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ada Lovelace");
        assert_eq!(users[0].created_at, CREATED_AT);
        assert_eq!(stored(&store, "users")[0]["password"], "first-secret");
    }

    #[tokio::test]
    async fn failed_fetch_shows_the_error_text() {
        let (api, store) = spawn_backend().await;
        store.lock().expect("lock").fail = true;
        let (mut app, first) = AppState::new(api.base_url(), Theme::dark(), Keymap::default());
        settle(&mut app, &api, Some(first)).await;
        match &app.page {
            ActivePage::Products(p) => {
                assert_eq!(p.list.state, ListState::Errored("Failed to fetch products".into()))
            }
            ActivePage::Users(_) => panic!("not on products"),
        }
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft() {
        let (api, store) = spawn_backend().await;
        let (mut app, first) = AppState::new(api.base_url(), Theme::dark(), Keymap::default());
        settle(&mut app, &api, Some(first)).await;
        store.lock().expect("lock").fail = true;

        handle_key(&mut app, key(KeyCode::Char('i')));
        for (i, text) in ["Lamp", "Desk lamp", "5", "home"].iter().enumerate() {
            if i > 0 {
                handle_key(&mut app, key(KeyCode::Down));
            }
            type_text(&mut app, text);
        }
        let req = handle_key(&mut app, save());
        settle(&mut app, &api, req).await;

        let ActivePage::Products(page) = &app.page else {
            panic!("not on products");
        };
        assert_eq!(page.form.error.as_deref(), Some("Failed to create product"));
        assert_eq!(page.form.values[0].as_text(), "Lamp");
        assert!(!page.form.loading);
        assert_eq!(page.refresh, 0);
    }
}

#[cfg(test)]
mod config_file_tests {
    use super::*;

    #[test]
    fn theme_file_round_trip() {
        let path = temp_path("theme.conf");
        let theme = Theme::load_or_init(&path);
        assert!(path.exists());
        assert_eq!(Theme::from_file(&path), Some(theme));

        std::fs::write(&path, "# custom\nerror_fg = #FF0000\nbogus = #000000\nmuted = nothex\n").expect("write");
        let custom = Theme::load_or_init(&path);
        assert_eq!(custom.error_fg, ratatui::style::Color::Rgb(0xFF, 0, 0));
        assert_eq!(custom.muted, Theme::mocha().muted);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn keymap_file_overrides_defaults() {
        let path = temp_path("keybinds.conf");
        let defaults = Keymap::load_or_init(&path);
        assert!(path.exists());
        let reread = Keymap::load_or_init(&path);
        assert_eq!(reread.keys_for(KeyAction::Quit), defaults.keys_for(KeyAction::Quit));

        std::fs::write(&path, "Reload = F5\nDeleteSelection = Ctrl+x\nNotAnAction = z\n").expect("write");
        let km = Keymap::load_or_init(&path);
        assert_eq!(km.resolve(&key(KeyCode::F(5))), Some(KeyAction::Reload));
        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(KeyAction::DeleteSelection)
        );
        // defaults stay bound
        assert_eq!(km.resolve(&key(KeyCode::Char('r'))), Some(KeyAction::Reload));
        let _ = std::fs::remove_file(&path);
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crud_console::api::Product;
    use crud_console::app::{AppResponse, Outcome, Response};

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).expect("terminal");
        terminal.draw(|f| crud_console::ui::render(f, app)).expect("draw");
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded_app() -> AppState {
        let (mut app, first) = AppState::new("http://backend.test", Theme::dark(), Keymap::default());
        let AppRequest::Products(req) = first else {
            panic!("products is the default route");
        };
        let lamp = Product {
            id: EntityId::new("1"),
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 19.99,
            category: "home".into(),
            tags: vec!["light".into()],
            in_stock: true,
        };
        apply_response(
            &mut app,
            AppResponse::Products(Response { ticket: req.ticket, outcome: Outcome::Fetched(Ok(vec![lamp])) }),
        );
        app
    }

    #[test]
    fn loading_screen_shows_navigation_and_placeholder() {
        let (app, _) = AppState::new("http://backend.test", Theme::dark(), Keymap::default());
        let text = screen(&app);
        assert!(text.contains("CRUD API Manager"));
        assert!(text.contains("Products"));
        assert!(text.contains("Users"));
        assert!(text.contains("Loading products..."));
        assert!(text.contains("Create New Product"));
    }

    #[test]
    fn loaded_list_renders_rows() {
        let text = screen(&loaded_app());
        assert!(text.contains("Lamp"));
        assert!(text.contains("$19.99"));
    }

    #[test]
    fn pending_delete_shows_the_prompt() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Char('d')));
        let text = screen(&app);
        assert!(text.contains("Are you sure you want to delete this product?"));
    }
}
