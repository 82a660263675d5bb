use bazar_lib::detail::DetailState;
use bazar_lib::form::{SelectedFile, SubmitOutcome};
use bazar_lib::search::RenderState;
use bazar_lib::types::Item;
use bazar_lib::{Level, Location, Page, PageLimit, Shell};
use bazar_api::Client;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH: &str = include_str!("../../bazar_api/tests/fixtures/search.json");
const SEARCH_EMPTY: &str = include_str!("../../bazar_api/tests/fixtures/search_empty.json");
const ITEM: &str = include_str!("../../bazar_api/tests/fixtures/item.json");
const CREATED: &str = include_str!("../../bazar_api/tests/fixtures/created.json");

async fn shell_at(server: &MockServer, href: &str) -> Shell<Client> {
    let client = Client::with_base_url(&server.uri()).unwrap();
    Shell::new(client, Location::parse(href))
}

#[tokio::test]
async fn search_page_paginates_through_the_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("search", "zapatillas"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_EMPTY))
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/items?search=zapatillas&page=2&limit=5").await;
    match shell.load().await {
        Page::Search {
            query,
            state,
            controls,
        } => {
            assert_eq!(query, "zapatillas");
            assert_eq!(
                state.heading().unwrap(),
                "Resultados para \"zapatillas\" (2)"
            );
            assert_eq!(controls.unwrap().label(), "Página 2 de 6");
        }
        other => panic!("unexpected page {:?}", other),
    }

    // Same URL again: no second request.
    assert!(matches!(shell.load().await, Page::Search { .. }));

    assert!(shell.next_page());
    assert_eq!(
        shell.location().href(),
        "/items?search=zapatillas&page=3&limit=5"
    );
    assert_eq!(shell.history().len(), 1);

    match shell.load().await {
        Page::Search { state, .. } => assert_eq!(
            state,
            &RenderState::Empty {
                query: "zapatillas".to_string()
            }
        ),
        other => panic!("unexpected page {:?}", other),
    }
}

#[tokio::test]
async fn changing_limit_resets_page_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH))
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/items?search=zapatillas&page=4").await;
    shell.load().await;

    assert!(shell.set_limit(PageLimit::Fifteen));
    assert_eq!(shell.pagination().current_page(), 1);
    assert_eq!(
        shell.location().href(),
        "/items?search=zapatillas&page=1&limit=15"
    );
    shell.load().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let last = requests[1].url.query().unwrap_or_default().to_string();
    assert!(last.contains("page=1"));
    assert!(last.contains("limit=15"));
}

#[tokio::test]
async fn back_resyncs_pagination_from_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH))
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/items?search=mesa&page=2&limit=5").await;
    shell.load().await;
    shell.navigate("/items?search=silla");
    shell.load().await;
    assert_eq!(shell.pagination().current_page(), 1);
    assert_eq!(shell.pagination().limit(), PageLimit::Ten);

    assert!(shell.back());
    shell.load().await;
    assert_eq!(shell.pagination().current_page(), 2);
    assert_eq!(shell.pagination().limit(), PageLimit::Five);
}

#[tokio::test]
async fn blank_search_shows_no_query_without_fetching() {
    let server = MockServer::start().await;
    let mut shell = shell_at(&server, "/").await;
    assert!(matches!(shell.load().await, Page::Home));

    assert!(!shell.search("   "));
    shell.navigate("/items?search=");
    match shell.load().await {
        Page::Search { state, .. } => assert_eq!(state, &RenderState::NoQuery),
        other => panic!("unexpected page {:?}", other),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn detail_page_loads_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/66a1f0c2e4b0a1b2c3d4e5f6"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ITEM))
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/items/66a1f0c2e4b0a1b2c3d4e5f6").await;
    match shell.load().await {
        Page::Detail(DetailState::Loaded(item)) => {
            assert_eq!(item.title, "Zapatillas de running");
            assert_eq!(item.images.len(), 3);
        }
        other => panic!("unexpected page {:?}", other),
    }
}

#[tokio::test]
async fn detail_failure_notifies_and_keeps_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Producto no encontrado"})),
        )
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/items/missing").await;
    assert!(matches!(
        shell.load().await,
        Page::Detail(DetailState::Loading)
    ));

    let notes = shell.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].description.as_deref(), Some("Producto no encontrado"));
}

#[tokio::test]
async fn create_page_submits_and_redirects_home() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create"))
        .and(body_string_contains("Lámpara de escritorio"))
        .respond_with(ResponseTemplate::new(201).set_body_string(CREATED))
        .expect(1)
        .mount(&server)
        .await;

    let mut shell = shell_at(&server, "/create").await;
    assert!(matches!(shell.load().await, Page::Create(_)));

    let form = shell.form_mut().unwrap();
    let draft = form.draft_mut();
    draft.title = "Lámpara de escritorio".to_string();
    draft.description = "Lámpara LED regulable con brazo articulado.".to_string();
    draft.price = "34.90".to_string();
    draft.brand = "Luz".to_string();
    draft.stock = "8".to_string();
    form.set_category("home");
    form.select_images(vec![SelectedFile::new(
        "lampara.png",
        "image/png",
        b"PNG-DATA".to_vec(),
    )]);
    assert_eq!(shell.store().live_count(), 1);

    let outcome = shell.submit_form().await.unwrap().unwrap();
    let created: Item = match outcome {
        SubmitOutcome::Created { item, .. } => item,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(created.id, "66b2a7d9e4b0a1b2c3d4e600");
    assert_eq!(shell.location().href(), "/");
    assert_eq!(shell.store().live_count(), 0);

    let notes = shell.drain_notifications();
    assert_eq!(notes[0].level, Level::Success);
    assert_eq!(notes[0].title, "Producto creado");

    assert!(matches!(shell.load().await, Page::Home));
    assert!(shell.form_mut().is_none());
}

#[tokio::test]
async fn leaving_create_page_drops_draft_and_previews() {
    let server = MockServer::start().await;
    let mut shell = shell_at(&server, "/create").await;
    shell.load().await;
    shell
        .form_mut()
        .unwrap()
        .select_images(vec![SelectedFile::new("a.png", "image/png", vec![1])]);
    assert_eq!(shell.store().live_count(), 1);

    shell.navigate("/nowhere");
    assert!(matches!(shell.load().await, Page::NotFound(p) if p == "/nowhere"));
    assert_eq!(shell.store().live_count(), 0);
    assert!(shell.submit_form().await.is_none());
}
