//! Inventory page and item mutation handlers.
//!
//! ```text
//! GET  /                  inventory list (signed-in only)
//! POST /add_item          item_name=..&quantity=..
//! POST /delete_item/{id}  csrf_token=..
//! ```
//!
//! Anonymous requests are sent to `/login`; only the list page leaves a
//! message explaining why. Bodies and path segments are extracted
//! fallibly so the session check runs before any of them is judged.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::domain::{Error, ItemId, NewInventoryItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::forms::{DeleteItemForm, NewItemForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

/// Flash shown when an anonymous visitor opens the inventory.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access the inventory.";
/// Flash shown after an item is stored.
pub const ITEM_ADDED_MESSAGE: &str = "Item added successfully.";
/// Flash shown after an item is removed.
pub const ITEM_DELETED_MESSAGE: &str = "Item deleted successfully.";

/// Render every item for a signed-in user.
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        session.push_flash(Flash::info(LOGIN_REQUIRED_MESSAGE))?;
        return Ok(views::redirect("/login"));
    }

    let items = state.inventory.list_items().await?;
    let token = session.confirmation_token()?;
    let flashes = session.take_flashes()?;
    Ok(views::html(
        StatusCode::OK,
        views::inventory_page(&items, &token, &flashes),
    ))
}

/// Validate and store a new item.
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Result<web::Form<NewItemForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(views::redirect("/login"));
    }
    let form = form
        .map_err(|err| Error::invalid_request(format!("Unreadable item form: {err}")))?
        .into_inner();

    let item = match NewInventoryItem::try_from(form) {
        Ok(item) => item,
        Err(err) => {
            session.push_flash(Flash::danger(err.to_string()))?;
            return Ok(views::redirect("/"));
        }
    };

    state.inventory_command.add_item(&item).await?;
    session.push_flash(Flash::success(ITEM_ADDED_MESSAGE))?;
    Ok(views::redirect("/"))
}

/// Remove an item after checking the form's confirmation token.
///
/// An unreadable body carries no token and is forbidden. An id that is not a
/// positive 32-bit integer can never name a stored item and is reported as
/// not found.
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: Result<web::Form<DeleteItemForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(views::redirect("/login"));
    }
    let submitted = form
        .map(|form| form.into_inner().csrf_token)
        .unwrap_or_default();
    session.verify_confirmation_token(&submitted)?;

    let raw = path.into_inner();
    let id = raw
        .parse::<i32>()
        .ok()
        .and_then(|value| ItemId::new(value).ok())
        .ok_or_else(|| Error::not_found(format!("inventory item {raw} not found")))?;

    state.inventory_command.delete_item(id).await?;
    session.push_flash(Flash::success(ITEM_DELETED_MESSAGE))?;
    Ok(views::redirect("/"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::dev::ServiceResponse;
    use actix_web::http::header;
    use actix_web::{App, test as actix_test};

    use super::*;
    use crate::domain::ports::{
        MockInventoryCommand, MockInventoryQuery, MockLoginService, MockRegistrationService,
    };
    use crate::domain::{InventoryItem, ItemName, Quantity};
    use crate::inbound::http::session::USER_ID_KEY;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn laptop() -> InventoryItem {
        InventoryItem::new(
            ItemId::new(1).expect("valid id"),
            ItemName::new("Laptop").expect("valid name"),
            Quantity::new(5).expect("valid quantity"),
        )
    }

    fn state(query: MockInventoryQuery, command: MockInventoryCommand) -> HttpState {
        HttpState::new(
            Arc::new(MockLoginService::new()),
            Arc::new(MockRegistrationService::new()),
            Arc::new(query),
            Arc::new(command),
        )
    }

    macro_rules! inventory_app {
        ($state:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .wrap(test_session_middleware())
                    .route("/", web::get().to(index))
                    .route("/add_item", web::post().to(add_item))
                    .route("/delete_item/{id}", web::post().to(delete_item))
                    .route(
                        "/sign-in",
                        web::get().to(|session: actix_session::Session| async move {
                            session.insert(USER_ID_KEY, 1).expect("store user id");
                            HttpResponse::Ok()
                        }),
                    ),
            )
            .await
        };
    }

    fn location(res: &ServiceResponse) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("redirect has a location")
    }

    async fn body_text(res: ServiceResponse) -> String {
        String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("UTF-8 body")
    }

    fn token_from(page: &str) -> String {
        let marker = r#"name="csrf_token" value=""#;
        let start = page.find(marker).expect("page embeds a token") + marker.len();
        page[start..start + 64].to_owned()
    }

    #[actix_web::test]
    async fn anonymous_index_redirects_with_message() {
        let mut query = MockInventoryQuery::new();
        query.expect_list_items().never();
        let app = inventory_app!(state(query, MockInventoryCommand::new()));

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
        assert!(session_cookie(&res).is_some(), "flash is stored for the login page");
    }

    #[actix_web::test]
    async fn anonymous_mutations_redirect_without_side_effects() {
        let mut command = MockInventoryCommand::new();
        command.expect_add_item().never();
        command.expect_delete_item().never();
        let app = inventory_app!(state(MockInventoryQuery::new(), command));

        let add = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_item")
                .set_form([("item_name", "Laptop"), ("quantity", "5")])
                .to_request(),
        )
        .await;
        assert_eq!(add.status(), StatusCode::FOUND);
        assert_eq!(location(&add), "/login");

        let delete = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/1")
                .set_form([("csrf_token", "x")])
                .to_request(),
        )
        .await;
        assert_eq!(delete.status(), StatusCode::FOUND);
        assert_eq!(location(&delete), "/login");
    }

    #[rstest::rstest]
    #[case("/add_item")]
    #[case("/delete_item/1")]
    #[case("/delete_item/abc")]
    #[actix_web::test]
    async fn anonymous_bodyless_posts_redirect_to_login(#[case] uri: &'static str) {
        let mut command = MockInventoryCommand::new();
        command.expect_add_item().never();
        command.expect_delete_item().never();
        let app = inventory_app!(state(MockInventoryQuery::new(), command));

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri(uri).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
    }

    /// Sign in through the helper route and open the inventory page,
    /// yielding the session cookie and the page's confirmation token.
    macro_rules! open_inventory {
        ($app:expr) => {{
            let sign_in = actix_test::call_service(
                &$app,
                actix_test::TestRequest::get().uri("/sign-in").to_request(),
            )
            .await;
            let cookie = session_cookie(&sign_in).expect("session cookie");
            let page = actix_test::call_service(
                &$app,
                actix_test::TestRequest::get()
                    .uri("/")
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(page.status(), StatusCode::OK);
            let cookie = session_cookie(&page).unwrap_or(cookie);
            let token = token_from(&body_text(page).await);
            (cookie, token)
        }};
    }

    fn listing(items: Vec<InventoryItem>) -> MockInventoryQuery {
        let mut query = MockInventoryQuery::new();
        query
            .expect_list_items()
            .returning(move || Ok(items.clone()));
        query
    }

    #[actix_web::test]
    async fn index_lists_items_and_embeds_token() {
        let app = inventory_app!(state(listing(vec![laptop()]), MockInventoryCommand::new()));

        let (cookie, token) = open_inventory!(app);
        let again = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;

        let page = body_text(again).await;
        assert!(page.contains("<td>Laptop</td><td>5</td>"));
        assert_eq!(token_from(&page), token, "token is stable within a session");
    }

    #[actix_web::test]
    async fn add_item_stores_and_redirects_home() {
        let mut command = MockInventoryCommand::new();
        command
            .expect_add_item()
            .withf(|item| item.name().as_ref() == "Laptop" && item.quantity().get() == 5)
            .times(1)
            .returning(|_| Ok(laptop()));
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, _) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_item")
                .cookie(cookie)
                .set_form([("item_name", " Laptop "), ("quantity", "5")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");
        let cookie = session_cookie(&res).expect("flash stored");

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert!(body_text(page).await.contains(ITEM_ADDED_MESSAGE));
    }

    #[rstest::rstest]
    #[case("five", "Quantity must be a whole number.")]
    #[case("-1", "Quantity must not be negative.")]
    #[case("", "Quantity must be a whole number.")]
    #[actix_web::test]
    async fn invalid_quantity_is_reported_and_not_stored(
        #[case] quantity: &'static str,
        #[case] message: &'static str,
    ) {
        let mut command = MockInventoryCommand::new();
        command.expect_add_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, _) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_item")
                .cookie(cookie)
                .set_form([("item_name", "Laptop"), ("quantity", quantity)])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");
        let cookie = session_cookie(&res).expect("flash stored");

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert!(body_text(page).await.contains(message));
    }

    #[actix_web::test]
    async fn delete_with_valid_token_removes_item() {
        let mut command = MockInventoryCommand::new();
        command
            .expect_delete_item()
            .withf(|id| id.get() == 1)
            .times(1)
            .returning(|_| Ok(()));
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, token) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/1")
                .cookie(cookie)
                .set_form([("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");
    }

    #[actix_web::test]
    async fn delete_with_wrong_token_is_forbidden() {
        let mut command = MockInventoryCommand::new();
        command.expect_delete_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, _) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/1")
                .cookie(cookie)
                .set_form([("csrf_token", "0".repeat(64).as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_of_missing_item_is_not_found() {
        let mut command = MockInventoryCommand::new();
        command
            .expect_delete_item()
            .returning(|id| Err(Error::not_found(format!("inventory item {id} not found"))));
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, token) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/42")
                .cookie(cookie)
                .set_form([("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_of_non_positive_id_is_not_found_without_store_access() {
        let mut command = MockInventoryCommand::new();
        command.expect_delete_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, token) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/0")
                .cookie(cookie)
                .set_form([("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn signed_in_bodyless_add_is_a_bad_request() {
        let mut command = MockInventoryCommand::new();
        command.expect_add_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, _) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_item")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn signed_in_bodyless_delete_is_forbidden() {
        let mut command = MockInventoryCommand::new();
        command.expect_delete_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, _) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/1")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_of_non_numeric_id_is_not_found() {
        let mut command = MockInventoryCommand::new();
        command.expect_delete_item().never();
        let app = inventory_app!(state(listing(vec![laptop()]), command));
        let (cookie, token) = open_inventory!(app);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/delete_item/abc")
                .cookie(cookie)
                .set_form([("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(body_text(res).await.contains("inventory item abc not found"));
    }
}
