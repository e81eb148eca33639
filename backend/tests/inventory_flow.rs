//! End-to-end coverage of the HTML flow against a real SQLite file.
//!
//! Each test starts from an empty database and drives the app through the
//! same requests a browser would send.

mod support;

use actix_web::http::StatusCode;
use inventory::domain::{DUPLICATE_USERNAME_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
use inventory::inbound::http::auth::{LOGGED_IN_MESSAGE, LOGGED_OUT_MESSAGE, REGISTERED_MESSAGE};
use inventory::inbound::http::inventory::{
    ITEM_ADDED_MESSAGE, ITEM_DELETED_MESSAGE, LOGIN_REQUIRED_MESSAGE,
};
use rstest::rstest;

#[rstest]
#[actix_rt::test]
async fn register_login_manage_items_and_logout() {
    let (_db, mut browser) = support::open().await;
    let alice = [("username", "alice"), ("password", "pw123")];

    browser.post("/register", &alice).await.assert_redirect("/login");
    let login_page = browser.get("/login").await;
    assert!(login_page.body.contains(REGISTERED_MESSAGE));

    browser.post("/register", &alice).await.assert_redirect("/register");
    let register_page = browser.get("/register").await;
    assert!(register_page.body.contains(DUPLICATE_USERNAME_MESSAGE));

    let rejected = browser
        .post("/login", &[("username", "alice"), ("password", "wrong")])
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert!(rejected.body.contains(INVALID_CREDENTIALS_MESSAGE));

    browser.post("/login", &alice).await.assert_redirect("/");
    let empty = browser.get("/").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.body.contains(LOGGED_IN_MESSAGE));
    assert!(empty.body.contains("No items yet."));

    browser
        .post("/add_item", &[("item_name", "Laptop"), ("quantity", "5")])
        .await
        .assert_redirect("/");
    browser
        .post("/add_item", &[("item_name", "Monitor"), ("quantity", "10")])
        .await
        .assert_redirect("/");

    let listed = browser.get("/").await;
    assert!(listed.body.contains(ITEM_ADDED_MESSAGE));
    assert!(listed.body.contains("<td>Laptop</td><td>5</td>"));
    assert!(listed.body.contains("<td>Monitor</td><td>10</td>"));
    let laptop = listed.item_id("Laptop").expect("laptop row");
    let monitor = listed.item_id("Monitor").expect("monitor row");
    assert!(laptop < monitor, "items are listed in insertion order");
    assert!(
        listed.body.find("Laptop") < listed.body.find("Monitor"),
        "lower ids render first"
    );

    let token = listed.confirmation_token().expect("token on page");
    browser
        .post(&format!("/delete_item/{laptop}"), &[("csrf_token", token.as_str())])
        .await
        .assert_redirect("/");

    let after_delete = browser.get("/").await;
    assert!(after_delete.body.contains(ITEM_DELETED_MESSAGE));
    assert!(!after_delete.body.contains("<td>Laptop</td>"));
    assert!(after_delete.body.contains("<td>Monitor</td><td>10</td>"));

    browser.get("/logout").await.assert_redirect("/login");
    let signed_out = browser.get("/login").await;
    assert!(signed_out.body.contains(LOGGED_OUT_MESSAGE));
    browser.get("/").await.assert_redirect("/login");
}

#[rstest]
#[actix_rt::test]
async fn anonymous_visitors_are_sent_to_login() {
    let (_db, mut browser) = support::open().await;

    browser.get("/").await.assert_redirect("/login");
    let login_page = browser.get("/login").await;
    assert!(login_page.body.contains(LOGIN_REQUIRED_MESSAGE));

    browser
        .post("/add_item", &[("item_name", "Laptop"), ("quantity", "5")])
        .await
        .assert_redirect("/login");
    browser
        .post("/delete_item/1", &[("csrf_token", "anything")])
        .await
        .assert_redirect("/login");
}

#[rstest]
#[case("/add_item")]
#[case("/delete_item/1")]
#[case("/delete_item/not-a-number")]
#[actix_rt::test]
async fn anonymous_posts_without_a_body_are_sent_to_login(#[case] uri: &'static str) {
    let (_db, mut browser) = support::open().await;

    browser.post_empty(uri).await.assert_redirect("/login");
}

#[rstest]
#[case("Laptop", "five", "Quantity must be a whole number.")]
#[case("Laptop", "-1", "Quantity must not be negative.")]
#[case("   ", "5", "Item name must not be empty.")]
#[actix_rt::test]
async fn invalid_items_are_rejected_with_a_message(
    #[case] name: &'static str,
    #[case] quantity: &'static str,
    #[case] message: &'static str,
) {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("bob", "secret").await;

    browser
        .post("/add_item", &[("item_name", name), ("quantity", quantity)])
        .await
        .assert_redirect("/");

    let page = browser.get("/").await;
    assert!(page.body.contains(message), "body: {}", page.body);
    assert!(page.body.contains("No items yet."));
}

#[rstest]
#[actix_rt::test]
async fn deleting_requires_the_page_token() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("carol", "secret").await;
    browser
        .post("/add_item", &[("item_name", "Keyboard"), ("quantity", "3")])
        .await
        .assert_redirect("/");
    let page = browser.get("/").await;
    let id = page.item_id("Keyboard").expect("keyboard row");

    let forged = browser
        .post(&format!("/delete_item/{id}"), &[("csrf_token", "forged")])
        .await;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);

    let still_there = browser.get("/").await;
    assert!(still_there.body.contains("<td>Keyboard</td><td>3</td>"));
}

#[rstest]
#[actix_rt::test]
async fn deleting_a_missing_item_is_not_found() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("dave", "secret").await;
    browser
        .post("/add_item", &[("item_name", "Mouse"), ("quantity", "1")])
        .await
        .assert_redirect("/");
    let token = browser
        .get("/")
        .await
        .confirmation_token()
        .expect("token on page");

    let missing = browser
        .post("/delete_item/999", &[("csrf_token", token.as_str())])
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.contains("inventory item 999 not found"));

    let zero = browser
        .post("/delete_item/0", &[("csrf_token", token.as_str())])
        .await;
    assert_eq!(zero.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_rt::test]
async fn delete_over_get_is_not_allowed() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("erin", "secret").await;

    let page = browser.get("/delete_item/1").await;

    assert_eq!(page.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[actix_rt::test]
async fn inventory_is_shared_between_users() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("frank", "secret").await;
    browser
        .post("/add_item", &[("item_name", "Desk"), ("quantity", "2")])
        .await
        .assert_redirect("/");
    browser.get("/logout").await.assert_redirect("/login");

    browser.sign_up_and_in("grace", "secret").await;
    let page = browser.get("/").await;

    assert!(page.body.contains("<td>Desk</td><td>2</td>"));
}

#[rstest]
#[actix_rt::test]
async fn closing_the_browser_ends_the_session() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("heidi", "secret").await;
    assert_eq!(browser.get("/").await.status, StatusCode::OK);

    browser.forget_session();

    browser.get("/").await.assert_redirect("/login");
}

#[rstest]
#[actix_rt::test]
async fn item_names_are_escaped() {
    let (_db, mut browser) = support::open().await;
    browser.sign_up_and_in("ivan", "secret").await;
    browser
        .post(
            "/add_item",
            &[("item_name", "<script>x</script>"), ("quantity", "1")],
        )
        .await
        .assert_redirect("/");

    let page = browser.get("/").await;

    assert!(!page.body.contains("<script>x</script>"));
    assert!(page.body.contains("&lt;script&gt;x&lt;/script&gt;"));
}
