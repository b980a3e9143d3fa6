//! Integration tests for sate-browser-test
//!
//! These tests require Chrome/Chromium and are marked #[ignore].
//! Run with: cargo test --package sate-browser-test -- --ignored

use sate_browser_test::{
    BrowserError, DialogOutcome, DialogPolicy, Page, Settled, TestBrowser, TestBrowserConfig,
    WaitConfig,
};
use std::time::Duration;

fn test_html_page() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head><title>Primitives</title></head>
    <body>
        <div id="panel">Painel <span>visível</span></div>
        <div id="hidden" style="display:none">escondido</div>
        <input id="name" type="text">
        <input id="choice" type="radio" name="q">
        <button id="go" class="btn primary">Go</button>
        <button id="ask">Ask</button>
        <button id="off" disabled>Off</button>
        <ul><li class="item">1</li><li class="item">2</li><li class="item">3</li></ul>
        <span id="echo"></span>
        <span id="answer"></span>
        <script>
            console.error("boom");
            document.getElementById('go').addEventListener('click', () => {
                setTimeout(() => {
                    document.getElementById('echo').textContent =
                        document.getElementById('name').value;
                }, 200);
            });
            document.getElementById('ask').addEventListener('click', () => {
                document.getElementById('answer').textContent =
                    confirm('Continuar?') ? 'ok' : 'cancel';
            });
        </script>
    </body>
    </html>
    "#
    .to_string()
}

async fn open_fixture() -> (TestBrowser, Page) {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    let data_url = format!("data:text/html,{}", urlencoding::encode(&test_html_page()));
    page.navigate(&data_url, WaitConfig::default())
        .await
        .expect("failed to navigate");
    (browser, page)
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_find_and_read() {
    let (browser, page) = open_fixture().await;

    assert_eq!(page.title().await.unwrap(), "Primitives");
    assert_eq!(
        page.find_by_id("panel").await.unwrap().text().await.unwrap(),
        "Painel visível"
    );
    assert_eq!(page.find_all(".item").await.unwrap().len(), 3);
    assert!(page.find("#missing").await.unwrap_err().is_absence());

    let go = page.find_by_id("go").await.unwrap();
    assert_eq!(go.selector(), "#go");
    assert!(go.has_class("primary").await.unwrap());
    assert!(!go.has_class("prim").await.unwrap());
    assert_eq!(go.attribute("id").await.unwrap().as_deref(), Some("go"));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_visibility_and_state() {
    let (browser, page) = open_fixture().await;

    assert!(page.find_by_id("panel").await.unwrap().is_displayed().await.unwrap());
    assert!(!page.find_by_id("hidden").await.unwrap().is_displayed().await.unwrap());
    assert!(page.find_by_id("go").await.unwrap().is_enabled().await.unwrap());
    assert!(!page.find_by_id("off").await.unwrap().is_enabled().await.unwrap());

    let choice = page.find_by_id("choice").await.unwrap();
    assert!(!choice.is_selected().await.unwrap());
    choice.click().await.unwrap();
    assert!(choice.is_selected().await.unwrap());

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_typing_and_polling() {
    let (browser, page) = open_fixture().await;

    page.find_by_id("name")
        .await
        .unwrap()
        .type_text("Carlos Mendes")
        .await
        .unwrap();
    page.find_by_id("go").await.unwrap().click().await.unwrap();

    let settled = page
        .wait_until(
            |p| async move { p.find_by_id("echo").await?.text().await },
            |text: &String| text == "Carlos Mendes",
            WaitConfig::with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();
    assert!(settled.is_matched());

    let never = page
        .wait_until(
            |p| async move { p.find_by_id("echo").await?.text().await },
            |text: &String| text == "outro",
            WaitConfig::new(Duration::from_millis(300), Duration::from_millis(50)),
        )
        .await
        .unwrap();
    assert_eq!(
        never,
        Settled::TimedOut {
            last: Some("Carlos Mendes".to_string())
        }
    );

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_confirm_dialog_is_accepted() {
    let (browser, page) = open_fixture().await;

    page.set_dialog_policy(DialogPolicy::Accept);
    page.find_by_id("ask").await.unwrap().click().await.unwrap();

    page.wait_until(
        |p| async move { p.find_by_id("answer").await?.text().await },
        |text: &String| text == "ok",
        WaitConfig::with_timeout(Duration::from_secs(5)),
    )
    .await
    .unwrap();

    let record = page.dialogs().last().expect("dialog should be recorded");
    assert_eq!(record.kind, "confirm");
    assert_eq!(record.message, "Continuar?");
    assert_eq!(record.outcome, DialogOutcome::Accepted);
    page.dialogs().ensure_no_failures().unwrap();

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_console_errors_captured() {
    let (browser, page) = open_fixture().await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(page.console().errors().iter().any(|m| m.text == "boom"));

    page.close().await.expect("failed to close page");
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_wait_for_missing_selector_times_out() {
    let (browser, page) = open_fixture().await;

    let err = page
        .wait_for_selector(
            "#never",
            WaitConfig::new(Duration::from_millis(300), Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("selector '#never'"));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_navigate_gives_up_after_the_given_bound() {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    // Reopening the document after load leaves readyState at "loading".
    let reopened = r#"<p>first</p><script>
        addEventListener('load', () => { document.open(); document.write('<p>again'); });
    </script>"#;
    let url = format!("data:text/html,{}", urlencoding::encode(reopened));
    let bound = WaitConfig::new(Duration::from_millis(400), Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = page.navigate(&url, bound).await.unwrap_err();
    assert!(
        matches!(err, BrowserError::WaitTimeout { timeout, .. } if timeout == bound.timeout),
        "{err:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(5));

    browser.close().await.expect("failed to close");
}
