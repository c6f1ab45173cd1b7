use std::error::Error;
use std::process::Command;
use data::validation::NoteField;
use data::NoteDraft;
use plainnotes_client::constants::{FETCH_ERROR_MESSAGE, DEFAULT_API_URL};
use plainnotes_client::{ClientError, ComposeDialog, HttpNotesApi, NotesApi, NotesView, SubmitOutcome};
use test_utils::{api_url, build_bin, setup_config, RunningDaemon, LOCAL_PORT};

fn api_root(port: u16) -> String {
    api_url(port, "")
}

#[tokio::test(flavor = "multi_thread")]
async fn view_round_trip() -> Result<(), Box<dyn Error>> {
    let port = LOCAL_PORT.with(|p| *p);
    let dir = setup_config(port);
    let daemon = RunningDaemon::spawn(&dir)?;

    let mut view = NotesView::new(HttpNotesApi::new(api_root(port)));
    view.mount().await;
    assert!(!view.is_loading());
    assert!(view.notes().is_empty());
    assert_eq!(view.error(), None);

    view.open_create();
    view.set_field(NoteField::Title, "Groceries");
    view.set_field(NoteField::Description, "Milk, eggs");
    let SubmitOutcome::Saved(created) = view.submit().await else {
        panic!("create failed: {:?}", view.error())
    };
    assert_eq!(view.notes(), &[created.clone()]);

    assert!(view.open_edit(created.id));
    view.set_field(NoteField::Description, "Milk, eggs, bread");
    let SubmitOutcome::Saved(updated) = view.submit().await else {
        panic!("update failed: {:?}", view.error())
    };
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
    assert_eq!(view.compose(), ComposeDialog::Closed);

    let fetched = view.api().get(created.id).await?;
    assert_eq!(fetched, updated);

    view.request_delete(created.id);
    assert!(view.confirm_delete().await);
    assert!(view.notes().is_empty());

    let err = view.api().get(created.id).await.expect_err("note was deleted");
    assert!(
        matches!(err, ClientError::Rejected { status: 404, ref message } if message == "Note not found"),
        "unexpected error: {err}",
    );

    drop(view);
    daemon.stop_assert_no_errors()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn server_validation_is_reported() -> Result<(), Box<dyn Error>> {
    let port = LOCAL_PORT.with(|p| *p);
    let dir = setup_config(port);
    let daemon = RunningDaemon::spawn(&dir)?;

    let api = HttpNotesApi::new(api_root(port));
    let err = api.create(&NoteDraft::new("", "x")).await
        .expect_err("empty title");
    assert!(
        matches!(err, ClientError::Rejected { status: 400, ref message } if message == "Title is required"),
        "unexpected error: {err}",
    );
    assert!(api.get_all().await?.is_empty());

    daemon.stop_assert_no_errors()?;
    Ok(())
}

#[tokio::test]
async fn unreachable_server_shows_fetch_error() {
    // nothing listens on the discard port
    let mut view = NotesView::new(HttpNotesApi::new("http://127.0.0.1:9/api"));
    view.mount().await;
    assert!(!view.is_loading());
    assert_eq!(view.error().as_deref(), Some(FETCH_ERROR_MESSAGE));
}

#[test]
fn command_line_create_and_list() -> Result<(), Box<dyn Error>> {
    let port = LOCAL_PORT.with(|p| *p);
    let dir = setup_config(port);
    let daemon = RunningDaemon::spawn(&dir)?;
    let cli_path = build_bin("plainnotes")?;
    assert_ne!(api_root(port), DEFAULT_API_URL);

    let output = Command::new(&cli_path)
        .args(["--api-url", &api_root(port), "create", "--title", "Groceries", "--description", "Milk"])
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = Command::new(&cli_path)
        .args(["--api-url", &api_root(port), "create", "--title", "ab", "--description", "Milk"])
        .output()?;
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Title must be at least 3 characters"),
    );

    let output = Command::new(&cli_path)
        .args(["--api-url", &api_root(port), "list"])
        .output()?;
    assert!(output.status.success());
    let listing = String::from_utf8(output.stdout)?;
    assert_eq!(listing.lines().count(), 1);
    assert!(listing.contains("Groceries"), "{listing}");

    daemon.stop_assert_no_errors()?;
    Ok(())
}
