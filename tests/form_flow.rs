//! End-to-end flows through the connection demo, driven without a terminal

use std::sync::{Arc, Mutex};

use formwork::demo::{Auth, ConnectRequest, Demo, Services, Status};
use formwork::settings::{Settings, UiSettings};
use formwork_core::testing::{press, settle, type_text};
use formwork_core::{Component, InputKey, Message};

struct Harness {
    demo: Demo,
    users: Arc<Mutex<Vec<String>>>,
    requests: Arc<Mutex<Vec<ConnectRequest>>>,
}

fn harness(connect_result: Result<(), String>) -> Harness {
    let users = Arc::new(Mutex::new(Vec::new()));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let services = Services {
        list_keys: {
            let users = Arc::clone(&users);
            Arc::new(move |user: &str| {
                users.lock().unwrap().push(user.to_string());
                vec![format!("/keys/{user}-a"), format!("/keys/{user}-b")]
            })
        },
        connect: {
            let requests = Arc::clone(&requests);
            Arc::new(move |request: &ConnectRequest| {
                requests.lock().unwrap().push(request.clone());
                connect_result.clone()
            })
        },
    };

    let settings = Settings {
        ui: UiSettings {
            plain: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut demo = Demo::new(&settings, services);
    let cmd = demo.init();
    settle(&mut demo, cmd);

    Harness {
        demo,
        users,
        requests,
    }
}

fn fill_server(demo: &mut Demo, user: &str) {
    type_text(demo, "10.0.0.1");
    press(demo, InputKey::Enter);
    type_text(demo, "22");
    press(demo, InputKey::Enter);
    type_text(demo, user);
    press(demo, InputKey::Enter);
}

#[test]
fn test_key_auth_flow_connects_with_selected_key() {
    let mut h = harness(Ok(()));
    fill_server(&mut h.demo, "root");
    assert_eq!(h.demo.form().selected_index(), 3);

    // Auth defaults to key; advancing lands on the loaded key list
    press(&mut h.demo, InputKey::Enter);
    assert_eq!(h.demo.form().selected_index(), 4);
    assert_eq!(*h.users.lock().unwrap(), vec!["root".to_string()]);
    assert!(h.demo.view().contains("/keys/root-a"));

    press(&mut h.demo, InputKey::Down);
    press(&mut h.demo, InputKey::Enter);

    assert!(matches!(h.demo.status(), Status::Connected { .. }));
    let requests = h.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        ConnectRequest {
            host: "10.0.0.1".into(),
            port: 22,
            user: "root".into(),
            auth: Auth::Key("/keys/root-b".into()),
        }
    );
    assert!(h
        .demo
        .view()
        .contains("Successfully connected to root@10.0.0.1:22"));
}

#[test]
fn test_password_auth_flow_shows_note_and_skips_key() {
    let mut h = harness(Ok(()));
    fill_server(&mut h.demo, "admin");

    press(&mut h.demo, InputKey::Right);
    press(&mut h.demo, InputKey::Enter);

    assert_eq!(h.demo.form().selected_index(), 6);
    let view = h.demo.view();
    assert!(view.contains("Passwords are not recommended"));
    assert!(!view.contains("Select the auth key"));
    // The key list is never requested on the password path
    assert!(h.users.lock().unwrap().is_empty());

    press(&mut h.demo, InputKey::Enter);
    assert!(h.demo.view().contains("password is required"));
    assert_eq!(h.demo.status(), &Status::Form);

    type_text(&mut h.demo, "hunter2");
    press(&mut h.demo, InputKey::Enter);

    let requests = h.requests.lock().unwrap();
    assert_eq!(requests[0].auth, Auth::Password("hunter2".into()));
    assert!(matches!(h.demo.status(), Status::Connected { .. }));
}

#[test]
fn test_key_list_reloads_only_when_user_changes() {
    let mut h = harness(Ok(()));
    fill_server(&mut h.demo, "root");
    press(&mut h.demo, InputKey::Enter);
    assert_eq!(h.users.lock().unwrap().len(), 1);

    // Back to auth and forward again: same user, no reload
    press(&mut h.demo, InputKey::BackTab);
    press(&mut h.demo, InputKey::Enter);
    assert_eq!(h.users.lock().unwrap().len(), 1);

    // Back to user, change it, return to the key list
    press(&mut h.demo, InputKey::BackTab);
    press(&mut h.demo, InputKey::BackTab);
    assert_eq!(h.demo.form().selected_index(), 2);
    type_text(&mut h.demo, "2");
    press(&mut h.demo, InputKey::Enter);
    press(&mut h.demo, InputKey::Enter);

    assert_eq!(
        *h.users.lock().unwrap(),
        vec!["root".to_string(), "root2".to_string()]
    );
    assert!(h.demo.view().contains("/keys/root2-a"));
}

#[test]
fn test_invalid_port_blocks_advance() {
    let mut h = harness(Ok(()));
    type_text(&mut h.demo, "example.com");
    press(&mut h.demo, InputKey::Enter);
    type_text(&mut h.demo, "ssh");
    press(&mut h.demo, InputKey::Enter);

    assert_eq!(h.demo.form().selected_index(), 1);
    assert!(h.demo.view().contains("port must be a number"));
    assert_eq!(
        h.demo.form().error("port").map(|e| e.message().to_string()),
        Some("port must be a number between 1 and 65535".to_string())
    );
}

#[test]
fn test_failed_connection_reports_error() {
    let mut h = harness(Err("connection refused".into()));
    fill_server(&mut h.demo, "root");
    press(&mut h.demo, InputKey::Right);
    press(&mut h.demo, InputKey::Enter);
    type_text(&mut h.demo, "pw");
    press(&mut h.demo, InputKey::Enter);

    assert_eq!(
        h.demo.status(),
        &Status::Failed("connection refused".to_string())
    );
    assert!(h.demo.view().contains("Connection failed: connection refused"));
}

#[test]
fn test_exit_key_cancels() {
    let mut h = harness(Ok(()));
    type_text(&mut h.demo, "10.0");
    let cmd = h.demo.update(Message::Key(InputKey::CharCtrl('c')));

    assert!(cmd.has_quit());
    assert_eq!(h.demo.status(), &Status::Cancelled);
    assert!(h.demo.view().ends_with("Operation cancelled.\n"));
    assert!(h.requests.lock().unwrap().is_empty());
}

#[test]
fn test_help_toggles_full_view() {
    let mut h = harness(Ok(()));
    let short = h.demo.view();
    assert!(short.contains("Help"));
    assert!(!short.contains("Next"));

    press(&mut h.demo, InputKey::Char('?'));
    let full = h.demo.view();
    assert!(full.contains("Next"));
    assert!(full.contains("Exit"));
}

#[test]
fn test_advance_waits_for_first_key_list() {
    let mut h = harness(Ok(()));
    fill_server(&mut h.demo, "root");

    // Land on the key step without delivering the build
    let pending = h.demo.update(Message::Key(InputKey::Enter));
    assert_eq!(h.demo.form().selected_index(), 4);

    let blocked = h.demo.update(Message::Key(InputKey::Enter));
    assert!(blocked.is_none());
    assert_eq!(h.demo.status(), &Status::Form);
    assert_eq!(h.demo.form().selected_index(), 4);
    assert_eq!(
        h.demo.form().error("key").map(|e| e.message().to_string()),
        Some("still loading".to_string())
    );

    settle(&mut h.demo, pending);
    assert!(h.demo.form().error("key").is_none());
    press(&mut h.demo, InputKey::Enter);

    let requests = h.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].auth, Auth::Key("/keys/root-a".into()));
    assert!(matches!(h.demo.status(), Status::Connected { .. }));
}

#[test]
fn test_reload_hides_keys_of_previous_user() {
    let mut h = harness(Ok(()));
    fill_server(&mut h.demo, "root");
    press(&mut h.demo, InputKey::Enter);
    assert_eq!(h.demo.form().value("key").as_deref(), Some("/keys/root-a"));

    press(&mut h.demo, InputKey::BackTab);
    press(&mut h.demo, InputKey::BackTab);
    press(&mut h.demo, InputKey::CharCtrl('u'));
    type_text(&mut h.demo, "alice");
    press(&mut h.demo, InputKey::Enter);

    let pending = h.demo.update(Message::Key(InputKey::Enter));
    assert_eq!(h.demo.form().selected_index(), 4);
    // The list built for root is no longer an answer
    assert_eq!(h.demo.form().value("key"), None);

    h.demo.update(Message::Key(InputKey::Enter));
    assert_eq!(h.demo.status(), &Status::Form);
    assert!(h.requests.lock().unwrap().is_empty());

    settle(&mut h.demo, pending);
    press(&mut h.demo, InputKey::Enter);

    assert_eq!(
        *h.users.lock().unwrap(),
        vec!["root".to_string(), "alice".to_string()]
    );
    let requests = h.requests.lock().unwrap();
    assert_eq!(requests[0].user, "alice");
    assert_eq!(requests[0].auth, Auth::Key("/keys/alice-a".into()));
}
