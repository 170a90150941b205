//! End-to-end login and session restore against file-backed storage.

use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use invitacion::Config;
use invitacion::app::state::{AppState, EnvironmentSource, Screen};
use invitacion::auth::records::RecordSource;
use invitacion::auth::session::{FileStorage, LocalStorage};
use invitacion::auth::{FamilyRecord, INCORRECT_PASSWORD_MESSAGE};
use invitacion::device::Environment;
use invitacion::flow::WEDDING;
use pretty_assertions::assert_eq;

const RECORDS: &str = r#"[
    {"password": "Familia1", "familyName": "Familia Pérez", "personalMessage": "¡Los esperamos!"},
    {"password": "Garcia2025", "familyName": "Familia García", "guests": [
        {"id": "g1", "name": "Ana García", "confirmed": true, "family": "García"}
    ]}
]"#;

fn press(state: &mut AppState, code: KeyCode) -> bool {
    state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_and_submit(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, KeyCode::Char(c));
    }
    press(state, KeyCode::Enter);
}

fn open(storage_path: &std::path::Path, records: Vec<FamilyRecord>) -> AppState {
    AppState::new(
        &WEDDING,
        Config::default(),
        EnvironmentSource::EmulatedPhone,
        Environment::emulated_phone(),
        Box::new(FileStorage::open(storage_path)),
        records,
    )
}

async fn records_from_file(dir: &std::path::Path) -> Vec<FamilyRecord> {
    let path = dir.join("cye-wedding-families.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(RECORDS.as_bytes()).unwrap();
    RecordSource::File(path).load().await
}

#[tokio::test]
async fn login_survives_restart_until_logout() {
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("storage.json");
    let records = records_from_file(dir.path()).await;
    assert_eq!(records.len(), 2);

    let mut first = open(&storage_path, records.clone());
    assert_eq!(first.screen, Screen::Login);
    type_and_submit(&mut first, " garcia2025 ");
    assert_eq!(first.screen, Screen::Invitation);
    assert_eq!(first.family.as_ref().unwrap().guests().len(), 1);
    drop(first);

    let mut second = open(&storage_path, records.clone());
    assert_eq!(second.screen, Screen::Invitation);
    assert_eq!(second.family.as_ref().unwrap().family_name, "Familia García");

    press(&mut second, KeyCode::Char('s'));
    assert_eq!(second.screen, Screen::Login);
    drop(second);

    let third = open(&storage_path, records);
    assert_eq!(third.screen, Screen::Login);
}

#[tokio::test]
async fn missing_records_reject_every_code() {
    let dir = tempfile::tempdir().unwrap();
    let records = RecordSource::File(dir.path().join("absent.json")).load().await;
    assert!(records.is_empty());

    let mut state = open(&dir.path().join("storage.json"), records);
    type_and_submit(&mut state, "Familia1");
    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.login.form.error(), Some(INCORRECT_PASSWORD_MESSAGE));
}

#[test]
fn corrupted_stored_record_falls_back_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("storage.json");
    {
        let mut storage = FileStorage::open(&storage_path);
        storage.set("wedding-auth-cye", "true").unwrap();
        storage.set("wedding-family-cye", "{\"familyName\":").unwrap();
    }

    let state = open(&storage_path, Vec::new());
    assert_eq!(state.screen, Screen::Login);

    let reopened = FileStorage::open(&storage_path);
    assert_eq!(reopened.get("wedding-auth-cye"), None);
    assert_eq!(reopened.get("wedding-family-cye"), None);
}

#[test]
fn quitting_from_login_with_escape() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open(&dir.path().join("storage.json"), Vec::new());
    assert!(press(&mut state, KeyCode::Esc));
}
