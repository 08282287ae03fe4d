use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use api_types::{
    Money,
    balance::DailyBalance,
    entry::{CashflowEntry, EntryKind},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use caixa_tui::{
    client::{CashflowApi, Client, ClientError},
    config::AppConfig,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

#[derive(Default)]
struct Ledger {
    entries: Vec<CashflowEntry>,
    next_id: u64,
}

type Shared = Arc<Mutex<Ledger>>;

#[derive(Deserialize)]
struct DateQuery {
    data: NaiveDate,
}

fn not_found(id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "message": format!("entry {id} not found") })),
    )
        .into_response()
}

async fn list(State(ledger): State<Shared>) -> Json<Vec<CashflowEntry>> {
    Json(ledger.lock().unwrap().entries.clone())
}

async fn list_by_date(
    State(ledger): State<Shared>,
    Query(query): Query<DateQuery>,
) -> Json<Vec<CashflowEntry>> {
    let ledger = ledger.lock().unwrap();
    Json(
        ledger
            .entries
            .iter()
            .filter(|entry| entry.date == query.data)
            .cloned()
            .collect(),
    )
}

async fn get_one(State(ledger): State<Shared>, Path(id): Path<u64>) -> Response {
    let ledger = ledger.lock().unwrap();
    match ledger.entries.iter().find(|entry| entry.id == Some(id)) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => not_found(id),
    }
}

async fn create(State(ledger): State<Shared>, Json(entry): Json<CashflowEntry>) -> Response {
    if !entry.amount.is_positive() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "valor must be positive" })),
        )
            .into_response();
    }
    let mut ledger = ledger.lock().unwrap();
    ledger.next_id += 1;
    let stored = CashflowEntry {
        id: Some(ledger.next_id),
        ..entry
    };
    ledger.entries.push(stored.clone());
    (StatusCode::CREATED, Json(stored)).into_response()
}

async fn update(
    State(ledger): State<Shared>,
    Path(id): Path<u64>,
    Json(entry): Json<CashflowEntry>,
) -> Response {
    let mut ledger = ledger.lock().unwrap();
    let Some(slot) = ledger.entries.iter_mut().find(|e| e.id == Some(id)) else {
        return not_found(id);
    };
    *slot = CashflowEntry {
        id: Some(id),
        ..entry
    };
    Json(slot.clone()).into_response()
}

async fn remove(State(ledger): State<Shared>, Path(id): Path<u64>) -> StatusCode {
    ledger
        .lock()
        .unwrap()
        .entries
        .retain(|entry| entry.id != Some(id));
    StatusCode::NO_CONTENT
}

async fn balance(State(ledger): State<Shared>) -> Json<Vec<DailyBalance>> {
    let ledger = ledger.lock().unwrap();
    let mut rows: Vec<DailyBalance> = Vec::new();
    for entry in &ledger.entries {
        let index = match rows.iter().position(|row| row.date == entry.date) {
            Some(index) => index,
            None => {
                rows.push(DailyBalance {
                    date: entry.date,
                    total_credit: Money::ZERO,
                    total_debit: Money::ZERO,
                    final_balance: Money::ZERO,
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[index];
        match entry.kind {
            EntryKind::Credit => row.total_credit += entry.amount,
            EntryKind::Debit => row.total_debit += entry.amount,
        }
        row.final_balance = row.total_credit - row.total_debit;
    }
    Json(rows)
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn ledger_backend() -> SocketAddr {
    let router = Router::new()
        .route("/lancamentos", get(list))
        .route("/lancamento", get(list_by_date))
        .route("/lancamento/{id}", get(get_one).put(update))
        .route("/criar", post(create))
        .route("/delete/{id}", delete(remove))
        .route("/saldo", get(balance))
        .with_state(Shared::default());
    serve(router).await
}

fn client_for(addr: SocketAddr) -> Client {
    Client::new(&AppConfig {
        base_url: format!("http://{addr}"),
        ..AppConfig::default()
    })
    .unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn draft(day: &str, kind: EntryKind, description: &str, cents: i64) -> CashflowEntry {
    CashflowEntry {
        id: None,
        date: date(day),
        kind,
        description: description.to_string(),
        amount: Money::new(cents),
    }
}

#[tokio::test]
async fn create_then_fetch_by_id() {
    let client = client_for(ledger_backend().await);

    let created = client
        .create(&draft("2024-05-01", EntryKind::Credit, "Salary", 350_000))
        .await
        .unwrap();
    let id = created.id.expect("backend assigns an id");

    let fetched = client.get_by_id(id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.amount, Money::new(350_000));
    assert_eq!(fetched.description, "Salary");
}

#[tokio::test]
async fn create_does_not_send_client_id() {
    let client = client_for(ledger_backend().await);

    let mut with_id = draft("2024-05-01", EntryKind::Debit, "Rent", 120_000);
    with_id.id = Some(99);
    let created = client.create(&with_id).await.unwrap();

    assert_eq!(created.id, Some(1));
}

#[tokio::test]
async fn list_and_filter_by_date() {
    let client = client_for(ledger_backend().await);
    client
        .create(&draft("2024-05-01", EntryKind::Credit, "Salary", 350_000))
        .await
        .unwrap();
    client
        .create(&draft("2024-05-02", EntryKind::Debit, "Market", 3_590))
        .await
        .unwrap();

    let all = client.list().await.unwrap();
    assert_eq!(all.len(), 2);

    let second_day = client.list_by_date(date("2024-05-02")).await.unwrap();
    assert_eq!(second_day.len(), 1);
    assert_eq!(second_day[0].description, "Market");

    let empty_day = client.list_by_date(date("2024-06-01")).await.unwrap();
    assert!(empty_day.is_empty());
}

#[tokio::test]
async fn update_replaces_stored_entry() {
    let client = client_for(ledger_backend().await);
    let created = client
        .create(&draft("2024-05-01", EntryKind::Credit, "Salary", 350_000))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let changed = draft("2024-05-03", EntryKind::Debit, "Refund", 1_000);
    let updated = client.update(id, &changed).await.unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.kind, EntryKind::Debit);
    assert_eq!(client.get_by_id(id).await.unwrap(), updated);
}

#[tokio::test]
async fn remove_deletes_entry() {
    let client = client_for(ledger_backend().await);
    let created = client
        .create(&draft("2024-05-01", EntryKind::Credit, "Salary", 350_000))
        .await
        .unwrap();
    let id = created.id.unwrap();

    client.remove(id).await.unwrap();

    assert!(client.list().await.unwrap().is_empty());
    assert!(matches!(
        client.get_by_id(id).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn balance_aggregates_per_day() {
    let client = client_for(ledger_backend().await);
    for entry in [
        draft("2024-05-01", EntryKind::Credit, "Salary", 100_000),
        draft("2024-05-01", EntryKind::Debit, "Market", 25_000),
        draft("2024-05-02", EntryKind::Debit, "Rent", 80_000),
    ] {
        client.create(&entry).await.unwrap();
    }

    let rows = client.balance().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, date("2024-05-01"));
    assert_eq!(rows[0].total_credit, Money::new(100_000));
    assert_eq!(rows[0].total_debit, Money::new(25_000));
    assert_eq!(rows[0].final_balance, Money::new(75_000));
    assert_eq!(rows[1].final_balance, Money::new(-80_000));
}

#[tokio::test]
async fn missing_entry_is_not_found() {
    let client = client_for(ledger_backend().await);

    let update = client
        .update(42, &draft("2024-05-01", EntryKind::Credit, "", 100))
        .await;

    assert!(matches!(update, Err(ClientError::NotFound)));
    assert!(matches!(
        client.get_by_id(42).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn rejected_payload_carries_backend_message() {
    let client = client_for(ledger_backend().await);

    let err = client
        .create(&draft("2024-05-01", EntryKind::Credit, "", 0))
        .await
        .unwrap_err();

    match err {
        ClientError::Validation(message) => assert_eq!(message, "valor must be positive"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_write_reply_echoes_payload() {
    let router = Router::new()
        .route("/criar", post(|| async { StatusCode::CREATED }))
        .route("/lancamento/{id}", axum::routing::put(|| async { StatusCode::OK }));
    let client = client_for(serve(router).await);

    let created = client
        .create(&draft("2024-05-01", EntryKind::Credit, "Salary", 500))
        .await
        .unwrap();
    assert_eq!(created.id, None);
    assert_eq!(created.amount, Money::new(500));

    let updated = client
        .update(5, &draft("2024-05-02", EntryKind::Debit, "Fix", 700))
        .await
        .unwrap();
    assert_eq!(updated.id, Some(5));
    assert_eq!(updated.description, "Fix");
}

#[tokio::test]
async fn server_failure_keeps_status() {
    let router = Router::new().route(
        "/saldo",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "boom" })),
            )
        }),
    );
    let client = client_for(serve(router).await);

    match client.balance().await.unwrap_err() {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let router = Router::new().nest(
        "/api",
        Router::new().route("/saldo", get(|| async { Json(Vec::<DailyBalance>::new()) })),
    );
    let addr = serve(router).await;
    let client = Client::new(&AppConfig {
        base_url: format!("http://{addr}/api"),
        ..AppConfig::default()
    })
    .unwrap();

    assert_eq!(client.base_url().as_str(), format!("http://{addr}/api/"));
    assert!(client.balance().await.unwrap().is_empty());
}
