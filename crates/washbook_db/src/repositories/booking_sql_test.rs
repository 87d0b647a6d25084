// Tests for the SQL booking repository, each against its own SQLite file.

use super::booking::{BookingRepository, InsertOutcome, NewBooking};
use super::booking_sql::SqlBookingRepository;
use crate::DbClient;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

const SLOT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A SQLite file in the temp dir, removed when dropped.
struct TempDb {
    path: PathBuf,
}

impl TempDb {
    fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("washbook-test-{}.db", uuid::Uuid::new_v4())),
        }
    }

    fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn repository() -> (TempDb, SqlBookingRepository) {
    let db = TempDb::new();
    let db_client = DbClient::from_url(&db.url())
        .await
        .expect("test database");
    let repository = SqlBookingRepository::new(db_client, SLOT_FORMAT);
    repository.init_schema().await.expect("schema");
    (db, repository)
}

fn slot(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn new_booking(client: &str, at: NaiveDateTime) -> NewBooking {
    NewBooking::new(client, "abc1d23", "Carro", "Lavagem Simples", at)
}

#[tokio::test]
async fn test_insert_assigns_id_and_round_trips() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();

    let outcome = repo
        .insert_booking(&mut conn, new_booking("Ana", slot(2025, 5, 2, 10, 0)))
        .await
        .unwrap();
    let inserted = match outcome {
        InsertOutcome::Inserted(booking) => booking,
        InsertOutcome::Conflict => panic!("expected insert, got a conflict"),
    };
    assert!(inserted.id > 0);
    assert_eq!(inserted.plate, "ABC1D23");

    let found = repo
        .find_by_slot(&mut conn, slot(2025, 5, 2, 10, 0))
        .await
        .unwrap();
    assert_eq!(found, Some(inserted));
}

#[tokio::test]
async fn test_find_by_slot_misses_other_minutes() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();
    repo.insert_booking(&mut conn, new_booking("Ana", slot(2025, 5, 2, 10, 0)))
        .await
        .unwrap();

    let found = repo
        .find_by_slot(&mut conn, slot(2025, 5, 2, 10, 1))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_unique_violation_is_reported_as_conflict() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();
    let at = slot(2025, 5, 2, 10, 0);

    let first = repo
        .insert_booking(&mut conn, new_booking("Ana", at))
        .await
        .unwrap();
    assert!(matches!(first, InsertOutcome::Inserted(_)));

    // Skips find_by_slot, as a concurrent writer would
    let second = repo
        .insert_booking(&mut conn, new_booking("Bruno", at))
        .await
        .unwrap();
    assert_eq!(second, InsertOutcome::Conflict);
    assert_eq!(repo.count_bookings(&mut conn).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_orders_by_time_across_months() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();

    // Lexicographically "01/06/2025" < "15/05/2025" < "20/05/2025"
    for (client, at) in [
        ("June", slot(2025, 6, 1, 8, 0)),
        ("Late May", slot(2025, 5, 20, 8, 0)),
        ("Mid May", slot(2025, 5, 15, 8, 0)),
    ] {
        repo.insert_booking(&mut conn, new_booking(client, at))
            .await
            .unwrap();
    }

    let clients: Vec<String> = repo
        .list_bookings(&mut conn)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.client_name)
        .collect();
    assert_eq!(clients, vec!["Mid May", "Late May", "June"]);
}

#[tokio::test]
async fn test_list_orders_same_day_by_hour() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();

    for hour in [10, 9, 11] {
        repo.insert_booking(&mut conn, new_booking("Ana", slot(2025, 5, 2, hour, 0)))
            .await
            .unwrap();
    }

    let hours: Vec<String> = repo
        .list_bookings(&mut conn)
        .await
        .unwrap()
        .iter()
        .map(|b| b.scheduled_at.format("%H:%M").to_string())
        .collect();
    assert_eq!(hours, vec!["09:00", "10:00", "11:00"]);
}

#[tokio::test]
async fn test_list_skips_unparsable_rows() {
    let (_db, repo) = repository().await;
    let mut conn = repo.acquire().await.unwrap();
    repo.insert_booking(&mut conn, new_booking("Ana", slot(2025, 5, 2, 10, 0)))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO agendamentos (cliente, placa, servico, data_hora_str) VALUES ('X', 'Y', 'Z', 'amanhã')",
    )
    .execute(&mut *conn)
    .await
    .unwrap();

    let bookings = repo.list_bookings(&mut conn).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(repo.count_bookings(&mut conn).await.unwrap(), 2);
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let (_db, repo) = repository().await;
    {
        let mut conn = repo.acquire().await.unwrap();
        repo.insert_booking(&mut conn, new_booking("Ana", slot(2025, 5, 2, 10, 0)))
            .await
            .unwrap();
    }

    repo.init_schema().await.unwrap();
    repo.init_schema().await.unwrap();

    let mut conn = repo.acquire().await.unwrap();
    assert_eq!(repo.count_bookings(&mut conn).await.unwrap(), 1);
}

#[tokio::test]
async fn test_init_schema_upgrades_older_table() {
    let db = TempDb::new();
    let db_client = DbClient::from_url(&db.url()).await.unwrap();
    db_client
        .execute(
            "CREATE TABLE agendamentos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cliente TEXT NOT NULL,
                placa TEXT NOT NULL,
                servico TEXT NOT NULL,
                data_hora_str TEXT NOT NULL
            )",
        )
        .await
        .unwrap();
    db_client
        .execute(
            "INSERT INTO agendamentos (cliente, placa, servico, data_hora_str)
             VALUES ('Ana', 'ABC1234', 'Polimento', '02/05/2025 10:00')",
        )
        .await
        .unwrap();

    let repo = SqlBookingRepository::new(db_client, SLOT_FORMAT);
    repo.init_schema().await.unwrap();

    let mut conn = repo.acquire().await.unwrap();
    let bookings = repo.list_bookings(&mut conn).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].vehicle_type, "");

    // The added index now guards the old table too
    let again = repo
        .insert_booking(&mut conn, new_booking("Bruno", slot(2025, 5, 2, 10, 0)))
        .await
        .unwrap();
    assert_eq!(again, InsertOutcome::Conflict);
}

#[tokio::test]
async fn test_temp_database_file_is_removed_on_drop() {
    let (db, repo) = repository().await;
    let path = db.path.clone();
    assert!(path.exists());

    repo.db_client().pool().close().await;
    drop(repo);
    drop(db);
    assert!(!path.exists());
}
