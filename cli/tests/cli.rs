//! Integration tests for the novela CLI against the mock catalog API

use assert_cmd::Command;
use predicates::prelude::*;

/// Start the mock server on its own thread and return the API base.
fn spawn_server(catalog: mock_server::Catalog) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, catalog).await
        })
        .unwrap();
    });

    format!("http://{addr}{}", mock_server::API_PREFIX)
}

fn novela(api: &str) -> Command {
    let mut cmd = Command::cargo_bin("novela").unwrap();
    cmd.env_remove("RUST_LOG").args(["--api", api]);
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("novela").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("--api"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("novela").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("novela"));
}

#[test]
fn test_home() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("Destacada: Lord of the Mysteries (9.6)"))
        .stdout(predicate::str::contains("Mejor valoradas"))
        .stdout(predicate::str::contains("Untitled Draft"));
}

#[test]
fn test_list_with_filters() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["list", "--status", "hiatus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mushoku Tensei"))
        .stdout(predicate::str::contains("En pausa"))
        .stdout(predicate::str::contains("Omniscient Reader").not());
}

#[test]
fn test_search_by_term() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["search", "--q", "lord of"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resultados para \"lord of\""))
        .stdout(predicate::str::contains("1 resultado(s)"));
}

#[test]
fn test_search_without_filters_lists_recent() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("Novelas Recientes"))
        .stdout(predicate::str::contains("6 resultado(s)"));
}

#[test]
fn test_novel_detail() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["novel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estado: Completada"))
        .stdout(predicate::str::contains("Géneros: FANTASY, MYSTERY"))
        .stdout(predicate::str::contains("Capítulos (3)"))
        .stdout(predicate::str::contains("-> /chapter/101"));
}

#[test]
fn test_novel_detail_recovered_from_lists() {
    let api = spawn_server(mock_server::Catalog::sample().with_broken_detail(2));
    novela(&api)
        .args(["novel", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Omniscient Reader"))
        .stdout(predicate::str::contains("Capítulos (2)"));
}

#[test]
fn test_novel_detail_placeholder() {
    let catalog = mock_server::Catalog::sample()
        .with_broken_detail(2)
        .with_failing_lists();
    let api = spawn_server(catalog);
    novela(&api)
        .args(["novel", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Novela 2"))
        .stdout(predicate::str::contains("información no disponible"))
        .stdout(predicate::str::contains("Autor: Desconocido"));
}

#[test]
fn test_read_chapter_with_navigation() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["read", "102"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Capítulo 2: Chapter 2"))
        .stdout(predicate::str::contains("Anterior: /chapter/101"))
        .stdout(predicate::str::contains("Siguiente: /chapter/103"))
        .stdout(predicate::str::contains("Índice: /novel/1"));
}

#[test]
fn test_read_missing_chapter_fails() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["read", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error al cargar el capítulo"))
        .stderr(predicate::str::contains("Volver al inicio"));
}

#[test]
fn test_open_routes() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .args(["open", "/search?genre_id=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtros: Género: 3"))
        .stdout(predicate::str::contains("Mushoku Tensei"));

    novela(&api)
        .args(["open", "/search/advanced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Búsqueda avanzada"))
        .stdout(predicate::str::contains("isekai"));

    novela(&api)
        .args(["open", "/nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no page at /nowhere"));
}

#[test]
fn test_genres_and_health() {
    let api = spawn_server(mock_server::Catalog::sample());
    novela(&api)
        .arg("genres")
        .assert()
        .success()
        .stdout(predicate::str::contains("romance"));

    novela(&api)
        .args(["genre", "3"])
        .assert()
        .success()
        .stdout("isekai (3)\n");

    novela(&api)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok"));
}

#[test]
fn test_unreachable_api_fails() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    novela(&format!("http://{addr}/api/v1"))
        .arg("home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error al cargar las novelas"))
        .stderr(predicate::str::contains("Reintentar"));
}
