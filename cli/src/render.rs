//! Plain-text rendering of loaded pages.

use std::fmt::Write;

use novela_core::fallback::NovelResolution;
use novela_core::views::{HomePage, NovelPage, ReaderPage, SearchForm, SearchPage};
use novela_core::{Genre, Health, Novel, Route, ViewFailure};

fn rating(novel: &Novel) -> String {
    match novel.rating {
        Some(rating) => format!("{rating:.1}"),
        None => "-".to_string(),
    }
}

fn novel_line(out: &mut String, novel: &Novel) {
    let _ = writeln!(
        out,
        "  [{:>4}] {} - {} ({}, {})",
        novel.id,
        novel.name,
        novel.author,
        novel.status.label(),
        rating(novel)
    );
}

pub fn novel_list(title: &str, novels: &[Novel]) -> String {
    let mut out = format!("{title}\n");
    if novels.is_empty() {
        out.push_str("  No se encontraron novelas.\n");
    }
    for novel in novels {
        novel_line(&mut out, novel);
    }
    out
}

pub fn home(page: &HomePage) -> String {
    let mut out = String::new();
    if let Some(featured) = &page.featured {
        let _ = writeln!(out, "Destacada: {} ({})", featured.name, rating(featured));
        if let Some(description) = featured.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "  {description}");
        }
        out.push('\n');
    }
    out.push_str(&novel_list("Mejor valoradas", &page.top));
    out.push('\n');
    out.push_str(&novel_list("Novelas Recientes", &page.recent));
    out
}

pub fn search_page(page: &SearchPage) -> String {
    let mut out = String::new();
    if !page.filter_summary.is_empty() {
        let _ = writeln!(out, "Filtros: {}", page.filter_summary);
    }
    out.push_str(&novel_list(&page.title, &page.results));
    let _ = writeln!(out, "{} resultado(s)", page.results.len());
    out
}

pub fn novel_page(page: &NovelPage) -> String {
    let novel = page.novel();
    let mut out = String::new();
    let _ = writeln!(out, "{}", novel.name);
    if let NovelResolution::Placeholder(_) = page.resolution {
        out.push_str("(información no disponible)\n");
    }
    let _ = writeln!(out, "Autor: {}", novel.author);
    let _ = writeln!(out, "Estado: {}", novel.status.label());
    let _ = writeln!(out, "Rating: {}", rating(novel));
    if !novel.tags.is_empty() {
        let _ = writeln!(out, "Géneros: {}", novel.tags.join(", "));
    }
    if !novel.alternative_names.is_empty() {
        let names: Vec<&str> = novel.alternative_names.iter().map(|a| a.name.as_str()).collect();
        let _ = writeln!(out, "También conocida como: {}", names.join(", "));
    }
    if let Some(description) = novel.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{description}");
    }
    let _ = writeln!(out, "\nCapítulos ({})", page.chapter_count());
    for chapter in &page.chapters {
        let _ = writeln!(
            out,
            "  {:>4}. {} -> {}",
            chapter.order_number,
            chapter.title,
            Route::Chapter(chapter.id)
        );
    }
    out
}

pub fn reader(page: &ReaderPage) -> String {
    let chapter = &page.chapter;
    let mut out = format!("Capítulo {}: {}\n\n", chapter.order_number, chapter.title);
    out.push_str(chapter.content.trim_end());
    out.push_str("\n\n");
    if let Some(previous) = page.previous {
        let _ = writeln!(out, "Anterior: {}", Route::Chapter(previous));
    }
    if let Some(next) = page.next {
        let _ = writeln!(out, "Siguiente: {}", Route::Chapter(next));
    }
    let _ = writeln!(out, "Índice: {}", Route::Novel(chapter.novel_id));
    out
}

pub fn genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|genre| format!("  [{:>3}] {}\n", genre.id, genre.name))
        .collect()
}

pub fn search_form(form: &SearchForm) -> String {
    let mut out = String::from("Búsqueda avanzada\n");
    if form.genres.is_empty() {
        out.push_str("  (géneros no disponibles)\n");
    } else {
        out.push_str(&genres(&form.genres));
    }
    out.push_str("Estados: ongoing, completed, hiatus, dropped\n");
    let _ = writeln!(out, "Uso: novela open \"{}\"", Route::Search(form.params.clone()));
    out
}

pub fn health(health: &Health) -> String {
    match (&health.message, &health.version) {
        (Some(message), Some(version)) => format!("{}: {message} ({version})", health.status),
        (Some(message), None) => format!("{}: {message}", health.status),
        _ => health.status.clone(),
    }
}

pub fn failure(failure: &ViewFailure) -> String {
    let mut out = format!("{}\n", failure.message);
    if failure.retry {
        out.push_str("  Reintentar: vuelve a ejecutar el comando\n");
    }
    if failure.home {
        let _ = writeln!(out, "  Volver al inicio: novela open {}", Route::Home);
    }
    out
}
