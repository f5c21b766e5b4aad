//! Shared fixtures for catalog integration tests.
#![allow(dead_code)]

use catalog_core::service::genre_service;
use catalog_core::{
    Book, CatalogId, Episode, Game, Genre, Language, Medium, Movie, Music, Program, Season,
    Show, Song,
};
use rusqlite::Connection;

pub fn genre(name: &str) -> Genre {
    Genre::new(name)
}

/// Stores one genre per name through the genre service.
pub fn add_genres(conn: &Connection, names: &[&str]) -> Vec<CatalogId> {
    let service = genre_service(conn).unwrap();
    names
        .iter()
        .map(|name| service.add(&genre(name)).unwrap().id)
        .collect()
}

pub fn movie(genres: &[CatalogId]) -> Movie {
    let mut movie = Movie::new("Pelíšky", "Cosy Dens", 1999, Language::Cz);
    movie.subtitles = vec![Language::En, Language::Cz];
    movie.media = vec![Medium::new(1, 6_000), Medium::new(2, 1_200)];
    movie.csfd = "csfd-pelisky".to_string();
    movie.imdb_code = Some(167_331);
    movie.wiki_en = "Cosy_Dens".to_string();
    movie.wiki_cz = "Pelíšky".to_string();
    movie.picture = Some("pelisky.jpg".to_string());
    movie.note = "family classic".to_string();
    movie.genres = genres.to_vec();
    movie
}

pub fn show(genres: &[CatalogId]) -> Show {
    let mut show = Show::new("Přátelé", "Friends");
    show.csfd = "csfd-friends".to_string();
    show.imdb_code = Some(108_778);
    show.wiki_en = "Friends".to_string();
    show.genres = genres.to_vec();
    show
}

pub fn season(show_id: CatalogId, number: i32) -> Season {
    let mut season = Season::new(show_id, number, 1994, 1995, Language::En);
    season.subtitles = vec![Language::Cz];
    season
}

pub fn episode(season_id: CatalogId, number: i32) -> Episode {
    Episode::new(season_id, number, format!("Episode {number}"), 1_320)
}

pub fn game(name: &str) -> Game {
    let mut game = Game::new(name, 2);
    game.crack = true;
    game.saves = true;
    game.other_data = "manual".to_string();
    game
}

pub fn music(name: &str) -> Music {
    Music::new(name, 1)
}

pub fn song(music_id: CatalogId, name: &str) -> Song {
    Song::new(music_id, name, 240)
}

pub fn program(name: &str) -> Program {
    let mut program = Program::new(name, 1);
    program.serial_key = true;
    program
}

pub fn book(name: &str) -> Book {
    Book::new(name, name, vec![Language::Cz, Language::En])
}
