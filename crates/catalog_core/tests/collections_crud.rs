mod common;

use catalog_core::db::open_db_in_memory;
use catalog_core::service::{
    book_service, game_service, music_service, program_service, song_service,
};
use catalog_core::{Language, Scope};
use uuid::Uuid;

#[test]
fn game_flags_roundtrip_through_update() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();

    let mut game = service.add(&common::game("Mafia")).unwrap();
    assert_eq!(service.get(game.id).unwrap(), Some(game.clone()));

    game.crack = false;
    game.patch = true;
    game.trainer = true;
    game.trainer_data = true;
    game.editor = true;
    game.media_count = 3;
    service.update(&game).unwrap();

    assert_eq!(service.get(game.id).unwrap(), Some(game));
}

#[test]
fn game_and_program_require_positive_media_count() {
    let conn = open_db_in_memory().unwrap();
    let games = game_service(&conn).unwrap();
    let programs = program_service(&conn).unwrap();

    let mut game = common::game("");
    game.media_count = 0;
    let err = games.add(&game).unwrap_err();
    assert!(err.has_event("GAME_NAME_EMPTY"));
    assert!(err.has_event("GAME_MEDIA_COUNT_NOT_POSITIVE"));

    let mut program = common::program("Photoshop");
    program.media_count = -2;
    let err = programs.add(&program).unwrap_err();
    assert!(err.has_event("PROGRAM_MEDIA_COUNT_NOT_POSITIVE"));
    assert!(!err.has_event("PROGRAM_NAME_EMPTY"));
}

#[test]
fn program_duplicate_copies_every_field() {
    let conn = open_db_in_memory().unwrap();
    let service = program_service(&conn).unwrap();

    let program = service.add(&common::program("Photoshop")).unwrap();
    let copy = service.duplicate(program.id).unwrap();

    assert_ne!(copy.id, program.id);
    assert_eq!(copy.position, 1);
    assert_eq!(copy.name, program.name);
    assert!(copy.serial_key);
    assert_eq!(service.get(copy.id).unwrap(), Some(copy));
}

#[test]
fn music_keeps_songs_per_album_and_cascades_on_remove() {
    let conn = open_db_in_memory().unwrap();
    let albums = music_service(&conn).unwrap();
    let songs = song_service(&conn).unwrap();

    let album = albums.add(&common::music("Abbey Road")).unwrap();
    let other = albums.add(&common::music("Revolver")).unwrap();
    let first = songs.add(&common::song(album.id, "Come Together")).unwrap();
    let second = songs.add(&common::song(album.id, "Something")).unwrap();
    let taxman = songs.add(&common::song(other.id, "Taxman")).unwrap();

    assert_eq!((first.position, second.position), (0, 1));
    assert_eq!(taxman.position, 0);
    assert_eq!(
        songs.get_all(Scope::Parent(album.id)).unwrap(),
        vec![first.clone(), second]
    );

    albums.remove(album.id).unwrap();
    assert_eq!(songs.get(first.id).unwrap(), None);
    assert_eq!(songs.get_all(Scope::Parent(other.id)).unwrap(), vec![taxman]);
}

#[test]
fn duplicating_music_copies_songs() {
    let conn = open_db_in_memory().unwrap();
    let albums = music_service(&conn).unwrap();
    let songs = song_service(&conn).unwrap();

    let album = albums.add(&common::music("Abbey Road")).unwrap();
    songs.add(&common::song(album.id, "Come Together")).unwrap();
    songs.add(&common::song(album.id, "Something")).unwrap();

    let copy = albums.duplicate(album.id).unwrap();
    let names = songs
        .get_all(Scope::Parent(copy.id))
        .unwrap()
        .into_iter()
        .map(|song| song.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Come Together", "Something"]);
}

#[test]
fn song_requires_existing_music() {
    let conn = open_db_in_memory().unwrap();
    let songs = song_service(&conn).unwrap();

    let mut song = common::song(Uuid::new_v4(), "Orphan");
    song.length = -1;

    let err = songs.add(&song).unwrap_err();
    assert!(err.has_event("MUSIC_NOT_EXIST"));
    assert!(err.has_event("SONG_LENGTH_NEGATIVE"));
}

#[test]
fn book_languages_roundtrip_in_order() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn).unwrap();

    let mut book = service.add(&common::book("Babička")).unwrap();
    assert_eq!(
        service.get(book.id).unwrap().unwrap().languages,
        vec![Language::Cz, Language::En]
    );

    book.languages = vec![Language::Jp, Language::Sk, Language::Cz];
    book.note = "first edition".to_string();
    service.update(&book).unwrap();

    assert_eq!(service.get(book.id).unwrap(), Some(book));
}

#[test]
fn book_requires_unique_non_empty_languages() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn).unwrap();

    let mut empty = common::book("Babička");
    empty.languages.clear();
    assert!(service
        .add(&empty)
        .unwrap_err()
        .has_event("BOOK_LANGUAGES_EMPTY"));

    let mut repeated = common::book("Babička");
    repeated.languages = vec![Language::Cz, Language::Cz];
    assert!(service
        .add(&repeated)
        .unwrap_err()
        .has_event("BOOK_LANGUAGES_DUPLICATE"));
}

#[test]
fn music_requires_name_and_positive_media_count() {
    let conn = open_db_in_memory().unwrap();
    let albums = music_service(&conn).unwrap();

    let mut music = common::music("  ");
    music.media_count = 0;

    let err = albums.add(&music).unwrap_err();
    assert!(err.has_event("MUSIC_NAME_EMPTY"));
    assert!(err.has_event("MUSIC_MEDIA_COUNT_NOT_POSITIVE"));
    assert!(albums.get_all(Scope::Root).unwrap().is_empty());
}

#[test]
fn song_requires_name() {
    let conn = open_db_in_memory().unwrap();
    let album = music_service(&conn)
        .unwrap()
        .add(&common::music("Abbey Road"))
        .unwrap();
    let songs = song_service(&conn).unwrap();

    let err = songs.add(&common::song(album.id, "")).unwrap_err();
    assert!(err.has_event("SONG_NAME_EMPTY"));
    assert!(!err.has_event("MUSIC_NOT_EXIST"));
}

#[test]
fn book_requires_both_names() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn).unwrap();

    let mut book = common::book("Babička");
    book.czech_name = " ".to_string();
    book.original_name = String::new();

    let err = service.add(&book).unwrap_err();
    assert!(err.has_event("BOOK_CZECH_NAME_EMPTY"));
    assert!(err.has_event("BOOK_ORIGINAL_NAME_EMPTY"));

    book.czech_name = "Babička".to_string();
    let err = service.add(&book).unwrap_err();
    assert!(!err.has_event("BOOK_CZECH_NAME_EMPTY"));
    assert!(err.has_event("BOOK_ORIGINAL_NAME_EMPTY"));
}
