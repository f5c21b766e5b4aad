mod common;

use catalog_core::db::open_db_in_memory;
use catalog_core::repo::game_repo::SqliteGameRepository;
use catalog_core::service::{game_service, music_service, song_service};
use catalog_core::{CatalogEntity, CatalogId, CatalogRepository, RepoError, Scope};
use uuid::Uuid;

fn names<E>(items: &[E], name: impl Fn(&E) -> &str) -> Vec<String> {
    items.iter().map(|item| name(item).to_string()).collect()
}

#[test]
fn move_up_swaps_with_previous_sibling() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    service.add(&common::game("A")).unwrap();
    service.add(&common::game("B")).unwrap();
    let c = service.add(&common::game("C")).unwrap();

    service.move_up(c.id).unwrap();

    let games = service.get_all(Scope::Root).unwrap();
    assert_eq!(names(&games, |game| game.name.as_str()), vec!["A", "C", "B"]);
    assert_eq!(service.get(c.id).unwrap().unwrap().position, 1);
}

#[test]
fn move_down_swaps_with_next_sibling() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let a = service.add(&common::game("A")).unwrap();
    service.add(&common::game("B")).unwrap();
    service.add(&common::game("C")).unwrap();

    service.move_down(a.id).unwrap();
    service.move_down(a.id).unwrap();

    let games = service.get_all(Scope::Root).unwrap();
    assert_eq!(names(&games, |game| game.name.as_str()), vec!["B", "C", "A"]);
}

#[test]
fn first_cannot_move_up_and_last_cannot_move_down() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let a = service.add(&common::game("A")).unwrap();
    let b = service.add(&common::game("B")).unwrap();

    let up = service.move_up(a.id).unwrap_err();
    assert!(up.has_event("GAME_NOT_MOVABLE"));
    assert!(up.to_string().contains("Game can't be moved up."));

    let down = service.move_down(b.id).unwrap_err();
    assert!(down.has_event("GAME_NOT_MOVABLE"));
    assert!(down.to_string().contains("Game can't be moved down."));

    let games = service.get_all(Scope::Root).unwrap();
    assert_eq!(names(&games, |game| game.name.as_str()), vec!["A", "B"]);
}

#[test]
fn moving_unknown_record_reports_missing_record_only() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();

    let err = service.move_up(Uuid::new_v4()).unwrap_err();
    assert!(err.has_event("GAME_NOT_EXIST"));
    assert!(!err.has_event("GAME_NOT_MOVABLE"));
}

#[test]
fn moves_stay_within_parent_scope() {
    let conn = open_db_in_memory().unwrap();
    let albums = music_service(&conn).unwrap();
    let songs = song_service(&conn).unwrap();
    let first_album = albums.add(&common::music("First")).unwrap();
    let second_album = albums.add(&common::music("Second")).unwrap();

    let lone = songs.add(&common::song(first_album.id, "Lone")).unwrap();
    songs.add(&common::song(second_album.id, "One")).unwrap();
    let two = songs.add(&common::song(second_album.id, "Two")).unwrap();

    assert!(songs
        .move_down(lone.id)
        .unwrap_err()
        .has_event("SONG_NOT_MOVABLE"));

    songs.move_up(two.id).unwrap();
    let second_songs = songs.get_all(Scope::Parent(second_album.id)).unwrap();
    assert_eq!(names(&second_songs, |song| song.name.as_str()), vec!["Two", "One"]);
    assert_eq!(songs.get(lone.id).unwrap().unwrap().position, 0);
}

#[test]
fn update_positions_closes_gaps_and_keeps_order() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let ids = ["A", "B", "C", "D"]
        .iter()
        .map(|name| service.add(&common::game(name)).unwrap().id)
        .collect::<Vec<CatalogId>>();

    service.remove(ids[1]).unwrap();
    service.move_down(ids[0]).unwrap();
    service.update_positions(Scope::Root).unwrap();

    let games = service.get_all(Scope::Root).unwrap();
    assert_eq!(names(&games, |game| game.name.as_str()), vec!["C", "A", "D"]);
    assert_eq!(
        games.iter().map(CatalogEntity::position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn add_after_remove_appends_past_highest_position() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let a = service.add(&common::game("A")).unwrap();
    service.add(&common::game("B")).unwrap();

    service.remove(a.id).unwrap();
    let c = service.add(&common::game("C")).unwrap();

    assert_eq!(c.position, 2);
}

#[test]
fn swapping_with_unknown_record_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let a = service.add(&common::game("A")).unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.swap_positions(a.id, missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { label: "game", id } if id == missing));
    assert_eq!(repo.get(a.id).unwrap().unwrap().position, 0);
}

#[test]
fn renumber_with_unknown_record_rolls_back() {
    let conn = open_db_in_memory().unwrap();
    let service = game_service(&conn).unwrap();
    let a = service.add(&common::game("A")).unwrap();
    let b = service.add(&common::game("B")).unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let err = repo.renumber(&[b.id, a.id, Uuid::new_v4()]).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { label: "game", .. }));

    assert_eq!(repo.get(a.id).unwrap().unwrap().position, 0);
    assert_eq!(repo.get(b.id).unwrap().unwrap().position, 1);
}
