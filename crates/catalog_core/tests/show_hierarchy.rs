mod common;

use catalog_core::db::open_db_in_memory;
use catalog_core::service::{episode_service, season_service, show_service};
use catalog_core::{CatalogEntity, Language, RepoError, Scope, ServiceError};
use uuid::Uuid;

#[test]
fn seasons_and_episodes_are_ordered_per_parent() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();

    let show = shows.add(&common::show(&genres)).unwrap();
    let first = seasons.add(&common::season(show.id, 1)).unwrap();
    let second = seasons.add(&common::season(show.id, 2)).unwrap();
    let pilot = episodes.add(&common::episode(first.id, 1)).unwrap();
    episodes.add(&common::episode(first.id, 2)).unwrap();
    let opener = episodes.add(&common::episode(second.id, 1)).unwrap();

    assert_eq!((first.position, second.position), (0, 1));
    assert_eq!(pilot.position, 0);
    assert_eq!(opener.position, 0);
    assert_eq!(first.scope(), Scope::Parent(show.id));

    let listed = seasons.get_all(Scope::Parent(show.id)).unwrap();
    assert_eq!(listed, vec![first.clone(), second]);
    assert_eq!(listed[0].subtitles, vec![Language::Cz]);
    assert_eq!(episodes.get_all(Scope::Parent(first.id)).unwrap().len(), 2);
}

#[test]
fn child_collections_require_parent_scope() {
    let conn = open_db_in_memory().unwrap();
    let episodes = episode_service(&conn).unwrap();

    let err = episodes.get_all(Scope::Root).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::InvalidScope {
            label: "episode",
            ..
        })
    ));
}

#[test]
fn removing_show_cascades_to_seasons_and_episodes() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();

    let show = shows.add(&common::show(&genres)).unwrap();
    let season = seasons.add(&common::season(show.id, 1)).unwrap();
    let episode = episodes.add(&common::episode(season.id, 1)).unwrap();

    shows.remove(show.id).unwrap();

    assert_eq!(seasons.get(season.id).unwrap(), None);
    assert_eq!(episodes.get(episode.id).unwrap(), None);
}

#[test]
fn removing_season_keeps_show_and_sibling_seasons() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();

    let show = shows.add(&common::show(&genres)).unwrap();
    let first = seasons.add(&common::season(show.id, 1)).unwrap();
    let second = seasons.add(&common::season(show.id, 2)).unwrap();
    episodes.add(&common::episode(first.id, 1)).unwrap();

    seasons.remove(first.id).unwrap();

    assert!(shows.get(show.id).unwrap().is_some());
    assert_eq!(seasons.get_all(Scope::Parent(show.id)).unwrap(), vec![second]);
    assert!(episodes.get_all(Scope::Parent(first.id)).unwrap().is_empty());
}

#[test]
fn duplicating_show_copies_whole_tree() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy", "Drama"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();

    let show = shows.add(&common::show(&genres)).unwrap();
    for number in 1..=2 {
        let season = seasons.add(&common::season(show.id, number)).unwrap();
        for episode in 1..=3 {
            episodes.add(&common::episode(season.id, episode)).unwrap();
        }
    }

    let copy = shows.duplicate(show.id).unwrap();
    assert_ne!(copy.id, show.id);
    assert_eq!(copy.position, 1);
    assert_eq!(shows.get(copy.id).unwrap().unwrap().genres, genres);

    let copied_seasons = seasons.get_all(Scope::Parent(copy.id)).unwrap();
    assert_eq!(copied_seasons.len(), 2);
    assert_eq!(
        copied_seasons
            .iter()
            .map(|season| season.number)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );
    for season in &copied_seasons {
        assert_eq!(season.show_id, copy.id);
        assert_eq!(season.subtitles, vec![Language::Cz]);
        let copied_episodes = episodes.get_all(Scope::Parent(season.id)).unwrap();
        assert_eq!(copied_episodes.len(), 3);
        assert!(copied_episodes
            .iter()
            .all(|episode| episode.season_id == season.id));
    }

    assert_eq!(seasons.get_all(Scope::Parent(show.id)).unwrap().len(), 2);
}

#[test]
fn duplicating_season_stays_in_same_show() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();

    let show = shows.add(&common::show(&genres)).unwrap();
    let season = seasons.add(&common::season(show.id, 1)).unwrap();
    episodes.add(&common::episode(season.id, 1)).unwrap();

    let copy = seasons.duplicate(season.id).unwrap();

    assert_eq!(copy.show_id, show.id);
    assert_eq!(copy.position, 1);
    assert_eq!(episodes.get_all(Scope::Parent(copy.id)).unwrap().len(), 1);
}

#[test]
fn season_requires_existing_show_and_ordered_years() {
    let conn = open_db_in_memory().unwrap();
    let seasons = season_service(&conn).unwrap();

    let mut season = common::season(Uuid::new_v4(), 0);
    season.start_year = 2001;
    season.end_year = 2000;
    season.subtitles = vec![Language::En, Language::En];

    let err = seasons.add(&season).unwrap_err();
    for key in [
        "SHOW_NOT_EXIST",
        "SEASON_NUMBER_NOT_POSITIVE",
        "SEASON_YEARS_NOT_VALID",
        "SEASON_SUBTITLES_DUPLICATE",
    ] {
        assert!(err.has_event(key), "missing event {key}: {err}");
    }
}

#[test]
fn episode_requires_existing_season_and_valid_fields() {
    let conn = open_db_in_memory().unwrap();
    let episodes = episode_service(&conn).unwrap();

    let mut episode = common::episode(Uuid::new_v4(), -1);
    episode.name = " ".to_string();
    episode.length = -10;

    let err = episodes.add(&episode).unwrap_err();
    for key in [
        "SEASON_NOT_EXIST",
        "EPISODE_NUMBER_NOT_POSITIVE",
        "EPISODE_NAME_EMPTY",
        "EPISODE_LENGTH_NEGATIVE",
    ] {
        assert!(err.has_event(key), "missing event {key}: {err}");
    }
}

#[test]
fn show_requires_genres_and_names() {
    let conn = open_db_in_memory().unwrap();
    let shows = show_service(&conn).unwrap();

    let mut show = common::show(&[]);
    show.original_name = String::new();

    let err = shows.add(&show).unwrap_err();
    assert!(err.has_event("SHOW_ORIGINAL_NAME_EMPTY"));
    assert!(err.has_event("SHOW_GENRES_EMPTY"));
}

#[test]
fn updating_episode_keeps_parent_and_position() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let show = show_service(&conn)
        .unwrap()
        .add(&common::show(&genres))
        .unwrap();
    let season = season_service(&conn)
        .unwrap()
        .add(&common::season(show.id, 1))
        .unwrap();
    let episodes = episode_service(&conn).unwrap();
    episodes.add(&common::episode(season.id, 1)).unwrap();
    let mut second = episodes.add(&common::episode(season.id, 2)).unwrap();

    second.name = "The One Where It All Began".to_string();
    second.length = 1_400;
    episodes.update(&second).unwrap();

    let loaded = episodes.get(second.id).unwrap().unwrap();
    assert_eq!(loaded.name, "The One Where It All Began");
    assert_eq!(loaded.length, 1_400);
    assert_eq!(loaded.position, 1);
    assert_eq!(loaded.season_id, season.id);
}

#[test]
fn season_years_must_fall_in_catalog_range() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let show = show_service(&conn)
        .unwrap()
        .add(&common::show(&genres))
        .unwrap();
    let seasons = season_service(&conn).unwrap();

    let mut season = common::season(show.id, 1);
    season.start_year = 1929;
    season.end_year = 3000;

    let err = seasons.add(&season).unwrap_err();
    assert!(err.has_event("SEASON_START_YEAR_NOT_VALID"));
    assert!(err.has_event("SEASON_END_YEAR_NOT_VALID"));
    assert!(!err.has_event("SEASON_YEARS_NOT_VALID"));

    season.start_year = 1930;
    season.end_year = 1930;
    assert_eq!(seasons.add(&season).unwrap().start_year, 1930);
}

#[test]
fn show_imdb_code_must_be_in_range() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();

    let mut show = common::show(&genres);
    show.imdb_code = Some(10_000_000);
    assert!(shows
        .add(&show)
        .unwrap_err()
        .has_event("SHOW_IMDB_CODE_NOT_VALID"));

    show.imdb_code = Some(0);
    assert!(shows
        .add(&show)
        .unwrap_err()
        .has_event("SHOW_IMDB_CODE_NOT_VALID"));

    show.imdb_code = None;
    assert!(shows.add(&show).is_ok());
}

#[test]
fn updating_season_under_another_show_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Comedy"]);
    let shows = show_service(&conn).unwrap();
    let seasons = season_service(&conn).unwrap();
    let first_show = shows.add(&common::show(&genres)).unwrap();
    let second_show = shows.add(&common::show(&genres)).unwrap();
    let mut season = seasons.add(&common::season(first_show.id, 1)).unwrap();

    season.show_id = second_show.id;
    season.number = 7;
    let err = seasons.update(&season).unwrap_err();
    assert!(err.has_event("SEASON_PARENT_CHANGED"));

    let stored = seasons.get(season.id).unwrap().unwrap();
    assert_eq!(stored.show_id, first_show.id);
    assert_eq!(stored.number, 1);
    assert!(seasons
        .get_all(Scope::Parent(second_show.id))
        .unwrap()
        .is_empty());
}
