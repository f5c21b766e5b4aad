mod common;

use catalog_core::db::open_db_in_memory;
use catalog_core::service::{
    book_service, episode_service, game_service, movie_service, music_service, program_service,
    season_service, show_service, song_service,
};
use catalog_core::{CatalogStats, SqliteStatsRepository, StatsRepository};

#[test]
fn empty_catalog_reports_zeroes() {
    let conn = open_db_in_memory().unwrap();
    let stats = SqliteStatsRepository::try_new(&conn)
        .unwrap()
        .catalog_stats()
        .unwrap();

    assert_eq!(stats, CatalogStats::default());
}

#[test]
fn catalog_stats_sum_every_collection() {
    let conn = open_db_in_memory().unwrap();
    let genres = common::add_genres(&conn, &["Drama", "Comedy"]);

    let movies = movie_service(&conn).unwrap();
    movies.add(&common::movie(&genres)).unwrap();
    movies.add(&common::movie(&genres[..1])).unwrap();

    let show = show_service(&conn)
        .unwrap()
        .add(&common::show(&genres))
        .unwrap();
    let seasons = season_service(&conn).unwrap();
    let episodes = episode_service(&conn).unwrap();
    for number in 1..=2 {
        let season = seasons.add(&common::season(show.id, number)).unwrap();
        episodes.add(&common::episode(season.id, 1)).unwrap();
    }

    game_service(&conn).unwrap().add(&common::game("Mafia")).unwrap();
    program_service(&conn)
        .unwrap()
        .add(&common::program("Photoshop"))
        .unwrap();
    let album = music_service(&conn)
        .unwrap()
        .add(&common::music("Abbey Road"))
        .unwrap();
    let songs = song_service(&conn).unwrap();
    songs.add(&common::song(album.id, "Come Together")).unwrap();
    songs.add(&common::song(album.id, "Something")).unwrap();
    book_service(&conn).unwrap().add(&common::book("Babička")).unwrap();

    let stats = SqliteStatsRepository::try_new(&conn)
        .unwrap()
        .catalog_stats()
        .unwrap();

    assert_eq!(stats.genres_count, 2);
    assert_eq!(stats.movies.count, 2);
    assert_eq!(stats.movies.media_count, 4);
    assert_eq!(stats.movies.total_length, 14_400);
    assert_eq!(stats.shows.count, 1);
    assert_eq!(stats.shows.seasons_count, 2);
    assert_eq!(stats.shows.episodes_count, 2);
    assert_eq!(stats.shows.total_length, 2_640);
    assert_eq!((stats.games.count, stats.games.media_count), (1, 2));
    assert_eq!((stats.programs.count, stats.programs.media_count), (1, 1));
    assert_eq!(stats.music.count, 1);
    assert_eq!(stats.music.media_count, 1);
    assert_eq!(stats.music.songs_count, 2);
    assert_eq!(stats.music.total_length, 480);
    assert_eq!(stats.books_count, 1);
}
