mod common;

use chrono::{Datelike, Weekday};
use common::{TestApp, at, d, sample_series};

// 2024-01-01 opens ISO week 1, so the four Mondays of January split
// cleanly into odd weeks (1, 3) and even weeks (2, 4).

#[tokio::test]
async fn test_biweekly_odd_takes_odd_iso_weeks() {
    let app = TestApp::new().await;
    let series = sample_series(
        "biweekly_odd",
        &[Weekday::Mon],
        d(2024, 1, 1),
        d(2024, 1, 28),
    );

    app.state
        .synchronizer
        .cascade_creation(&series, at(2023, 12, 15, 12, 0))
        .await
        .unwrap();

    let dates = app
        .state
        .event_repo
        .materialized_dates(&series.id)
        .await
        .unwrap();
    assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 15)]);
    for date in dates {
        assert_eq!(date.iso_week().week() % 2, 1);
    }
}

#[tokio::test]
async fn test_biweekly_even_takes_even_iso_weeks() {
    let app = TestApp::new().await;
    let series = sample_series(
        "biweekly_even",
        &[Weekday::Mon],
        d(2024, 1, 1),
        d(2024, 1, 28),
    );

    app.state
        .synchronizer
        .cascade_creation(&series, at(2023, 12, 15, 12, 0))
        .await
        .unwrap();

    let dates = app
        .state
        .event_repo
        .materialized_dates(&series.id)
        .await
        .unwrap();
    assert_eq!(dates, vec![d(2024, 1, 8), d(2024, 1, 22)]);
    for date in dates {
        assert_eq!(date.iso_week().week() % 2, 0);
    }
}

#[tokio::test]
async fn test_odd_and_even_partition_the_weeks() {
    let app = TestApp::new().await;
    let odd = sample_series(
        "biweekly_odd",
        &[Weekday::Thu],
        d(2024, 1, 1),
        d(2024, 1, 28),
    );
    let even = sample_series(
        "biweekly_even",
        &[Weekday::Thu],
        d(2024, 1, 1),
        d(2024, 1, 28),
    );
    let now = at(2023, 12, 15, 12, 0);

    app.state.synchronizer.cascade_creation(&odd, now).await.unwrap();
    app.state.synchronizer.cascade_creation(&even, now).await.unwrap();

    let odd_dates = app.state.event_repo.materialized_dates(&odd.id).await.unwrap();
    let even_dates = app.state.event_repo.materialized_dates(&even.id).await.unwrap();

    assert_eq!(odd_dates.len(), 2);
    assert_eq!(even_dates.len(), 2);
    assert!(odd_dates.iter().all(|date| !even_dates.contains(date)));
}
