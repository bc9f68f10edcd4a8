use chrono::NaiveDate;

use lingua_core::model::{MonthId, ProfileId, Skill, SkillMap, Trend};
use lingua_core::time::clock_at;
use services::{RadarService, RadarServiceError};
use storage::Storage;

fn service() -> (RadarService, ProfileId) {
    let storage = Storage::in_memory();
    let clock = clock_at(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    (RadarService::new(clock, storage.radar), ProfileId::default_profile())
}

fn ratings(r: u8, l: u8, s: u8, w: u8) -> SkillMap<u8> {
    let mut map = SkillMap::default();
    map.set(Skill::Reading, r);
    map.set(Skill::Listening, l);
    map.set(Skill::Speaking, s);
    map.set(Skill::Writing, w);
    map
}

#[test]
fn equal_ratings_score_a_perfect_balance() {
    let (radar, profile) = service();
    let month = MonthId::new(2024, 3).unwrap();

    radar.save(&profile, month, ratings(5, 5, 5, 5)).unwrap();
    let view = radar.view(&profile, month).unwrap();
    assert_eq!(view.balance_index, Some(100));

    radar.save(&profile, month, ratings(1, 5, 1, 5)).unwrap();
    let view = radar.view(&profile, month).unwrap();
    assert!(view.balance_index.unwrap() < 100);
}

#[test]
fn out_of_range_ratings_are_rejected_before_write() {
    let (radar, profile) = service();
    let month = MonthId::new(2024, 3).unwrap();

    let err = radar.save(&profile, month, ratings(0, 3, 3, 3)).unwrap_err();
    assert!(matches!(err, RadarServiceError::Radar(_)));
    assert!(radar.snapshots(&profile).unwrap().is_empty());
}

#[test]
fn saving_a_month_overwrites_only_that_month() {
    let (radar, profile) = service();
    let feb = MonthId::new(2024, 2).unwrap();
    let mar = MonthId::new(2024, 3).unwrap();

    radar.save(&profile, feb, ratings(2, 2, 2, 2)).unwrap();
    radar.save(&profile, mar, ratings(3, 3, 3, 3)).unwrap();
    radar.save(&profile, mar, ratings(4, 4, 4, 4)).unwrap();

    let all = radar.snapshots(&profile).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.get(&feb).unwrap().rating(Skill::Reading), 2);
    assert_eq!(all.get(&mar).unwrap().rating(Skill::Reading), 4);
}

#[test]
fn trends_compare_with_the_immediately_preceding_month() {
    let (radar, profile) = service();
    let feb = MonthId::new(2024, 2).unwrap();
    let mar = MonthId::new(2024, 3).unwrap();

    radar.save(&profile, feb, ratings(3, 3, 3, 3)).unwrap();
    radar.save(&profile, mar, ratings(4, 2, 3, 5)).unwrap();

    let view = radar.view(&profile, mar).unwrap();
    assert_eq!(*view.trends.get(Skill::Reading), Trend::Improved);
    assert_eq!(*view.trends.get(Skill::Listening), Trend::Declined);
    assert_eq!(*view.trends.get(Skill::Speaking), Trend::Stable);
    assert_eq!(*view.trends.get(Skill::Writing), Trend::Improved);

    // Without a preceding snapshot, everything is stable.
    let view = radar.view(&profile, feb).unwrap();
    assert!(Skill::ALL.iter().all(|&s| *view.trends.get(s) == Trend::Stable));
}

#[test]
fn view_of_an_unsaved_month_has_no_snapshot() {
    let (radar, profile) = service();
    let view = radar.view(&profile, MonthId::new(2024, 3).unwrap()).unwrap();
    assert!(view.snapshot.is_none());
    assert!(view.balance_index.is_none());
}

#[test]
fn days_since_last_counts_from_month_start() {
    let (radar, profile) = service();
    assert_eq!(radar.days_since_last(&profile).unwrap(), None);

    radar
        .save(&profile, MonthId::new(2024, 2).unwrap(), ratings(3, 3, 3, 3))
        .unwrap();
    // Feb 1 to Mar 15 (clock date) is 43 days.
    assert_eq!(radar.days_since_last(&profile).unwrap(), Some(43));
}
