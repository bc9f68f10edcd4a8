use std::collections::BTreeMap;
use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;

use lingua_core::model::{
    MonthId, MonthlyGoals, Profile, ProfileId, ProfileRegistry, RadarSnapshot, Resource,
    ResourceDraft, ResourceId, ResourceKind, ResourceStatus, Settings, SettingsDraft, Skill,
    SkillMap, Theme, TrackerLog,
};
use lingua_core::time::fixed_now;
use storage::Storage;

fn json_storage() -> (TempDir, Storage) {
    let dir = TempDir::new().expect("create temp dir");
    let storage = Storage::json(dir.path().join("lingua_data")).expect("open storage");
    (dir, storage)
}

fn profile(id: &str) -> ProfileId {
    ProfileId::new(id).expect("valid profile id")
}

#[test]
fn registry_roundtrip() {
    let (_dir, storage) = json_storage();
    assert!(storage.profiles.load_registry().unwrap().is_none());

    let mut registry = ProfileRegistry::bootstrap(fixed_now());
    registry
        .add(Profile::new(profile("spanish"), "Spanish", fixed_now()).unwrap())
        .unwrap();
    storage.profiles.save_registry(&registry).unwrap();

    let record = storage.profiles.load_registry().unwrap().unwrap();
    assert!(record.active.is_default());
    assert_eq!(record.profiles.len(), 2);
    let spanish = record
        .profiles
        .iter()
        .find(|p| p.id().as_str() == "spanish")
        .unwrap();
    assert_eq!(spanish.display_name(), "Spanish");
    assert_eq!(spanish.created_at(), fixed_now());
}

#[test]
fn tracker_roundtrip_including_empty() {
    let (_dir, storage) = json_storage();
    let id = profile("spanish");

    let empty = storage.tracker.load_tracker(&id).unwrap();
    assert_eq!(empty, TrackerLog::new());

    let mut log = TrackerLog::new();
    log.set(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), Skill::Reading, true);
    log.set(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), Skill::Speaking, true);
    storage.tracker.save_tracker(&id, &log).unwrap();

    assert_eq!(storage.tracker.load_tracker(&id).unwrap(), log);
}

#[test]
fn goals_roundtrip_preserves_slots_and_notes() {
    let (_dir, storage) = json_storage();
    let id = profile("spanish");
    let month = MonthId::new(2024, 3).unwrap();

    let mut monthly = MonthlyGoals::new(month);
    let slot = monthly.slot_mut(0).unwrap();
    slot.set_title("Finish subjunctive drills", fixed_now());
    slot.add_subtask("present subjunctive").unwrap();
    slot.add_subtask("past subjunctive").unwrap();
    slot.set_subtask_done(0, true).unwrap();
    slot.set_completed(true, fixed_now());
    monthly.set_notes("verb-heavy month");

    let mut all = BTreeMap::new();
    all.insert(month, monthly.clone());
    storage.goals.save_goals(&id, &all).unwrap();

    let loaded = storage.goals.load_goals(&id).unwrap();
    assert_eq!(loaded.get(&month), Some(&monthly));
}

#[test]
fn resources_roundtrip() {
    let (_dir, storage) = json_storage();
    let id = profile("spanish");

    let resource = ResourceDraft {
        title: "Language Transfer".into(),
        kind: ResourceKind::Podcast,
        url: "https://www.languagetransfer.org".into(),
        status: ResourceStatus::InProgress,
        notes: "complete Spanish track".into(),
        tags: vec!["audio".into()],
    }
    .validate(ResourceId::generate())
    .unwrap();

    storage.resources.save_resources(&id, &[resource.clone()]).unwrap();
    assert_eq!(storage.resources.load_resources(&id).unwrap(), vec![resource]);
}

#[test]
fn radar_roundtrip() {
    let (_dir, storage) = json_storage();
    let id = profile("spanish");
    let month = MonthId::new(2024, 3).unwrap();

    let snapshot = RadarSnapshot::new(month, SkillMap::splat(4)).unwrap();
    let mut all = BTreeMap::new();
    all.insert(month, snapshot);
    storage.radar.save_snapshots(&id, &all).unwrap();

    let loaded = storage.radar.load_snapshots(&id).unwrap();
    assert_eq!(loaded.get(&month), Some(&snapshot));
}

#[test]
fn plan_and_settings_roundtrip() {
    let (_dir, storage) = json_storage();
    let id = profile("spanish");

    let mut plan = storage.daily_plan.load_plan(&id).unwrap();
    assert!(plan.is_blank());
    plan.set_task(0, "10 min shadowing").unwrap();
    storage.daily_plan.save_plan(&id, &plan).unwrap();
    assert_eq!(storage.daily_plan.load_plan(&id).unwrap(), plan);

    assert_eq!(storage.settings.load_settings().unwrap(), Settings::default());
    let settings = SettingsDraft {
        theme: Theme::Dark,
        font_size: 16,
        open_on_startup: true,
    }
    .validate()
    .unwrap();
    storage.settings.save_settings(&settings).unwrap();
    assert_eq!(storage.settings.load_settings().unwrap(), settings);
}

#[test]
fn missing_documents_are_seeded_with_defaults() {
    let (dir, storage) = json_storage();
    let id = profile("spanish");

    let _ = storage.tracker.load_tracker(&id).unwrap();
    let seeded = dir
        .path()
        .join("lingua_data")
        .join("profiles")
        .join("spanish")
        .join("tracker.json");
    assert!(seeded.exists());
}

#[test]
fn corrupt_document_recovers_to_default() {
    let (dir, storage) = json_storage();
    let id = profile("spanish");
    let path = dir
        .path()
        .join("lingua_data")
        .join("profiles")
        .join("spanish")
        .join("tracker.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ this is not json").unwrap();

    let log = storage.tracker.load_tracker(&id).unwrap();
    assert_eq!(log, TrackerLog::new());
}

#[test]
fn unknown_fields_are_tolerated() {
    let (dir, storage) = json_storage();
    let path = dir.path().join("lingua_data").join("settings.json");
    fs::write(
        &path,
        r#"{"theme":"dark","font_size":14,"open_on_startup":true,"some_future_field":42}"#,
    )
    .unwrap();

    let settings = storage.settings.load_settings().unwrap();
    assert_eq!(settings.theme(), Theme::Dark);
    assert_eq!(settings.font_size(), 14);
    assert!(settings.open_on_startup());
}

#[test]
fn missing_fields_are_default_filled() {
    let (dir, storage) = json_storage();
    let path = dir.path().join("lingua_data").join("settings.json");
    fs::write(&path, r#"{"theme":"light"}"#).unwrap();

    let settings = storage.settings.load_settings().unwrap();
    assert_eq!(settings.theme(), Theme::Light);
    assert_eq!(settings.font_size(), Settings::default().font_size());
}

#[test]
fn delete_profile_data_leaves_siblings_untouched() {
    let (dir, storage) = json_storage();
    let spanish = profile("spanish");
    let french = profile("french");

    let mut log = TrackerLog::new();
    log.set(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), Skill::Writing, true);
    storage.tracker.save_tracker(&spanish, &log).unwrap();
    storage.tracker.save_tracker(&french, &log).unwrap();

    let french_doc = dir
        .path()
        .join("lingua_data")
        .join("profiles")
        .join("french")
        .join("tracker.json");
    let before = fs::read(&french_doc).unwrap();

    storage.profiles.delete_profile_data(&spanish).unwrap();

    assert!(!dir
        .path()
        .join("lingua_data")
        .join("profiles")
        .join("spanish")
        .exists());
    // Byte-for-byte untouched.
    assert_eq!(fs::read(&french_doc).unwrap(), before);

    // Deleting again is a no-op, not an error.
    storage.profiles.delete_profile_data(&spanish).unwrap();
}

#[test]
fn list_profile_data_reports_directories() {
    let (_dir, storage) = json_storage();
    storage.profiles.create_profile_data(&profile("spanish")).unwrap();
    storage.profiles.create_profile_data(&profile("french")).unwrap();

    let mut ids = storage.profiles.list_profile_data().unwrap();
    ids.sort();
    assert_eq!(ids, vec![profile("french"), profile("spanish")]);
}
