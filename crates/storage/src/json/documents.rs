//! Persisted document shapes and their mapping to domain types.
//!
//! Every field carries a serde default so documents written by older
//! versions load cleanly; unknown fields are ignored. Mapping is lenient:
//! entries that cannot be interpreted are counted and skipped rather than
//! failing the whole document.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lingua_core::model::{
    DailyPlan, GOAL_SLOTS, GoalCategory, GoalSlot, MonthId, MonthlyGoals, Profile, ProfileId,
    RadarSnapshot, Resource, ResourceId, ResourceKind, ResourceStatus, Settings, SkillMap,
    Subtask, Theme, TrackerLog,
};

use crate::repository::RegistryRecord;

/// Outcome of a lenient mapping pass.
pub(crate) struct Mapped<T> {
    pub value: T,
    pub skipped: usize,
}

//
// ─── REGISTRY ──────────────────────────────────────────────────────────────────
//

#[derive(Serialize, Deserialize)]
pub(crate) struct RegistryDocument {
    #[serde(default)]
    pub active_profile: String,
    #[serde(default)]
    pub profiles: Vec<ProfileEntry>,
    #[serde(default = "registry_version")]
    pub version: String,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct ProfileEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

fn registry_version() -> String {
    "1.0".to_string()
}

pub(crate) fn registry_to_document(record: &RegistryRecord) -> RegistryDocument {
    RegistryDocument {
        active_profile: record.active.to_string(),
        profiles: record
            .profiles
            .iter()
            .map(|p| ProfileEntry {
                id: p.id().to_string(),
                display_name: p.display_name().to_string(),
                created_at: Some(p.created_at()),
                last_used: Some(p.last_used()),
            })
            .collect(),
        version: registry_version(),
    }
}

pub(crate) fn registry_from_document(doc: RegistryDocument) -> Mapped<RegistryRecord> {
    let mut skipped = 0;
    let mut profiles = Vec::with_capacity(doc.profiles.len());
    for entry in doc.profiles {
        let Ok(id) = ProfileId::new(entry.id) else {
            skipped += 1;
            continue;
        };
        let created_at = entry.created_at.unwrap_or_else(Utc::now);
        let last_used = entry.last_used.unwrap_or(created_at);
        profiles.push(Profile::from_persisted(
            id,
            entry.display_name,
            created_at,
            last_used,
        ));
    }

    let active = ProfileId::new(doc.active_profile)
        .unwrap_or_else(|_| ProfileId::default_profile());

    Mapped {
        value: RegistryRecord { active, profiles },
        skipped,
    }
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Tracker documents are a bare date → skill-marks map, dates as ISO
/// strings.
pub(crate) type TrackerDocument = BTreeMap<String, SkillMap<bool>>;

pub(crate) fn tracker_to_document(log: &TrackerLog) -> TrackerDocument {
    log.days()
        .iter()
        .map(|(date, marks)| (date.format("%Y-%m-%d").to_string(), *marks))
        .collect()
}

pub(crate) fn tracker_from_document(doc: TrackerDocument) -> Mapped<TrackerLog> {
    let mut skipped = 0;
    let mut days = BTreeMap::new();
    for (raw_date, marks) in doc {
        match raw_date.parse::<NaiveDate>() {
            Ok(date) => {
                days.insert(date, marks);
            }
            Err(_) => skipped += 1,
        }
    }
    Mapped {
        value: TrackerLog::from_days(days),
        skipped,
    }
}

//
// ─── GOALS ─────────────────────────────────────────────────────────────────────
//

pub(crate) type GoalsDocument = BTreeMap<String, MonthEntry>;

#[derive(Default, Serialize, Deserialize)]
pub(crate) struct MonthEntry {
    #[serde(default)]
    pub slots: Vec<SlotEntry>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Default, Serialize, Deserialize)]
pub(crate) struct SlotEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub subtasks: Vec<SubtaskEntry>,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Default, Serialize, Deserialize)]
pub(crate) struct SubtaskEntry {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

pub(crate) fn goals_to_document(goals: &BTreeMap<MonthId, MonthlyGoals>) -> GoalsDocument {
    goals
        .iter()
        .map(|(month, monthly)| {
            let slots = monthly
                .slots()
                .iter()
                .map(|slot| SlotEntry {
                    title: slot.title().to_string(),
                    category: slot.category(),
                    subtasks: slot
                        .subtasks()
                        .iter()
                        .map(|s| SubtaskEntry {
                            text: s.text.clone(),
                            done: s.done,
                        })
                        .collect(),
                    reflection: slot.reflection().to_string(),
                    completed: slot.is_completed(),
                    created_at: slot.created_at(),
                    completed_at: slot.completed_at(),
                })
                .collect();
            (
                month.to_string(),
                MonthEntry {
                    slots,
                    notes: monthly.notes().to_string(),
                    archived: monthly.is_archived(),
                },
            )
        })
        .collect()
}

pub(crate) fn goals_from_document(doc: GoalsDocument) -> Mapped<BTreeMap<MonthId, MonthlyGoals>> {
    let mut skipped = 0;
    let mut goals = BTreeMap::new();
    for (raw_month, entry) in doc {
        let Ok(month) = raw_month.parse::<MonthId>() else {
            skipped += 1;
            continue;
        };
        goals.insert(month, month_from_entry(month, entry));
    }
    Mapped {
        value: goals,
        skipped,
    }
}

/// Normalizes a persisted month to exactly three slots; surplus slots are
/// dropped, missing ones are blank.
fn month_from_entry(month: MonthId, entry: MonthEntry) -> MonthlyGoals {
    let mut slots: [GoalSlot; GOAL_SLOTS] = Default::default();
    for (slot, persisted) in slots.iter_mut().zip(entry.slots) {
        *slot = GoalSlot::from_persisted(
            persisted.title,
            persisted.category,
            persisted
                .subtasks
                .into_iter()
                .map(|s| Subtask {
                    text: s.text,
                    done: s.done,
                })
                .collect(),
            persisted.reflection,
            persisted.completed,
            persisted.created_at,
            persisted.completed_at,
        );
    }
    MonthlyGoals::from_persisted(month, slots, entry.notes, entry.archived)
}

//
// ─── RESOURCES ─────────────────────────────────────────────────────────────────
//

pub(crate) type ResourcesDocument = Vec<ResourceEntry>;

#[derive(Default, Serialize, Deserialize)]
pub(crate) struct ResourceEntry {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub(crate) fn resources_to_document(resources: &[Resource]) -> ResourcesDocument {
    resources
        .iter()
        .map(|r| ResourceEntry {
            id: Some(r.id()),
            title: r.title().to_string(),
            kind: r.kind(),
            url: r.url().map(str::to_string),
            status: r.status(),
            notes: r.notes().to_string(),
            tags: r.tags().to_vec(),
        })
        .collect()
}

pub(crate) fn resources_from_document(doc: ResourcesDocument) -> Mapped<Vec<Resource>> {
    let mut skipped = 0;
    let mut resources = Vec::with_capacity(doc.len());
    for entry in doc {
        // Entries predating id assignment get a fresh one.
        let id = entry.id.unwrap_or_else(ResourceId::generate);
        match Resource::from_persisted(
            id,
            entry.title,
            entry.kind,
            entry.url,
            entry.status,
            entry.notes,
            entry.tags,
        ) {
            Ok(resource) => resources.push(resource),
            Err(_) => skipped += 1,
        }
    }
    Mapped {
        value: resources,
        skipped,
    }
}

//
// ─── RADAR ─────────────────────────────────────────────────────────────────────
//

pub(crate) type RadarDocument = BTreeMap<String, SkillMap<u8>>;

pub(crate) fn radar_to_document(
    snapshots: &BTreeMap<MonthId, RadarSnapshot>,
) -> RadarDocument {
    snapshots
        .iter()
        .map(|(month, snapshot)| (month.to_string(), *snapshot.ratings()))
        .collect()
}

pub(crate) fn radar_from_document(
    doc: RadarDocument,
) -> Mapped<BTreeMap<MonthId, RadarSnapshot>> {
    let mut skipped = 0;
    let mut snapshots = BTreeMap::new();
    for (raw_month, ratings) in doc {
        let Ok(month) = raw_month.parse::<MonthId>() else {
            skipped += 1;
            continue;
        };
        match RadarSnapshot::new(month, ratings) {
            Ok(snapshot) => {
                snapshots.insert(month, snapshot);
            }
            Err(_) => skipped += 1,
        }
    }
    Mapped {
        value: snapshots,
        skipped,
    }
}

//
// ─── DAILY PLAN ────────────────────────────────────────────────────────────────
//

#[derive(Default, Serialize, Deserialize)]
pub(crate) struct DailyPlanDocument {
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub show_on_startup: bool,
    // Legacy slot names kept for documents written before the four-slot
    // task list existed; used only to seed `tasks` on load.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub morning: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub afternoon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub evening: String,
}

pub(crate) fn plan_to_document(plan: &DailyPlan) -> DailyPlanDocument {
    DailyPlanDocument {
        tasks: plan.tasks().to_vec(),
        show_on_startup: plan.show_on_startup(),
        morning: String::new(),
        afternoon: String::new(),
        evening: String::new(),
    }
}

pub(crate) fn plan_from_document(doc: DailyPlanDocument) -> DailyPlan {
    let tasks = if doc.tasks.is_empty() {
        vec![doc.morning, doc.afternoon, doc.evening]
    } else {
        doc.tasks
    };
    DailyPlan::from_tasks(tasks, doc.show_on_startup)
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

#[derive(Serialize, Deserialize)]
pub(crate) struct SettingsDocument {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_font_size")]
    pub font_size: u8,
    #[serde(default)]
    pub open_on_startup: bool,
}

fn default_font_size() -> u8 {
    lingua_core::model::FONT_SIZE_DEFAULT
}

impl Default for SettingsDocument {
    fn default() -> Self {
        settings_to_document(&Settings::default())
    }
}

pub(crate) fn settings_to_document(settings: &Settings) -> SettingsDocument {
    SettingsDocument {
        theme: settings.theme(),
        font_size: settings.font_size(),
        open_on_startup: settings.open_on_startup(),
    }
}

pub(crate) fn settings_from_document(doc: SettingsDocument) -> Settings {
    Settings::from_persisted(doc.theme, doc.font_size, doc.open_on_startup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::Skill;
    use lingua_core::time::fixed_now;

    #[test]
    fn tracker_mapping_skips_bad_dates() {
        let mut doc = TrackerDocument::new();
        let mut marks = SkillMap::default();
        marks.set(Skill::Reading, true);
        doc.insert("2024-03-10".into(), marks);
        doc.insert("not-a-date".into(), marks);

        let mapped = tracker_from_document(doc);
        assert_eq!(mapped.skipped, 1);
        assert_eq!(mapped.value.days().len(), 1);
    }

    #[test]
    fn goals_mapping_normalizes_to_three_slots() {
        let mut doc = GoalsDocument::new();
        doc.insert(
            "2024-03".into(),
            MonthEntry {
                slots: vec![SlotEntry {
                    title: "Finish Genki II".into(),
                    ..SlotEntry::default()
                }],
                ..MonthEntry::default()
            },
        );

        let mapped = goals_from_document(doc);
        let month = MonthId::new(2024, 3).unwrap();
        let goals = mapped.value.get(&month).unwrap();
        assert_eq!(goals.slots().len(), GOAL_SLOTS);
        assert_eq!(goals.slot(0).unwrap().title(), "Finish Genki II");
        assert!(goals.slot(1).unwrap().is_blank());
    }

    #[test]
    fn resources_mapping_assigns_missing_ids_and_skips_invalid() {
        let doc = vec![
            ResourceEntry {
                title: "Genki I".into(),
                ..ResourceEntry::default()
            },
            ResourceEntry {
                // No title: invalid, skipped.
                ..ResourceEntry::default()
            },
        ];
        let mapped = resources_from_document(doc);
        assert_eq!(mapped.skipped, 1);
        assert_eq!(mapped.value.len(), 1);
        assert_eq!(mapped.value[0].title(), "Genki I");
    }

    #[test]
    fn radar_mapping_skips_out_of_range_ratings() {
        let mut doc = RadarDocument::new();
        doc.insert("2024-03".into(), SkillMap::splat(3));
        doc.insert("2024-04".into(), SkillMap::splat(0));

        let mapped = radar_from_document(doc);
        assert_eq!(mapped.skipped, 1);
        assert_eq!(mapped.value.len(), 1);
    }

    #[test]
    fn plan_mapping_honors_legacy_slots() {
        let doc = DailyPlanDocument {
            tasks: vec![],
            show_on_startup: true,
            morning: "anki".into(),
            afternoon: "podcast".into(),
            evening: "journal".into(),
        };
        let plan = plan_from_document(doc);
        assert_eq!(plan.task(0), Some("anki"));
        assert_eq!(plan.task(2), Some("journal"));
        assert_eq!(plan.task(3), Some(""));
        assert!(plan.show_on_startup());
    }

    #[test]
    fn registry_mapping_skips_invalid_ids() {
        let doc = RegistryDocument {
            active_profile: "spanish".into(),
            profiles: vec![
                ProfileEntry {
                    id: "spanish".into(),
                    display_name: "Spanish".into(),
                    created_at: Some(fixed_now()),
                    last_used: Some(fixed_now()),
                },
                ProfileEntry {
                    id: "BAD ID".into(),
                    display_name: "Broken".into(),
                    created_at: None,
                    last_used: None,
                },
            ],
            version: "1.0".into(),
        };
        let mapped = registry_from_document(doc);
        assert_eq!(mapped.skipped, 1);
        assert_eq!(mapped.value.profiles.len(), 1);
        assert_eq!(mapped.value.active.as_str(), "spanish");
    }

    #[test]
    fn settings_document_defaults_match_model_defaults() {
        let doc: SettingsDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(settings_from_document(doc), Settings::default());
    }
}
