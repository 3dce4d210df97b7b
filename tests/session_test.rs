// ==========================================
// 会话状态集成测试
// ==========================================
// 测试目标: 变更事件、快照导出/导入、单日编辑流程
// ==========================================

mod test_helpers;

use shift_calendar::api::{clear_day_edit, save_day_edit, ApiError, DayEditDraft};
use shift_calendar::app::ScheduleEventType;
use shift_calendar::domain::{ScheduleOverride, ShiftTimeRange, ShiftType, WorkShift};
use shift_calendar::OverrideChange;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use test_helpers::{create_demo_state, create_recorded_state, create_small_state};

// ==========================================
// 变更事件
// ==========================================

#[test]
fn test_events_only_for_real_changes() {
    let (state, publisher) = create_recorded_state();

    state.update_override("2025-09-10", |_| {
        Some(ScheduleOverride::new().with_shift(ShiftType::Mid))
    });
    state.update_override("2025-09-10", |prev| prev.cloned());
    state.update_override("2025-09-11", |_| None);
    state.update_override("2025-09-10", |_| None);

    state.set_shift_time(WorkShift::Late, Some(ShiftTimeRange::new("22:30", "08:30")));
    state.set_shift_time(WorkShift::Late, Some(ShiftTimeRange::new("23:00", "07:00")));
    state.add_colleague("A");
    state.add_colleague("E");

    let events = publisher.drain();
    let types: Vec<_> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![
            ScheduleEventType::OverrideUpdated,
            ScheduleEventType::OverrideRemoved,
            ScheduleEventType::ShiftTimesChanged,
            ScheduleEventType::ColleaguePoolChanged,
        ]
    );
    assert_eq!(events[0].key.as_deref(), Some("2025-09-10"));
    assert_eq!(events[2].key, None);
}

// ==========================================
// 覆写更新
// ==========================================

#[test]
fn test_updater_can_read_session_state() {
    let state = Arc::new(create_small_state());
    let (tx, rx) = mpsc::channel();

    let worker = Arc::clone(&state);
    thread::spawn(move || {
        let change = worker.update_override("2025-09-10", |prev| {
            // 变换函数内读取会话: 按当前解析结果决定新班次
            let current = worker
                .get_schedule_for_date("2025-09-10", None)
                .expect("日期键合法");
            let pool = worker.colleagues();
            let mut next = prev.cloned().unwrap_or_default();
            next.shift = Some(if current.shift == ShiftType::Off {
                ShiftType::Early
            } else {
                ShiftType::Off
            });
            next.colleagues = Some(pool.into_iter().take(1).collect());
            Some(next)
        });
        let _ = tx.send(change);
    });

    let change = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("update_override 在变换函数读取状态时未返回");
    assert_eq!(change, OverrideChange::Updated);

    let resolved = state.get_schedule_for_date("2025-09-10", None).unwrap();
    assert_eq!(resolved.shift, ShiftType::Early);
    assert_eq!(resolved.colleagues, vec!["A"]);
}

#[test]
fn test_malformed_key_update_is_ignored() {
    let (state, publisher) = create_recorded_state();
    state.update_override("2025-09-10", |_| {
        Some(ScheduleOverride::new().with_shift(ShiftType::Mid))
    });
    publisher.drain();

    for bad in ["2025-9-1", "2025-02-30", "today"] {
        let change = state.update_override(bad, |_| {
            Some(ScheduleOverride::new().with_shift(ShiftType::Early))
        });
        assert_eq!(change, OverrideChange::Unchanged, "{} 不应写入", bad);
        assert!(!state.has_override(bad));
    }
    assert_eq!(state.override_count(), 1);
    assert!(publisher.drain().is_empty());

    // 导出结果始终可以被导入
    let json = state.export_snapshot().unwrap();
    let target = create_small_state();
    target.import_snapshot(&json).unwrap();
    assert_eq!(target.override_count(), 1);
    assert_eq!(
        target.get_override("2025-09-10"),
        state.get_override("2025-09-10")
    );
}

// ==========================================
// 快照导出/导入
// ==========================================

#[test]
fn test_snapshot_round_trip_between_sessions() {
    let source = create_small_state();
    source.update_override("2025-09-10", |_| {
        Some(
            ScheduleOverride::new()
                .with_shift(ShiftType::Late)
                .with_shift_time(None)
                .with_colleagues(["C"]),
        )
    });
    source.set_shift_time(WorkShift::Early, Some(ShiftTimeRange::new("08:00", "15:00")));
    source.add_colleague("E");
    let json = source.export_snapshot().unwrap();

    let (target, publisher) = create_recorded_state();
    target.import_snapshot(&json).unwrap();

    assert_eq!(
        target.get_schedule_for_date("2025-09-10", None).unwrap(),
        source.get_schedule_for_date("2025-09-10", None).unwrap()
    );
    // 显式 null 的时间必须原样保留
    assert_eq!(
        target.get_override("2025-09-10").unwrap().shift_time,
        Some(None)
    );
    assert_eq!(target.colleagues(), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(target.shift_times(), source.shift_times());

    let events = publisher.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, ScheduleEventType::SnapshotImported);
}

#[test]
fn test_import_rejects_bad_input_without_changes() {
    let state = create_small_state();
    state.update_override("2025-09-10", |_| {
        Some(ScheduleOverride::new().with_shift(ShiftType::Early))
    });

    let broken = state.import_snapshot("{");
    assert!(matches!(broken, Err(ApiError::Serialization(_))));

    let bad_key = state.import_snapshot(
        r#"{"overrides": {"2025-13-01": {"shift": "mid"}}, "shiftTimes": {}, "colleagues": []}"#,
    );
    assert!(matches!(bad_key, Err(ApiError::MalformedDateKey(_))));

    assert!(state.has_override("2025-09-10"));
    assert_eq!(state.colleagues().len(), 4);
}

#[test]
fn test_import_drops_empty_overrides() {
    let state = create_small_state();
    state
        .import_snapshot(
            r#"{"overrides": {"2025-09-10": {}, "2025-09-11": {"notes": null}}, "shiftTimes": {}}"#,
        )
        .unwrap();

    assert!(!state.has_override("2025-09-10"));
    // notes: null 是显式字段, 不算空
    assert!(state.has_override("2025-09-11"));
    assert!(state.colleagues().is_empty());
}

// ==========================================
// 单日编辑流程
// ==========================================

#[test]
fn test_edit_then_clear_restores_derived_default() {
    let state = create_demo_state();
    let original = state.get_schedule_for_date("2025-09-09", None).unwrap();

    let mut draft = DayEditDraft::from_schedule(&original);
    draft.select_shift(ShiftType::Early, &original, &state.shift_times());
    assert_eq!(draft.shift_time.as_deref(), Some("07:30 - 14:30"));
    draft.toggle_colleague("李晓");

    let change = save_day_edit(&state, "2025-09-09", &draft).unwrap();
    assert_eq!(change, OverrideChange::Updated);

    let edited = state.get_schedule_for_date("2025-09-09", None).unwrap();
    assert_eq!(edited.shift, ShiftType::Early);
    assert!(edited.colleagues.contains(&"李晓".to_string()));
    // 任务未改动, 不写入覆写
    assert!(state.get_override("2025-09-09").unwrap().tasks.is_none());
    assert_eq!(edited.tasks, original.tasks);

    // 切回原班次时恢复种子时间
    let mut back = DayEditDraft::from_schedule(&edited);
    back.select_shift(ShiftType::Late, &original, &state.shift_times());
    assert_eq!(back.shift_time.as_deref(), Some("22:30 - 08:30"));

    assert_eq!(clear_day_edit(&state, "2025-09-09"), OverrideChange::Removed);
    assert_eq!(state.get_schedule_for_date("2025-09-09", None).unwrap(), original);
}

#[test]
fn test_saving_off_day_discards_colleagues() {
    let state = create_small_state();
    let snapshot = state.get_schedule_for_date("2025-09-10", None).unwrap();
    let draft = DayEditDraft {
        shift: ShiftType::Off,
        shift_time: Some("09:00 - 18:00".to_string()),
        colleagues: vec!["A".to_string()],
        tasks: snapshot.tasks.clone(),
    };

    save_day_edit(&state, "2025-09-10", &draft).unwrap();
    let entry = state.get_override("2025-09-10").unwrap();
    assert_eq!(entry.shift, Some(ShiftType::Off));
    assert_eq!(entry.shift_time, Some(None));
    assert_eq!(entry.colleagues, Some(Vec::new()));
}
