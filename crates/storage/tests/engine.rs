use chrono::NaiveDate;
use storage::Database;
use storage::StorageError;
use storage::dto::{CreateEventRequest, CreateMemberRequest, RosterRow};
use storage::repository::{AttendanceRepository, EventRepository, MemberRepository, attendance};
use storage::services::{aggregator, attendance as attendance_svc, auth, import, lifecycle};

async fn test_db() -> (Database, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("points.db").display());
    let db = Database::new(&url).await.expect("open db");
    db.run_migrations().await.expect("migrations");
    (db, dir)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event_req(name: &str, d: NaiveDate, points: i64, roster: Vec<RosterRow>) -> CreateEventRequest {
    CreateEventRequest {
        name: name.to_string(),
        date: d,
        points,
        roster,
    }
}

fn row(name: &str, id: &str) -> RosterRow {
    RosterRow {
        name: name.to_string(),
        computing_id: id.to_string(),
    }
}

#[tokio::test]
async fn reimporting_same_roster_credits_once() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    // Scenario A: the same member appears twice in the sheet, and the
    // sheet is imported twice.
    let req = event_req("GBM 1", date(2025, 2, 1), 3, vec![]);
    let event = lifecycle::create_event(pool, &req).await.unwrap();
    let roster = vec![row("Morgan Lee", "abc1de"), row("Morgan Lee", "ABC1DE")];

    let first = import::import_roster(pool, &event, &roster).await.unwrap();
    assert_eq!(first.members_created, 1);
    assert_eq!(first.records_created, 1);
    assert_eq!(first.rows_skipped, 1);

    let second = import::import_roster(pool, &event, &roster).await.unwrap();
    assert_eq!(second.members_created, 0);
    assert_eq!(second.records_created, 0);
    assert_eq!(second.rows_skipped, 2);

    let member = MemberRepository::new(pool)
        .find_by_computing_id("abc1de")
        .await
        .unwrap();
    assert_eq!(member.total_points, 3);
    assert_eq!(member.spring_2025_total, 3);
    assert_eq!(member.fall_2025_total, 0);
    assert_eq!(member.email, "abc1de@virginia.edu");

    let records = AttendanceRepository::new(pool)
        .list_by_member(member.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].points, 3);
}

#[tokio::test]
async fn deleting_event_reverses_every_credit() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    // Scenario B: one event worth 5, credited, then deleted.
    let req = event_req("Service Day", date(2025, 9, 10), 5, vec![row("Sam Ortiz", "so4xy")]);
    let (event, summary) = lifecycle::create_event_with_roster(pool, &req).await.unwrap();
    assert_eq!(summary.records_created, 1);

    let members = MemberRepository::new(pool);
    let before = members.find_by_computing_id("so4xy").await.unwrap();
    assert_eq!(before.total_points, 5);
    assert_eq!(before.fall_2025_total, 5);

    let deleted = lifecycle::delete_event(pool, event.id).await.unwrap();
    assert_eq!(deleted.reversed_points, 5);
    assert_eq!(deleted.records_removed, 1);

    let after = members.find_by_computing_id("so4xy").await.unwrap();
    assert_eq!(after.total_points, 0);
    assert_eq!(after.fall_2025_total, 0);

    assert!(matches!(
        EventRepository::new(pool).find_by_id(event.id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn editing_points_applies_the_delta_not_the_value() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    // Scenario C: member attends two events; editing one attendance from
    // 2 to 4 moves the total by exactly 2.
    let e1 = lifecycle::create_event(pool, &event_req("E1", date(2025, 3, 1), 3, vec![]))
        .await
        .unwrap();
    let e2 = lifecycle::create_event(pool, &event_req("E2", date(2025, 3, 8), 2, vec![]))
        .await
        .unwrap();
    import::import_roster(pool, &e1, &[row("Riley Chen", "rc2ab")])
        .await
        .unwrap();
    import::import_roster(pool, &e2, &[row("Riley Chen", "rc2ab")])
        .await
        .unwrap();

    let member = MemberRepository::new(pool)
        .find_by_computing_id("rc2ab")
        .await
        .unwrap();
    assert_eq!(member.total_points, 5);

    let updated = attendance_svc::grant_attendance(pool, e2.id, member.id, Some(4))
        .await
        .unwrap();
    assert_eq!(updated.total_points, 7);
    assert_eq!(updated.spring_2025_total, 7);

    // Re-granting the same value is a no-op.
    let again = attendance_svc::grant_attendance(pool, e2.id, member.id, Some(4))
        .await
        .unwrap();
    assert_eq!(again.total_points, 7);
}

#[tokio::test]
async fn manual_grant_defaults_to_event_points() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let event = lifecycle::create_event(pool, &event_req("GBM 2", date(2025, 10, 2), 2, vec![]))
        .await
        .unwrap();
    let member = MemberRepository::new(pool)
        .create(&CreateMemberRequest {
            name: "Avery Park".to_string(),
            computing_id: "AP9QQ".to_string(),
            email: "ap9qq@virginia.edu".to_string(),
            password: None,
        })
        .await
        .unwrap();
    assert_eq!(member.computing_id, "ap9qq");

    let updated = attendance_svc::grant_attendance(pool, event.id, member.id, None)
        .await
        .unwrap();
    assert_eq!(updated.total_points, 2);
    assert_eq!(updated.fall_2025_total, 2);
}

#[tokio::test]
async fn out_of_term_events_credit_total_only() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let req = event_req("Summer Social", date(2025, 6, 20), 4, vec![row("Jo Walsh", "jw1cd")]);
    lifecycle::create_event_with_roster(pool, &req).await.unwrap();

    let member = MemberRepository::new(pool)
        .find_by_computing_id("jw1cd")
        .await
        .unwrap();
    assert_eq!(member.total_points, 4);
    assert_eq!(member.spring_2025_total, 0);
    assert_eq!(member.fall_2025_total, 0);
}

#[tokio::test]
async fn counters_never_go_negative() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let req = event_req("Drive", date(2025, 2, 14), 5, vec![row("Drew Kim", "dk3ef")]);
    let (event, _) = lifecycle::create_event_with_roster(pool, &req).await.unwrap();
    let member = MemberRepository::new(pool)
        .find_by_computing_id("dk3ef")
        .await
        .unwrap();

    // Drift the counters below the ledger-derived value, then delete the
    // event: the reversal overshoots zero and must clamp.
    sqlx::query("UPDATE members SET total_points = 2, spring_2025_total = 2 WHERE id = ?1")
        .bind(member.id)
        .execute(pool)
        .await
        .unwrap();

    lifecycle::delete_event(pool, event.id).await.unwrap();

    let after = MemberRepository::new(pool)
        .find_by_computing_id("dk3ef")
        .await
        .unwrap();
    assert_eq!(after.total_points, 0);
    assert_eq!(after.spring_2025_total, 0);
}

#[tokio::test]
async fn audit_detects_and_recompute_repairs_drift() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let req = event_req("GBM 3", date(2025, 4, 3), 2, vec![row("Noor Azmi", "na7gh")]);
    lifecycle::create_event_with_roster(pool, &req).await.unwrap();
    let member = MemberRepository::new(pool)
        .find_by_computing_id("na7gh")
        .await
        .unwrap();

    assert!(aggregator::audit(pool).await.unwrap().is_empty());

    sqlx::query("UPDATE members SET total_points = 9 WHERE id = ?1")
        .bind(member.id)
        .execute(pool)
        .await
        .unwrap();

    let drifted = aggregator::audit(pool).await.unwrap();
    assert_eq!(drifted.len(), 1);
    assert_eq!(drifted[0].stored, [9, 2, 0]);
    assert_eq!(drifted[0].derived, [2, 2, 0]);

    let repaired = aggregator::recompute_from_ledger(pool, member.id).await.unwrap();
    assert_eq!(repaired.total_points, 2);
    assert!(aggregator::audit(pool).await.unwrap().is_empty());

    assert_eq!(aggregator::recompute_all(pool).await.unwrap(), 1);
}

#[tokio::test]
async fn must_not_exist_insert_conflicts_on_occupied_pair() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let event = lifecycle::create_event(pool, &event_req("E", date(2025, 2, 1), 1, vec![]))
        .await
        .unwrap();
    let member = MemberRepository::new(pool)
        .create(&CreateMemberRequest {
            name: "Kai Ford".to_string(),
            computing_id: "kf5ij".to_string(),
            email: "kf5ij@virginia.edu".to_string(),
            password: None,
        })
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    attendance::insert_new(&mut conn, event.id, member.id, 1)
        .await
        .unwrap();
    let err = attendance::insert_new(&mut conn, event.id, member.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn duplicate_admin_add_conflicts() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let req = CreateMemberRequest {
        name: "Lee Shaw".to_string(),
        computing_id: "ls8kl".to_string(),
        email: "ls8kl@virginia.edu".to_string(),
        password: None,
    };
    MemberRepository::new(pool).create(&req).await.unwrap();
    let err = MemberRepository::new(pool).create(&req).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn deleting_member_cascades_to_ledger() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let req = event_req("GBM 4", date(2025, 11, 6), 2, vec![row("Pat Novak", "pn6mn")]);
    let (event, _) = lifecycle::create_event_with_roster(pool, &req).await.unwrap();
    let member = MemberRepository::new(pool)
        .find_by_computing_id("pn6mn")
        .await
        .unwrap();

    let summary = lifecycle::delete_member(pool, member.id).await.unwrap();
    assert_eq!(summary.records_removed, 1);

    assert!(matches!(
        MemberRepository::new(pool).find_by_id(member.id).await,
        Err(StorageError::NotFound)
    ));
    assert!(
        AttendanceRepository::new(pool)
            .list_by_event(event.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn malformed_rows_are_skipped_without_aborting() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let event = lifecycle::create_event(pool, &event_req("GBM 5", date(2025, 2, 20), 2, vec![]))
        .await
        .unwrap();
    let roster = vec![
        row("", "xx1yy"),
        row("No Id", "  "),
        row("Casey Reyes", "cr1zz"),
    ];

    let summary = import::import_roster(pool, &event, &roster).await.unwrap();
    assert_eq!(summary.members_created, 1);
    assert_eq!(summary.records_created, 1);
    assert_eq!(summary.rows_skipped, 2);

    assert_eq!(MemberRepository::new(pool).list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invariant_holds_across_mixed_operations() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    let spring = lifecycle::create_event(pool, &event_req("S", date(2025, 1, 15), 3, vec![]))
        .await
        .unwrap();
    let fall = lifecycle::create_event(pool, &event_req("F", date(2025, 9, 15), 2, vec![]))
        .await
        .unwrap();
    let summer = lifecycle::create_event(pool, &event_req("X", date(2025, 7, 4), 1, vec![]))
        .await
        .unwrap();

    let roster = [row("Val Osei", "vo2pq")];
    for event in [&spring, &fall, &summer] {
        import::import_roster(pool, event, &roster).await.unwrap();
    }

    let member = MemberRepository::new(pool)
        .find_by_computing_id("vo2pq")
        .await
        .unwrap();
    assert_eq!(
        (
            member.total_points,
            member.spring_2025_total,
            member.fall_2025_total
        ),
        (6, 3, 2)
    );

    attendance_svc::grant_attendance(pool, fall.id, member.id, Some(5))
        .await
        .unwrap();
    lifecycle::delete_event(pool, summer.id).await.unwrap();

    // Stored counters still match the ledger exactly.
    assert!(aggregator::audit(pool).await.unwrap().is_empty());
    let member = MemberRepository::new(pool)
        .find_by_computing_id("vo2pq")
        .await
        .unwrap();
    assert_eq!(
        (
            member.total_points,
            member.spring_2025_total,
            member.fall_2025_total
        ),
        (8, 3, 5)
    );
}

#[tokio::test]
async fn create_event_rejects_non_positive_points() {
    let (db, _dir) = test_db().await;
    let err = lifecycle::create_event(db.pool(), &event_req("Bad", date(2025, 2, 1), 0, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn default_password_login_and_rotation() {
    let (db, _dir) = test_db().await;
    let pool = db.pool();

    MemberRepository::new(pool)
        .create(&CreateMemberRequest {
            name: "Quinn Ruiz".to_string(),
            computing_id: "qr4st".to_string(),
            email: "qr4st@virginia.edu".to_string(),
            password: None,
        })
        .await
        .unwrap();

    let member = auth::authenticate(pool, "QR4ST", auth::DEFAULT_PASSWORD)
        .await
        .unwrap();
    assert!(auth::needs_password_setup(&member));

    assert!(matches!(
        auth::authenticate(pool, "qr4st", "wrong-password").await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        auth::update_password(pool, "qr4st", "short").await,
        Err(StorageError::Validation(_))
    ));

    auth::update_password(pool, "qr4st", "a-better-one").await.unwrap();
    let member = auth::authenticate(pool, "qr4st", "a-better-one").await.unwrap();
    assert!(!auth::needs_password_setup(&member));
    assert!(auth::authenticate(pool, "qr4st", auth::DEFAULT_PASSWORD).await.is_err());
}
