use super::common::*;
use crate::dashboard::domain::{ApplicationId, ApplicationStatus};
use crate::dashboard::events::EntityKind;
use crate::dashboard::DashboardError;
use std::sync::Arc;

#[test]
fn first_apply_succeeds_with_pending_status() {
    let (services, _, _) = build_services();

    let application = services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("first application succeeds");

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.applied_on, applied_on());

    let listed = services.applications.list(&teacher());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], application);
}

#[test]
fn duplicate_apply_fails_and_leaves_collection_unchanged() {
    let (services, _, _) = build_services();

    services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("first application succeeds");

    match services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
    {
        Err(DashboardError::DuplicateApplication { tuition_id }) => {
            assert_eq!(tuition_id.0, "tuition-9");
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }

    assert_eq!(services.applications.list(&teacher()).len(), 1);
}

#[test]
fn same_tuition_for_another_teacher_is_not_a_duplicate() {
    let (services, _, _) = build_services();
    let other = crate::dashboard::domain::TeacherId("t2".to_string());

    services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("first teacher applies");
    services
        .applications
        .apply_on(&other, request("tuition-9"), applied_on())
        .expect("second teacher applies to the same tuition");

    assert_eq!(services.applications.list(&teacher()).len(), 1);
    assert_eq!(services.applications.list(&other).len(), 1);
}

#[test]
fn list_preserves_insertion_order() {
    let (services, _, _) = build_services();

    for tuition in ["tuition-1", "tuition-2", "tuition-3"] {
        services
            .applications
            .apply_on(&teacher(), request(tuition), applied_on())
            .expect("application succeeds");
    }

    let listed = services.applications.list(&teacher());
    let tuitions: Vec<&str> = listed
        .iter()
        .map(|application| application.tuition_id.0.as_str())
        .collect();
    assert_eq!(tuitions, vec!["tuition-1", "tuition-2", "tuition-3"]);
}

#[test]
fn set_status_updates_existing_application() {
    let (services, _, _) = build_services();

    let application = services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("application succeeds");

    services
        .applications
        .set_status(&teacher(), &application.id, ApplicationStatus::Shortlisted)
        .expect("status change succeeds");

    let listed = services.applications.list(&teacher());
    assert_eq!(listed[0].status, ApplicationStatus::Shortlisted);
}

#[test]
fn set_status_for_unknown_id_is_a_noop() {
    let (services, _, _) = build_services();

    let application = services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("application succeeds");

    services
        .applications
        .set_status(
            &teacher(),
            &ApplicationId("app-missing".to_string()),
            ApplicationStatus::Accepted,
        )
        .expect("unknown id is a no-op, not an error");

    let listed = services.applications.list(&teacher());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ApplicationStatus::Pending);
    assert_eq!(listed[0].id, application.id);
}

#[test]
fn apply_surfaces_store_write_failures() {
    let services = build_failing_services();

    match services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
    {
        Err(DashboardError::Store(_)) => {}
        other => panic!("expected store error, got {other:?}"),
    }
}

#[test]
fn apply_checks_duplicates_before_write_failures() {
    let (seed_services, store, _) = build_services();
    seed_services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("application succeeds");

    let read_only = Arc::new(ReadOnlyStore {
        inner: store.as_ref().clone(),
    });
    let feed = Arc::new(crate::dashboard::events::ChangeFeed::default());
    let services = crate::dashboard::DashboardServices::new(read_only, feed);

    match services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
    {
        Err(DashboardError::DuplicateApplication { .. }) => {}
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[test]
fn apply_publishes_a_typed_change_event() {
    let (services, _, feed) = build_services();
    let mut changes = feed.subscribe();

    let application = services
        .applications
        .apply_on(&teacher(), request("tuition-9"), applied_on())
        .expect("application succeeds");

    let event = changes.try_recv().expect("change event published");
    assert_eq!(event.teacher, teacher());
    assert_eq!(event.kind, EntityKind::Application);
    assert_eq!(event.record_id, application.id.0);
}

#[test]
fn generated_ids_are_distinct() {
    let (services, _, _) = build_services();

    let first = services
        .applications
        .apply_on(&teacher(), request("tuition-1"), applied_on())
        .expect("application succeeds");
    let second = services
        .applications
        .apply_on(&teacher(), request("tuition-2"), applied_on())
        .expect("application succeeds");

    assert_ne!(first.id, second.id);
}
