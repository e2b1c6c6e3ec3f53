// Gateway operations emit start/end events through the logging facility

mod common;
use common::{insert_user, new_session, new_user};

use userctl_core::logging_facility::init_test_capture;
use userctl_core::queries::UserQuery;
use userctl_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_insert_and_duplicate_are_logged() {
    let capture = init_test_capture();
    let mut session = new_session();

    insert_user(&mut session, "logged_alice", "logged_alice@x.com");
    session
        .insert(new_user("logged_alice", "other@x.com"))
        .unwrap();

    let events: Vec<_> = capture
        .events_for_op("user_insert")
        .into_iter()
        .filter(|e| {
            e.field("username") == Some("logged_alice")
                || e.field("outcome").is_some()
                || e.field("user_id").is_some()
        })
        .collect();

    assert!(events.iter().any(|e| e.event() == Some(EVENT_START)));
    assert!(events.iter().any(|e| {
        e.event() == Some(EVENT_END)
            && e.field("outcome") == Some("duplicate_key")
            && e.field("field") == Some("username")
    }));
}

#[test]
fn test_query_end_reports_row_count() {
    let capture = init_test_capture();
    let mut session = new_session();
    insert_user(&mut session, "counted_one", "c1@x.com");
    insert_user(&mut session, "counted_two", "c2@x.com");

    session.query(&UserQuery::search("counted_")).unwrap();

    assert!(capture.count_events(|e| {
        e.op() == Some("user_query")
            && e.event() == Some(EVENT_END)
            && e.field("row_count") == Some("2")
    }) >= 1);
}

#[test]
fn test_failed_delete_logs_error_event() {
    let capture = init_test_capture();
    let mut session = new_session();
    let user = insert_user(&mut session, "vanishing", "vanishing@x.com");
    session.delete(&user).unwrap();

    assert!(session.delete(&user).is_err());

    assert!(capture.count_events(|e| {
        e.op() == Some("user_delete")
            && e.event() == Some(EVENT_END_ERROR)
            && e.field("err_code") == Some("ERR_NOT_FOUND")
    }) >= 1);
}
