use rstest::{fixture, rstest};

use super::*;

const AVATAR_7: &str = "https://reqres.in/img/faces/7-image.jpg";

const USERS_PAGE_2: &str = r#"{
    "page": 2, "per_page": 6, "total": 12, "total_pages": 2,
    "data": [
        {"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael",
         "last_name": "Lawson", "avatar": "https://reqres.in/img/faces/7-image.jpg"},
        {"id": 8, "email": "lindsay.ferguson@reqres.in", "first_name": "Lindsay",
         "last_name": "Ferguson", "avatar": "https://reqres.in/img/faces/8-image.jpg"}
    ]
}"#;

const RESOURCE_2: &str = r##"{
    "data": {"id": 2, "name": "fuchsia rose", "year": 2001, "color": "#C74375",
             "pantone_value": "17-2031"},
    "support": {"url": "https://reqres.in/#support-heading",
                "text": "To keep ReqRes free, contributions towards server costs are appreciated!"}
}"##;

#[fixture]
fn first_user_expectation() -> Expectation {
    Expectation::new(
        200,
        Shape::UserList,
        vec![
            FieldExpectation::new(FieldPath::item(0, "id"), Check::int(7)),
            FieldExpectation::new(
                FieldPath::item(0, "email"),
                Check::text("michael.lawson@reqres.in"),
            ),
            FieldExpectation::new(FieldPath::item(0, "first_name"), Check::text("Michael")),
            FieldExpectation::new(FieldPath::item(0, "last_name"), Check::text("Lawson")),
            FieldExpectation::new(FieldPath::item(0, "avatar"), Check::text(AVATAR_7)),
        ],
    )
}

fn single_resource_expectation(status: u16) -> Expectation {
    Expectation::new(
        status,
        Shape::SingleResource,
        vec![
            FieldExpectation::new(FieldPath::data("id"), Check::int(2)),
            FieldExpectation::new(FieldPath::data("name"), Check::text("fuchsia rose")),
            FieldExpectation::new(FieldPath::data("year"), Check::int(2001)),
            FieldExpectation::new(FieldPath::data("color"), Check::HexColor),
            FieldExpectation::new(FieldPath::data("pantone_value"), Check::PantoneCode),
        ],
    )
}

#[rstest]
fn first_user_of_page_two_passes(first_user_expectation: Expectation) {
    let verification = verify(&HttpOutcome::new(200, USERS_PAGE_2), &first_user_expectation);

    assert!(verification.passed(), "{:?}", verification.failures);
    match verification.into_result().unwrap() {
        Decoded::UserList(list) => assert_eq!(list.data.len(), 2),
        other => panic!("unexpected shape: {other:?}"),
    }
}

#[rstest]
fn two_wrong_fields_yield_exactly_two_mismatches(first_user_expectation: Expectation) {
    let body = USERS_PAGE_2
        .replace("\"Michael\"", "\"Mike\"")
        .replace("\"id\": 7", "\"id\": 70");

    let verification = verify(&HttpOutcome::new(200, body), &first_user_expectation);

    assert_eq!(verification.failures.len(), 1);
    let report = verification.mismatches().unwrap();
    assert_eq!(
        report.entries(),
        &[
            Mismatch::new("data[0].id", "7", "70"),
            Mismatch::new("data[0].first_name", "\"Michael\"", "\"Mike\""),
        ]
    );
}

#[rstest]
fn empty_list_reports_absent_fields(first_user_expectation: Expectation) {
    let verification = verify(
        &HttpOutcome::new(200, r#"{"data": []}"#),
        &first_user_expectation,
    );

    let report = verification.mismatches().unwrap();
    assert_eq!(report.len(), 5);
    assert!(report.entries().iter().all(|entry| entry.actual == ABSENT));
}

#[test]
fn fuchsia_rose_passes_with_pattern_checks() {
    let verification = verify(
        &HttpOutcome::new(200, RESOURCE_2),
        &single_resource_expectation(200),
    );
    assert!(verification.passed(), "{:?}", verification.failures);
}

#[test]
fn bad_color_pattern_is_a_field_mismatch() {
    let body = RESOURCE_2.replace("#C74375", "C74375");
    let verification = verify(&HttpOutcome::new(200, body), &single_resource_expectation(200));

    let report = verification.mismatches().unwrap();
    assert_eq!(
        report.entries(),
        &[Mismatch::new("data.color", "#RRGGBB hex color", "\"C74375\"")]
    );
}

#[rstest]
#[case(Shape::SingleUser)]
#[case(Shape::SingleResource)]
fn not_found_empty_object_is_a_clean_decode(#[case] shape: Shape) {
    let expectation = Expectation::new(404, shape, Vec::new());
    let verification = verify(&HttpOutcome::new(404, "{}"), &expectation);

    assert!(verification.passed(), "{:?}", verification.failures);
    let decoded = verification.into_result().unwrap();
    assert!(matches!(
        decoded,
        Decoded::SingleUser(SingleUserEnvelope { data: None, support: None })
            | Decoded::SingleResource(SingleResourceEnvelope { data: None, support: None })
    ));
}

#[test]
fn empty_envelope_with_ok_status_is_a_shape_conflict() {
    let expectation = Expectation::new(200, Shape::SingleUser, Vec::new());
    let verification = verify(&HttpOutcome::new(200, "{}"), &expectation);

    assert!(matches!(
        verification.failures.as_slice(),
        [ContractError::ShapeConflict { status: 200, shape }] if shape == "empty envelope"
    ));
}

#[test]
fn populated_envelope_with_not_found_is_a_shape_conflict() {
    let verification = verify(
        &HttpOutcome::new(404, RESOURCE_2),
        &single_resource_expectation(404),
    );

    assert!(matches!(
        verification.failures.as_slice(),
        [ContractError::ShapeConflict { status: 404, shape }] if shape == "populated envelope"
    ));
}

#[test]
fn register_without_password_is_a_failure_outcome() {
    let expectation = Expectation::new(
        400,
        Shape::Auth,
        vec![FieldExpectation::new(FieldPath::top("error"), Check::text("Missing password"))],
    );
    let verification = verify(
        &HttpOutcome::new(400, r#"{"error": "Missing password"}"#),
        &expectation,
    );

    assert!(verification.passed(), "{:?}", verification.failures);
    assert_eq!(
        verification.decoded,
        Some(Decoded::Auth(AuthOutcome::Failure {
            error: "Missing password".to_string()
        }))
    );
}

#[test]
fn ok_status_with_failure_body_is_flagged_apart_from_field_checks() {
    let expectation = Expectation::new(
        200,
        Shape::Auth,
        vec![FieldExpectation::new(FieldPath::top("token"), Check::Present)],
    );
    let verification = verify(
        &HttpOutcome::new(200, r#"{"error": "Missing password"}"#),
        &expectation,
    );

    assert_eq!(verification.failures.len(), 2);
    assert!(matches!(
        &verification.failures[0],
        ContractError::ShapeConflict { status: 200, shape } if shape == "auth failure"
    ));
    assert!(matches!(
        &verification.failures[1],
        ContractError::FieldMismatch(report) if report.len() == 1
    ));
}

#[test]
fn status_mismatch_and_shape_conflict_are_independent() {
    let expectation = Expectation::new(400, Shape::Auth, Vec::new());
    let verification = verify(
        &HttpOutcome::new(200, r#"{"error": "Missing password"}"#),
        &expectation,
    );

    assert!(matches!(
        verification.failures.as_slice(),
        [
            ContractError::StatusMismatch { expected: 400, actual: 200 },
            ContractError::ShapeConflict { status: 200, .. },
        ]
    ));
    assert!(matches!(
        verification.into_result(),
        Err(ContractError::Multiple(errors)) if errors.len() == 2
    ));
}

#[test]
fn auth_body_with_neither_key_is_unrecognized() {
    let expectation = Expectation::new(200, Shape::Auth, Vec::new());
    let verification = verify(&HttpOutcome::new(200, r#"{"id": 4}"#), &expectation);

    assert!(verification.decoded.is_none());
    assert!(matches!(
        verification.into_result(),
        Err(ContractError::UnrecognizedAuthShape { keys }) if keys == vec!["id".to_string()]
    ));
}

#[test]
fn delete_requires_blank_body() {
    let expectation = Expectation::new(204, Shape::Empty, Vec::new());

    assert!(verify(&HttpOutcome::new(204, ""), &expectation).passed());

    let verification = verify(&HttpOutcome::new(204, "{}"), &expectation);
    assert!(matches!(
        verification.failures.as_slice(),
        [ContractError::MalformedPayload { .. }]
    ));
}

#[test]
fn array_where_object_expected_is_malformed() {
    let expectation = Expectation::new(200, Shape::UserList, Vec::new());
    let verification = verify(&HttpOutcome::new(200, "[]"), &expectation);

    assert!(matches!(
        verification.into_result(),
        Err(ContractError::MalformedPayload { snippet, .. }) if snippet == "[]"
    ));
}

#[test]
fn invalid_utf8_body_is_malformed_not_replaced() {
    let expectation = Expectation::new(
        400,
        Shape::Auth,
        vec![FieldExpectation::new(FieldPath::top("error"), Check::Present)],
    );
    let body = b"{\"error\": \"Missing \xffpassword\"}".to_vec();
    let verification = verify(&HttpOutcome::new(400, body), &expectation);

    assert!(verification.decoded.is_none());
    assert!(matches!(
        verification.failures.as_slice(),
        [ContractError::MalformedPayload { reason, .. }] if reason.contains("UTF-8")
    ));
}

#[test]
fn edit_echo_checks_only_asserted_fields() {
    let expectation = Expectation::new(
        201,
        Shape::UserEdit,
        vec![
            FieldExpectation::new(FieldPath::top("name"), Check::text("morpheus")),
            FieldExpectation::new(FieldPath::top("job"), Check::text("leader")),
        ],
    );
    let body = r#"{"name": "morpheus", "job": "leader", "id": "512",
                   "createdAt": "2024-05-01T10:00:00.000Z"}"#;

    assert!(verify(&HttpOutcome::new(201, body), &expectation).passed());
}
