//! The reqres.in contract, one scenario per behaviour.

use super::{Scenario, Step};
use crate::error::ContractError;
use crate::http::{ApiRequest, HttpMethod};
use crate::model::{Credentials, MutableUserEdit};
use crate::verify::{Check, Expectation, FieldExpectation, FieldPath, Shape};

struct ExpectedUser {
    id: i64,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    avatar: &'static str,
}

struct ExpectedColor {
    id: i64,
    name: &'static str,
    year: i64,
    color: &'static str,
    pantone_value: &'static str,
}

const MICHAEL_LAWSON: ExpectedUser = ExpectedUser {
    id: 7,
    email: "michael.lawson@reqres.in",
    first_name: "Michael",
    last_name: "Lawson",
    avatar: "https://reqres.in/img/faces/7-image.jpg",
};

const JANET_WEAVER: ExpectedUser = ExpectedUser {
    id: 2,
    email: "janet.weaver@reqres.in",
    first_name: "Janet",
    last_name: "Weaver",
    avatar: "https://reqres.in/img/faces/2-image.jpg",
};

const GEORGE_BLUTH: ExpectedUser = ExpectedUser {
    id: 1,
    email: "george.bluth@reqres.in",
    first_name: "George",
    last_name: "Bluth",
    avatar: "https://reqres.in/img/faces/1-image.jpg",
};

const CERULEAN: ExpectedColor = ExpectedColor {
    id: 1,
    name: "cerulean",
    year: 2000,
    color: "#98B2D1",
    pantone_value: "15-4020",
};

const FUCHSIA_ROSE: ExpectedColor = ExpectedColor {
    id: 2,
    name: "fuchsia rose",
    year: 2001,
    color: "#C74375",
    pantone_value: "17-2031",
};

const REGISTERED_EMAIL: &str = "eve.holt@reqres.in";
const MISSING_PASSWORD: &str = "Missing password";

/// Every scenario of the reqres contract, in a stable order.
pub fn reqres_catalogue() -> Result<Vec<Scenario>, ContractError> {
    Ok(vec![
        scenario(
            "list-users",
            "first user of page 2",
            vec![Step::checked(
                "list users page 2",
                ApiRequest::get("users?page=2"),
                Expectation::new(200, Shape::UserList, user_at(0, &MICHAEL_LAWSON)),
            )],
        ),
        scenario(
            "single-user",
            "user 2 with every field",
            vec![Step::checked(
                "get user 2",
                ApiRequest::get("users/2"),
                Expectation::new(200, Shape::SingleUser, user_data(&JANET_WEAVER)),
            )],
        ),
        not_found("single-user-not-found", "users/23", Shape::SingleUser),
        scenario(
            "list-resources",
            "first color resource",
            vec![Step::checked(
                "list resources",
                ApiRequest::get("unknown"),
                Expectation::new(200, Shape::ResourceList, color_at(0, &CERULEAN)),
            )],
        ),
        scenario(
            "single-resource",
            "color resource 2 with every field",
            vec![Step::checked(
                "get resource 2",
                ApiRequest::get("unknown/2"),
                Expectation::new(200, Shape::SingleResource, color_data(&FUCHSIA_ROSE)),
            )],
        ),
        not_found("single-resource-not-found", "unknown/23", Shape::SingleResource),
        scenario(
            "create-user",
            "create echoes name and job",
            vec![edit_step(
                "create morpheus",
                HttpMethod::Post,
                "users",
                &MutableUserEdit::new("morpheus", "leader"),
                201,
            )?],
        ),
        scenario(
            "put-update-user",
            "create with empty fields, then replace them",
            vec![
                blank_user_setup()?,
                edit_step(
                    "put morpheus",
                    HttpMethod::Put,
                    "users/2",
                    &MutableUserEdit::new("morpheus", "zion resident"),
                    200,
                )?,
            ],
        ),
        scenario(
            "patch-update-user",
            "create with empty fields, then patch the job",
            vec![
                blank_user_setup()?,
                edit_step(
                    "patch job",
                    HttpMethod::Patch,
                    "users/2",
                    &MutableUserEdit::new("", "zion resident"),
                    200,
                )?,
            ],
        ),
        scenario(
            "delete-user",
            "delete answers 204 with no body",
            vec![Step::checked(
                "delete user 2",
                ApiRequest::delete("users/2"),
                Expectation::new(204, Shape::Empty, Vec::new()),
            )],
        ),
        scenario(
            "register-successful",
            "registration returns id and token",
            vec![Step::checked(
                "register eve",
                ApiRequest::new(HttpMethod::Post, "register")
                    .with_json(&Credentials::new(REGISTERED_EMAIL, "pistol"))?,
                Expectation::new(
                    200,
                    Shape::Auth,
                    vec![
                        FieldExpectation::new(FieldPath::top("id"), Check::int(4)),
                        FieldExpectation::new(FieldPath::top("token"), Check::Present),
                    ],
                ),
            )],
        ),
        missing_password("register-unsuccessful", "register", "sydney@fife")?,
        scenario(
            "login-successful",
            "login returns a token",
            vec![Step::checked(
                "login eve",
                ApiRequest::new(HttpMethod::Post, "login")
                    .with_json(&Credentials::new(REGISTERED_EMAIL, "cityslicka"))?,
                Expectation::new(
                    200,
                    Shape::Auth,
                    vec![FieldExpectation::new(FieldPath::top("token"), Check::Present)],
                ),
            )],
        ),
        missing_password("login-unsuccessful", "login", "peter@klaven")?,
        scenario(
            "delayed-list-users",
            "first user of a delayed listing",
            vec![Step::checked(
                "list users with delay",
                ApiRequest::get("users?delay=3"),
                Expectation::new(200, Shape::UserList, user_at(0, &GEORGE_BLUTH)),
            )],
        ),
    ])
}

fn scenario(name: &str, description: &str, steps: Vec<Step>) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: description.to_string(),
        steps,
    }
}

fn not_found(name: &str, path: &str, shape: Shape) -> Scenario {
    scenario(
        name,
        "unknown id answers 404 with {}",
        vec![Step::checked(
            format!("get {path}"),
            ApiRequest::get(path),
            Expectation::new(404, shape, Vec::new()),
        )],
    )
}

fn missing_password(name: &str, path: &str, email: &str) -> Result<Scenario, ContractError> {
    Ok(scenario(
        name,
        "no password yields the error schema",
        vec![Step::checked(
            format!("{path} without password"),
            ApiRequest::new(HttpMethod::Post, path).with_json(&Credentials::email_only(email))?,
            Expectation::new(
                400,
                Shape::Auth,
                vec![FieldExpectation::new(FieldPath::top("error"), Check::text(MISSING_PASSWORD))],
            ),
        )],
    ))
}

fn blank_user_setup() -> Result<Step, ContractError> {
    let request =
        ApiRequest::new(HttpMethod::Post, "users/2").with_json(&MutableUserEdit::new("", ""))?;
    Ok(Step::setup("create user 2 with empty fields", request))
}

fn edit_step(
    name: &str,
    method: HttpMethod,
    path: &str,
    edit: &MutableUserEdit,
    status: u16,
) -> Result<Step, ContractError> {
    let mut fields = Vec::new();
    if let Some(value) = &edit.name {
        fields.push(FieldExpectation::new(FieldPath::top("name"), Check::text(value.as_str())));
    }
    if let Some(value) = &edit.job {
        fields.push(FieldExpectation::new(FieldPath::top("job"), Check::text(value.as_str())));
    }

    Ok(Step::checked(
        name,
        ApiRequest::new(method, path).with_json(edit)?,
        Expectation::new(status, Shape::UserEdit, fields),
    ))
}

fn user_fields(path: impl Fn(&str) -> FieldPath, user: &ExpectedUser) -> Vec<FieldExpectation> {
    vec![
        FieldExpectation::new(path("id"), Check::int(user.id)),
        FieldExpectation::new(path("email"), Check::text(user.email)),
        FieldExpectation::new(path("first_name"), Check::text(user.first_name)),
        FieldExpectation::new(path("last_name"), Check::text(user.last_name)),
        FieldExpectation::new(path("avatar"), Check::text(user.avatar)),
        FieldExpectation::new(path("avatar"), Check::WellFormedUrl),
    ]
}

fn user_at(index: usize, user: &ExpectedUser) -> Vec<FieldExpectation> {
    user_fields(|name| FieldPath::item(index, name), user)
}

fn user_data(user: &ExpectedUser) -> Vec<FieldExpectation> {
    user_fields(|name| FieldPath::data(name), user)
}

fn color_fields(path: impl Fn(&str) -> FieldPath, color: &ExpectedColor) -> Vec<FieldExpectation> {
    vec![
        FieldExpectation::new(path("id"), Check::int(color.id)),
        FieldExpectation::new(path("name"), Check::text(color.name)),
        FieldExpectation::new(path("year"), Check::int(color.year)),
        FieldExpectation::new(path("color"), Check::text(color.color)),
        FieldExpectation::new(path("color"), Check::HexColor),
        FieldExpectation::new(path("pantone_value"), Check::text(color.pantone_value)),
        FieldExpectation::new(path("pantone_value"), Check::PantoneCode),
    ]
}

fn color_at(index: usize, color: &ExpectedColor) -> Vec<FieldExpectation> {
    color_fields(|name| FieldPath::item(index, name), color)
}

fn color_data(color: &ExpectedColor) -> Vec<FieldExpectation> {
    color_fields(|name| FieldPath::data(name), color)
}
