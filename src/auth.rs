use axum::body::Bytes;
use axum::http::StatusCode;
use axum::Extension;

use crate::err::{Error, Flow, Reply, REGISTERED};
use crate::models::{LoginStudent, NewStudent, QueryResults, Student};
use crate::service::StudentService;
use crate::{proceeds, Payload};

/// Bodies are parsed by hand so that any malformed or incomplete payload ends
/// up as the flow's generic 500 instead of an extractor rejection.
fn parse<T: serde::de::DeserializeOwned>(flow: Flow, body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|err| Error::payload(flow, err))
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn login_student(
    Extension(students): Extension<StudentService>,
    body: Bytes,
) -> Payload<Student> {
    let login: LoginStudent = parse(Flow::Login, &body)?;

    let student = students
        .find_by_reg_no_and_password(&login.reg_no, &login.password)
        .await
        .map_err(|err| Error::store(Flow::Login, err))?;

    match student {
        Some(student) => {
            log::info!("Student {} logged in", student.reg_no);
            proceeds(student)
        }
        None => Err(Error::InvalidCredentials),
    }
}

pub async fn register_student(
    Extension(students): Extension<StudentService>,
    body: Bytes,
) -> Payload<Reply> {
    let student: NewStudent = parse(Flow::Registration, &body)?;
    log::debug!("Registering student {:?}", student.reg_no);

    students
        .register_student(&student)
        .await
        .map_err(|err| Error::store(Flow::Registration, err))?;

    log::info!("Registered student {:?}", student.reg_no);
    proceeds(Reply::fine(REGISTERED))
}

pub async fn see_results(
    Extension(students): Extension<StudentService>,
    body: Bytes,
) -> Payload<Student> {
    let query: QueryResults = parse(Flow::Results, &body)?;

    let student = students
        .find_by_reg_no(&query.reg_no)
        .await
        .map_err(|err| Error::store(Flow::Results, err))?;

    match student {
        Some(student) => proceeds(student),
        None => Err(Error::NoResults {
            reg_no: query.reg_no,
        }),
    }
}
