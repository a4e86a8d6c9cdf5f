pub mod auth;
pub mod employee;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::utils::jwt;
use auth::{LoginInput, SignupInput};
use employee::EmployeeInput;

/// Request body as sent by clients. `variables` may be omitted or null for
/// operations that take none.
#[derive(Deserialize, Debug)]
pub struct OperationRequest {
    pub operation: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

/// Every request names one operation and carries its variables.
#[derive(Deserialize, Debug)]
#[serde(tag = "operation", content = "variables", rename_all = "camelCase")]
pub enum Operation {
    Login {
        #[serde(default)]
        input: LoginInput,
    },
    Signup {
        #[serde(default)]
        input: SignupInput,
    },
    GetAllEmployees {},
    SearchEmployeeByEid {
        eid: Option<String>,
    },
    SearchEmployeesByDesignationOrDepartment {
        designation: Option<String>,
        department: Option<String>,
    },
    AddEmployee {
        #[serde(default)]
        input: EmployeeInput,
    },
    UpdateEmployeeByEid {
        eid: Option<String>,
        #[serde(default)]
        input: EmployeeInput,
    },
    DeleteEmployeeByEid {
        eid: Option<String>,
    },
}

impl TryFrom<OperationRequest> for Operation {
    type Error = AppError;

    fn try_from(request: OperationRequest) -> Result<Self, AppError> {
        let OperationRequest { operation, variables } = request;
        let variables = match variables {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(variables) => variables,
        };
        serde_json::from_value(json!({ "operation": &operation, "variables": variables })).map_err(|err| {
            log::debug!("Rejected operation {}: {}", operation, err);
            AppError::Validation("Malformed operation request".to_string())
        })
    }
}

pub async fn operation_handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<OperationRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let operation = Operation::try_from(request.into_inner())?;
    let caller = jwt::resolve_identity(req.headers(), &state.jwt);
    let caller = caller.as_ref();

    let response = match operation {
        Operation::Login { input } => HttpResponse::Ok().json(auth::login(&state, input).await),
        Operation::Signup { input } => HttpResponse::Ok().json(auth::signup(&state, input).await),
        Operation::GetAllEmployees {} => HttpResponse::Ok().json(employee::get_all_employees(&state, caller).await),
        Operation::SearchEmployeeByEid { eid } => {
            HttpResponse::Ok().json(employee::search_employee_by_eid(&state, caller, eid).await)
        }
        Operation::SearchEmployeesByDesignationOrDepartment { designation, department } => HttpResponse::Ok().json(
            employee::search_employees_by_designation_or_department(&state, caller, designation, department).await,
        ),
        Operation::AddEmployee { input } => HttpResponse::Ok().json(employee::add_employee(&state, caller, input).await),
        Operation::UpdateEmployeeByEid { eid, input } => {
            HttpResponse::Ok().json(employee::update_employee_by_eid(&state, caller, eid, input).await)
        }
        Operation::DeleteEmployeeByEid { eid } => {
            HttpResponse::Ok().json(employee::delete_employee_by_eid(&state, caller, eid).await)
        }
    };
    Ok(response)
}

/// JSON extractor settings: body size cap, and envelope-shaped 400s for
/// bodies that do not describe a known operation.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        AppError::Validation("Malformed request body".to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/operations").route(web::post().to(operation_handler)));
}
