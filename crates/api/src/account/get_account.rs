use crate::{error::TallyError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_account::APIResponse;
use tally_infra::TallyContext;

pub async fn get_account_controller(
    http_req: HttpRequest,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(account)))
}
