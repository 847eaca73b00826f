use crate::{error::TallyError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::get_me::*;
use tally_infra::TallyContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
