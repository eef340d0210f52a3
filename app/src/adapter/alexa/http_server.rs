use actix_web::web::{self, Json};
use actix_web::{HttpResponse, Responder};

use super::DirectiveMessage;
use crate::port::NestApi;
use crate::skill::AwaySkill;

pub fn new_actix_web_scope<A: NestApi + 'static>(skill: AwaySkill<A>) -> actix_web::Scope {
    web::scope("/alexa")
        .route("/directive", web::post().to(handle_directive::<A>))
        .app_data(web::Data::new(skill))
}

// Success and failure envelopes both go back as body, only the status tells them apart.
async fn handle_directive<A: NestApi + 'static>(
    skill: web::Data<AwaySkill<A>>,
    Json(message): Json<DirectiveMessage>,
) -> impl Responder {
    match skill.handle(message).await {
        Some(Ok(envelope)) => HttpResponse::Ok().json(envelope),
        Some(Err(envelope)) => HttpResponse::InternalServerError().json(envelope),
        None => HttpResponse::NoContent().finish(),
    }
}
