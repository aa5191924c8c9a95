use crate::utils::webutils::validate_token;
use actix_web::web;

pub mod auth;
pub mod health;
pub mod user;
pub mod work_session;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_token);

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/auth")
            .service(auth::register::register)
            .service(auth::verify::verify)
            .service(auth::login::login)
    );
    cfg.service(
        web::scope("/users")
            // reached from mailed links, no session yet
            .service(user::email_update::verify_email_update)
            .service(user::password_update::verify_password_reset)
            .service(user::password_update::request_password_reset)
            .service(
                web::scope("")
                    .wrap(user_auth.clone())
                    .service(user::get::get_user)
                    .service(user::email_update::update_email)
                    .service(user::password_update::update_password)
            )
    );
    cfg.service(
        web::scope("/work-sessions")
            .wrap(user_auth)
            .service(work_session::create::create_from_template)
            .service(work_session::create::create_work_session)
            .service(work_session::get::get_work_session)
            .service(work_session::update::update_work_session)
            .service(work_session::tab::create_tab)
            .service(work_session::tab::update_tab)
            .service(work_session::tab::delete_tab)
    );
}
