use actix_cors::Cors;
use crate::config::AllowedOrigins;

/// Any method and header, credentials allowed; origins from the configured allow-list.
pub fn build_cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
