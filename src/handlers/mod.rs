pub mod health;
pub mod get;
pub mod list;
pub mod create;

pub use health::health_handler;
pub use get::get_pet_by_id;
pub use list::get_pets;
pub use create::add_pet;

use axum::http::{header, HeaderName};
use chrono::{SecondsFormat, Utc};

/// `Date` header stamped on successful pet responses (RFC 3339, UTC)
pub(crate) fn date_header() -> (HeaderName, String) {
    (
        header::DATE,
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    )
}
