//! All API endpoint setup

use axum::Router;
use axum::routing::get;

use crate::storage::Storage;

pub use request::Form;
pub use request::PathParameters;
pub use response::Error;
pub use response::Success;

mod notes;
mod request;
mod response;

/// Get the Axum router for all note routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route(
            "/{note}",
            get(notes::single::<S>)
                .put(notes::update::<S>)
                .delete(notes::delete::<S>),
        )
}
