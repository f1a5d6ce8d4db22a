pub mod auth;
pub mod projects;
pub mod tasks;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Users
        .route("/api/users", post(users::register))
        .route("/api/users/profile", put(users::update_profile))
        .route("/api/users/changepassword", put(users::change_password))
        // Auth
        .route("/api/auth", post(auth::login).get(auth::me))
        // Projects
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Tasks
        .route(
            "/api/projects/{id}/tasks",
            get(tasks::list_by_project).post(tasks::create),
        )
        .route(
            "/api/tasks/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
}
