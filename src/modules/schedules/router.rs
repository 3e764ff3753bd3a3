use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_schedule, delete_schedule, get_class_schedules, get_schedule, get_schedules, get_week,
    update_schedule,
};

pub fn init_schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_schedules).post(create_schedule))
        .route("/week", get(get_week))
        .route("/class/{class_id}", get(get_class_schedules))
        .route(
            "/{id}",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
}
