use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use advising_core::cors::cors_layer;
use advising_core::health::healthz;
use advising_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    admin::{
        decide_advising_sheet, get_advising_sheet, list_advising_sheets, list_course_catalog,
        list_courses, list_prerequisites, update_course, update_course_catalog,
        update_prerequisite,
    },
    advising::{
        advising_history, course_catalog, enabled_prerequisites, get_advising_record,
        submit_advising, taken_courses, update_advising,
    },
    auth::{change_password, login, logout, resend_otp, signup, verify_otp},
    health::readyz,
    pages::{admin_dashboard, get_profile, home, update_profile},
};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/verify-otp", post(verify_otp))
        .route("/resend-otp", post(resend_otp))
        .route("/change-password", post(change_password))
        .route("/logout", post(logout))
        // Pages
        .route("/home", get(home))
        .route("/profile", get(get_profile).post(update_profile))
        .route("/admin-dashboard", get(admin_dashboard))
        // Advising
        .route("/advising/submit-advising", post(submit_advising))
        .route(
            "/advising/advising-history/{term}",
            get(get_advising_record).put(update_advising),
        )
        .route("/advising/course-catalog", get(course_catalog))
        .route("/advising/enabled-courses", get(enabled_prerequisites))
        .route("/advising/taken-courses", get(taken_courses))
        .route("/student/advising-history", get(advising_history))
        // Admin
        .route("/admin/courses", get(list_courses))
        .route("/admin/update-course", post(update_course))
        .route("/admin/prerequisites", get(list_prerequisites))
        .route("/admin/prerequisites/update", post(update_prerequisite))
        .route("/admin/course-catalog", get(list_course_catalog))
        .route("/admin/course-catalog/update", post(update_course_catalog))
        .route("/admin/advising-sheets", get(list_advising_sheets))
        .route(
            "/admin/advising-sheet/{id}",
            get(get_advising_sheet).put(decide_advising_sheet),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
