//! The proxied API surface, one [`ProxyRoute`] per method and path.

use crate::error::ProxyError;

use super::route::AuthRequirement::{Optional, Public, Required};
use super::route::{ApiMethod, BodyKind, MultipartSchema, PathParams, ProxyRoute};

// =============================================================================
// Multipart Allow-lists
// =============================================================================

/// Fields forwarded when creating or updating a course.
pub static COURSE_FORM: MultipartSchema = MultipartSchema {
    text_fields: &[
        "title",
        "category",
        "price",
        "discountPrice",
        "description",
        "instructor",
        "discountEndsAt",
        "demoVideo",
    ],
    file_fields: &["thumbnail"],
};

/// Fields forwarded when uploading the home banner.
pub static HOME_BANNER_FORM: MultipartSchema = MultipartSchema {
    text_fields: &[],
    file_fields: &["image"],
};

/// Actions accepted by the enrollment review route.
pub const ENROLLMENT_ACTIONS: &[&str] = &["approve", "reject"];

fn enrollment_action(params: &PathParams) -> Result<(), ProxyError> {
    let action = params.get("action").map(|a| a.as_str()).unwrap_or("");
    if action.is_empty() {
        return Err(ProxyError::MissingParameter {
            name: "action".to_string(),
        });
    }
    if ENROLLMENT_ACTIONS.contains(&action) {
        Ok(())
    } else {
        Err(ProxyError::InvalidAction {
            action: action.to_string(),
        })
    }
}

// =============================================================================
// Categories
// =============================================================================

pub static LIST_CATEGORIES: ProxyRoute = ProxyRoute {
    name: "list_categories",
    method: ApiMethod::Get,
    path: "/api/categories",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch categories",
    validate: None,
};

pub static CREATE_CATEGORY: ProxyRoute = ProxyRoute {
    name: "create_category",
    method: ApiMethod::Post,
    path: "/api/categories",
    auth: Required,
    body: BodyKind::Json,
    failure_message: "Failed to create category",
    validate: None,
};

pub static UPDATE_CATEGORY: ProxyRoute = ProxyRoute {
    name: "update_category",
    method: ApiMethod::Put,
    path: "/api/categories/{id}",
    auth: Required,
    body: BodyKind::Json,
    failure_message: "Failed to update category",
    validate: None,
};

pub static DELETE_CATEGORY: ProxyRoute = ProxyRoute {
    name: "delete_category",
    method: ApiMethod::Delete,
    path: "/api/categories/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to delete category",
    validate: None,
};

// =============================================================================
// Courses
// =============================================================================

pub static LIST_COURSES: ProxyRoute = ProxyRoute {
    name: "list_courses",
    method: ApiMethod::Get,
    path: "/api/courses",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch courses",
    validate: None,
};

pub static CREATE_COURSE: ProxyRoute = ProxyRoute {
    name: "create_course",
    method: ApiMethod::Post,
    path: "/api/courses",
    auth: Required,
    body: BodyKind::Multipart(&COURSE_FORM),
    failure_message: "Failed to create course",
    validate: None,
};

pub static GET_COURSE: ProxyRoute = ProxyRoute {
    name: "get_course",
    method: ApiMethod::Get,
    path: "/api/courses/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch course",
    validate: None,
};

pub static UPDATE_COURSE: ProxyRoute = ProxyRoute {
    name: "update_course",
    method: ApiMethod::Put,
    path: "/api/courses/{id}",
    auth: Required,
    body: BodyKind::Multipart(&COURSE_FORM),
    failure_message: "Failed to update course",
    validate: None,
};

pub static DELETE_COURSE: ProxyRoute = ProxyRoute {
    name: "delete_course",
    method: ApiMethod::Delete,
    path: "/api/courses/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to delete course",
    validate: None,
};

// =============================================================================
// Demo Videos
// =============================================================================

pub static LIST_DEMO_VIDEOS: ProxyRoute = ProxyRoute {
    name: "list_demo_videos",
    method: ApiMethod::Get,
    path: "/api/demovideos",
    auth: Public,
    body: BodyKind::None,
    failure_message: "Failed to fetch demo videos",
    validate: None,
};

pub static CREATE_DEMO_VIDEO: ProxyRoute = ProxyRoute {
    name: "create_demo_video",
    method: ApiMethod::Post,
    path: "/api/demovideos",
    auth: Required,
    body: BodyKind::Json,
    failure_message: "Failed to create demo video",
    validate: None,
};

pub static UPDATE_DEMO_VIDEO: ProxyRoute = ProxyRoute {
    name: "update_demo_video",
    method: ApiMethod::Put,
    path: "/api/demovideos/{id}",
    auth: Required,
    body: BodyKind::Json,
    failure_message: "Failed to update demo video",
    validate: None,
};

pub static DELETE_DEMO_VIDEO: ProxyRoute = ProxyRoute {
    name: "delete_demo_video",
    method: ApiMethod::Delete,
    path: "/api/demovideos/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to delete demo video",
    validate: None,
};

// =============================================================================
// Enrollments
// =============================================================================

pub static LIST_ENROLLMENTS: ProxyRoute = ProxyRoute {
    name: "list_enrollments",
    method: ApiMethod::Get,
    path: "/api/enrollments",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch enrollments",
    validate: None,
};

pub static SUBMIT_ENROLLMENT: ProxyRoute = ProxyRoute {
    name: "submit_enrollment",
    method: ApiMethod::Post,
    path: "/api/enrollments",
    auth: Public,
    body: BodyKind::Json,
    failure_message: "Failed to submit enrollment",
    validate: None,
};

pub static REVIEW_ENROLLMENT: ProxyRoute = ProxyRoute {
    name: "review_enrollment",
    method: ApiMethod::Put,
    path: "/api/enrollments/{action}/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to update enrollment",
    validate: Some(enrollment_action),
};

pub static DELETE_ENROLLMENT: ProxyRoute = ProxyRoute {
    name: "delete_enrollment",
    method: ApiMethod::Delete,
    path: "/api/enrollments/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to delete enrollment",
    validate: None,
};

pub static COUNT_ENROLLMENTS: ProxyRoute = ProxyRoute {
    name: "count_enrollments",
    method: ApiMethod::Get,
    path: "/api/enrollments/count/{courseId}",
    auth: Public,
    body: BodyKind::None,
    failure_message: "Failed to fetch enrollment count",
    validate: None,
};

// =============================================================================
// Home Banner
// =============================================================================

pub static GET_HOME_BANNER: ProxyRoute = ProxyRoute {
    name: "get_home_banner",
    method: ApiMethod::Get,
    path: "/api/homebanner",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch home banner",
    validate: None,
};

pub static UPLOAD_HOME_BANNER: ProxyRoute = ProxyRoute {
    name: "upload_home_banner",
    method: ApiMethod::Post,
    path: "/api/homebanner",
    auth: Required,
    body: BodyKind::Multipart(&HOME_BANNER_FORM),
    failure_message: "Failed to upload home banner",
    validate: None,
};

pub static DELETE_HOME_BANNER: ProxyRoute = ProxyRoute {
    name: "delete_home_banner",
    method: ApiMethod::Delete,
    path: "/api/homebanner",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to delete home banner",
    validate: None,
};

// =============================================================================
// Trending
// =============================================================================

pub static LIST_TRENDING: ProxyRoute = ProxyRoute {
    name: "list_trending",
    method: ApiMethod::Get,
    path: "/api/trending",
    auth: Public,
    body: BodyKind::None,
    failure_message: "Failed to fetch trending courses",
    validate: None,
};

pub static ADD_TRENDING: ProxyRoute = ProxyRoute {
    name: "add_trending",
    method: ApiMethod::Post,
    path: "/api/trending/add",
    auth: Required,
    body: BodyKind::Json,
    failure_message: "Failed to add trending course",
    validate: None,
};

pub static REMOVE_TRENDING: ProxyRoute = ProxyRoute {
    name: "remove_trending",
    method: ApiMethod::Delete,
    path: "/api/trending/{id}",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to remove trending course",
    validate: None,
};

// =============================================================================
// Auth and User
// =============================================================================

/// Login is proxied like any other route but handled by its own handler,
/// which issues the session cookie.
pub static LOGIN: ProxyRoute = ProxyRoute {
    name: "login",
    method: ApiMethod::Post,
    path: "/api/auth/login",
    auth: Public,
    body: BodyKind::Json,
    failure_message: "Login failed",
    validate: None,
};

pub static CURRENT_USER: ProxyRoute = ProxyRoute {
    name: "current_user",
    method: ApiMethod::Get,
    path: "/api/auth/user",
    auth: Required,
    body: BodyKind::None,
    failure_message: "Failed to fetch user",
    validate: None,
};

pub static USER_STATUS: ProxyRoute = ProxyRoute {
    name: "user_status",
    method: ApiMethod::Get,
    path: "/api/user/status",
    auth: Optional,
    body: BodyKind::None,
    failure_message: "Failed to fetch user status",
    validate: None,
};

/// Every route served by the generic proxy handler.
///
/// [`LOGIN`] is absent on purpose: it has a dedicated handler.
pub static ROUTES: &[&ProxyRoute] = &[
    &LIST_CATEGORIES,
    &CREATE_CATEGORY,
    &UPDATE_CATEGORY,
    &DELETE_CATEGORY,
    &LIST_COURSES,
    &CREATE_COURSE,
    &GET_COURSE,
    &UPDATE_COURSE,
    &DELETE_COURSE,
    &LIST_DEMO_VIDEOS,
    &CREATE_DEMO_VIDEO,
    &UPDATE_DEMO_VIDEO,
    &DELETE_DEMO_VIDEO,
    &LIST_ENROLLMENTS,
    &SUBMIT_ENROLLMENT,
    &REVIEW_ENROLLMENT,
    &DELETE_ENROLLMENT,
    &COUNT_ENROLLMENTS,
    &GET_HOME_BANNER,
    &UPLOAD_HOME_BANNER,
    &DELETE_HOME_BANNER,
    &LIST_TRENDING,
    &ADD_TRENDING,
    &REMOVE_TRENDING,
    &CURRENT_USER,
    &USER_STATUS,
];
