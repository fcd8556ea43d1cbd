pub mod admin_service;
pub mod context;
pub mod dashboard_service;
pub mod lifecycle;
pub mod meetings_service;
pub mod permissions;
pub mod projects_service;
pub mod tasks_service;
pub mod users_service;

pub use admin_service::AdminService;
pub use context::RequestContext;
pub use dashboard_service::{DashboardService, DashboardSource, DashboardStats};
pub use meetings_service::MeetingsService;
pub use projects_service::ProjectsService;
pub use tasks_service::TasksService;
pub use users_service::UsersService;
