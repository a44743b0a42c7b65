pub const MY_VIOLATION_LIST: &str = "/api/user/violationListByUser";
pub const ADMIN_VIOLATION_LIST: &str = "/api/admin/violationList";
