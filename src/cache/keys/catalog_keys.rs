// Services and projects are cached as a full listing plus one entry per item.

const SERVICES_PREFIX: &str = "services:";
const PROJECTS_PREFIX: &str = "projects:";

pub const SERVICES_LIST_KEY: &str = "services:list";
pub const SERVICES_PATTERN: &str = "services:*";

pub const PROJECTS_LIST_KEY: &str = "projects:list";
pub const PROJECTS_PATTERN: &str = "projects:*";

pub fn service_detail_key(id: &str) -> String {
    format!("{}detail:{}", SERVICES_PREFIX, id)
}

pub fn project_detail_key(id: &str) -> String {
    format!("{}detail:{}", PROJECTS_PREFIX, id)
}
