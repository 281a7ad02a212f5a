mod app_logs;
mod resource_list;

pub use app_logs::AppLogsPane;
pub use resource_list::ResourceListPane;
