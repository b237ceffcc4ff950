mod app_error;
mod service_error;

pub use app_error::{AppError, AppResult};
pub use service_error::{ServiceError, ServiceResult};
