use crate::modules::context::status::FoodLinkStatus;
use poem::{handler, web::Json, IntoResponse};

#[handler]
pub async fn get_status() -> impl IntoResponse {
    Json(FoodLinkStatus::get())
}
