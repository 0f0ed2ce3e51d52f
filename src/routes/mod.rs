pub mod alert_routes;
pub mod auth_routes;
pub mod battery_record_routes;
pub mod inspection_routes;
pub mod location_routes;
pub mod maintenance_routes;
pub mod report_routes;
pub mod shift_routes;
pub mod user_routes;
pub mod vehicle_routes;
