pub mod camera;
pub mod display;
pub mod setup;

pub use camera::camera_follow;
pub use setup::setup;
