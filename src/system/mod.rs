pub mod linear_system;
pub mod model;
pub mod plant;
pub mod response;
