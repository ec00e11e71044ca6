pub mod clock;
pub mod composer;
pub mod repository;
pub mod task;
