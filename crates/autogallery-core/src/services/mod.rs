//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod deadline;
mod gallery_manager;
mod parent_locks;
mod vehicle_service;

#[cfg(test)]
mod test_support;

pub use app_core::AppCore;
pub use gallery_manager::GalleryManager;
pub use parent_locks::ParentLocks;
pub use vehicle_service::VehicleService;
