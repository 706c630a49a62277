//! Host engine for small 3D scenes.
//!
//! Owns the window, the frame loop, the scene graph and the GPU renderer.
//! Games plug in through the [`Game`] trait and keep their per-frame logic in
//! a [`TaskManager`].

pub mod assets;
pub mod camera;
pub mod clock;
pub mod config;
mod context;
pub mod error;
pub mod input;
pub mod render;
pub mod scene;
pub mod task;

pub use assets::{AssetError, Assets, MeshData, MeshHandle, Primitive};
pub use camera::Camera;
pub use clock::Clock;
pub use config::EngineConfig;
pub use context::{init_logging, EngineContext, Flow, Game};
pub use error::EngineError;
pub use input::{InputEvent, Key};
pub use scene::{NodeId, SceneError, SceneGraph, World};
pub use task::{TaskInfo, TaskManager, TaskStatus};
