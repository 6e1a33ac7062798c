mod scene;

pub use scene::SceneWidget;
