mod debug;
mod story;

pub use debug::render_debug_view;
pub use story::render_story_view;
