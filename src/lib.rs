pub mod angle;
pub mod chain;
pub mod converter;
pub mod errors;
pub mod math_utils;
pub mod models;
pub mod path;
pub mod pattern;
pub mod presets;
pub mod renderer;
pub mod transforms;

pub use angle::{AngleSequence, DEFAULT_RESOLUTION};
pub use chain::{run_chain, TransformChain};
pub use converter::convert_svg_to_png;
pub use errors::{PatternError, Warning};
pub use models::{Drawing, PatternEntry, Polyline, SceneConfig, StrokeStyle, TransformSpec};
pub use path::{PathProvider, SvgPath};
pub use pattern::{render_all, render_pattern, PatternInstance, RenderedPattern};
pub use presets::{demo_scene, preset_names, registry, PresetRegistry};
pub use renderer::{calculate_viewbox, generate_svg};
pub use transforms::{Placement, Transform};
