pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod content;
pub mod extensions;
pub mod site;

// Re-export key types at crate root for convenience
pub use api::config::{
    AmbientConfig, ContactConfig, DialogueConfig, EntranceConfig, FieldConfig, NarrationConfig,
    SectionConfig, SiteConfig, TrailConfig,
};
pub use api::error::{FolioError, Result};
pub use api::types::{AudioPermission, DeviceProfile, RegionBounds, Section, Side, Viewport};
pub use assets::manifest::AssetManifest;
pub use content::scripts::{Script, ScriptBook};
pub use core::time::{IntervalTimer, Timeline};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::draw_list::{SpriteStyle, TrailDrawList, TrailLine, TrailSprite};
pub use renderer::traits::TrailSurface;
pub use site::{Site, SiteEvent};
pub use systems::ambient::{AmbientAudio, AmbientCommand};
pub use systems::contact::{ContactForm, EmailRequest, SubmitStatus, TemplateParams};
pub use systems::dialogue::{ClickOutcome, DialogueDriver, DialogueView, Narrator, SilentNarrator};
pub use systems::entrance::{EntranceEvent, EntranceSequencer, EntranceView, Phase};
pub use systems::sections::{NavState, SectionChange, SectionDetector};
pub use systems::sparks::{Spark, SparkEmitter};
pub use systems::trail::{Rng, TrailColor, TrailEngine, TrailPoint};

// Extensions: decoupled motion helpers
pub use extensions::{ease, lerp, there_and_back, Easing};
