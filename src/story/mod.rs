pub mod config;
pub mod controller;
pub mod mounts;
pub mod panel;

pub use config::{AverageSeries, DotSpec, LineSpec, StoryStep, StoryTable};
pub use controller::MarkerController;
pub use mounts::{AnchorHost, MountPoint, build_mount_points};
pub use panel::{FadeTuning, PanelConfig, PanelContent, fade_opacity, render_panel};
