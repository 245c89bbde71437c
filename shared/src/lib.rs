//! Core of the song roulette: entry list, slice geometry, winner selection
//! and spin planning, plus preference persistence for front ends.

pub mod audio;
pub mod config;
pub mod geometry;
pub mod palette;
pub mod session;
pub mod spin;
pub mod theme;
pub mod view;
pub mod wheel;

pub use audio::{
    is_supported_file, mime_for_extension, title_from_file_name, AudioClip, AudioRef,
    SUPPORTED_EXTENSIONS,
};
pub use config::{config_dir, config_path, delete_config, load_config, save_config, ConfigError};
pub use geometry::{slice_geometry, slice_under_pointer, SliceAngleRange, POINTER_ANGLE_DEG};
pub use palette::{contrast_text_color, Palette, Rgb};
pub use session::{SpinPhase, WheelSession};
pub use spin::{
    Easing, SpinAnimator, SpinPlan, SpinSettings, DEFAULT_DURATION_SECS, DURATION_STEP_SECS,
    MAX_DURATION_SECS, MIN_DURATION_SECS,
};
pub use theme::Theme;
pub use view::{render, render_session, ChipView, SliceView, WheelView, WinnerView};
pub use wheel::{is_spinnable, Entry, EntryId, WheelError, WheelState};
