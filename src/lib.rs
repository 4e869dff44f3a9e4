//! Scatterflow turns a table of located, categorized records into an animated point cloud.
//!
//! Each record becomes one point. The animator tweens every point between a cycle of layouts
//! (geographic map, category bars, a dense grid, a latitude histogram), recoloring through a
//! cycle of color ramps on each transition:
//!
//! - Load a [`RecordTable`] with [`load_records`]
//! - Build an [`Animator`] from an [`AppConfig`]
//! - [`Animator::run`] it against a [`TriggerSource`] and a [`PointRenderer`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod color;
pub mod config;
pub mod data;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgb, Vec2};
pub use crate::foundation::error::{ScatterError, ScatterResult};

pub use crate::animation::animator::{AnimationState, Animator, RunStats};
pub use crate::animation::ease::Ease;
pub use crate::animation::pointset::{PointSet, Timing};
pub use crate::animation::trigger::{AutoTrigger, ChannelTrigger, Trigger, TriggerSource};
pub use crate::color::ramp::ColorRamp;
pub use crate::config::AppConfig;
pub use crate::data::load::{CoordinateColumns, load_records, read_records};
pub use crate::data::table::{FieldId, Record, RecordTable};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::{Arrangement, Layout, LayoutSpec};
pub use crate::render::backend::{DrawParams, FrameRGBA, PointRenderer};
pub use crate::render::cpu::CpuRenderer;
