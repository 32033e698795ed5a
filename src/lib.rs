#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod compose;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod input;
pub mod ledger;
pub mod raster;
pub mod session;
pub mod store;
pub mod stroke;
pub mod surface;
pub mod svg;
pub mod util;
pub mod vectorize;
pub mod view;

pub use command::{EditHistory, EditorCommand};
pub use compose::{CanvasSize, ThumbnailRenderer, VectorArtifact, compose};
pub use config::{BrushSettings, DigitizeConfig};
pub use error::{ConfigError, DigitizeError, ExportError, SaveError, StoreError};
pub use event::{EditorEvent, EventHandler};
pub use input::{InputEvent, InputLocation};
pub use ledger::StrokeLedger;
pub use raster::RasterImage;
pub use session::InscriptionSession;
pub use store::{InscriptionRecord, RecordMeta, RecordStore};
pub use stroke::{Stroke, StrokeLayer, ToolKind};
pub use surface::{EditingSurface, Tool};
pub use vectorize::{BinaryMask, ContourPath, binarize, digitize, trace_contours};
pub use view::ViewTransform;
