//! Format conversion layer.
//!
//! Two representations of the same bricks:
//! - the **viewer** format, compact records grouped in layers for bulk rendering;
//! - the **editor** format, id-keyed bricks for interactive authoring.
//!
//! Conversion is lossless where both sides carry the field. Colors are
//! quantized to bytes and shape details reset to standard dimensions when
//! passing through the editor format.

pub mod clock;
pub mod color;
pub mod viewer;
pub mod editor;
pub mod convert;
pub mod parse;

pub use clock::{generate_id, iso8601_utc, now_iso8601};
pub use color::{hex_to_rgb, rgb_to_hex, NEUTRAL_GRAY};
pub use viewer::{
    ViewerBrick, ViewerLayer, ViewerLayers, standard_brick, validate_viewer_brick_data,
    STANDARD_SIZE, STANDARD_THICKNESS, STANDARD_CYLINDER_THICKNESS, STANDARD_CIRCLE_RADIUS,
};
pub use editor::{EditorBrick, EditorExport, ExportMetadata, EXPORT_VERSION};
pub use convert::{
    LAYER_SPACING, layer_index_for,
    viewer_to_editor, editor_to_viewer,
    viewer_array_to_editor, editor_to_viewer_array,
    viewer_layers_to_editor, editor_to_viewer_layers,
};
pub use parse::{DataFormat, detect_format, parse_brick_data, export_viewer_json, export_viewer_layers_json};
