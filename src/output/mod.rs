pub mod formatter;

pub use formatter::{
    format_breakdown, format_errors, format_gpa, format_json, format_result, format_scale,
    format_tsv, should_use_colors,
};
